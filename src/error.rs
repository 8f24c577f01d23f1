use thiserror::Error;

use crate::cluster::ClusterType;

#[derive(Debug, Error)]
pub enum VisError {
    #[error("snapshot header is missing required column `{column}`")]
    MalformedHeader { column: &'static str },

    #[error("no {kind} cluster with id {id} on day {day}")]
    ClusterNotFound {
        kind: ClusterType,
        id: u32,
        day: usize,
    },

    #[error("invalid {what} document")]
    MalformedDocument {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
