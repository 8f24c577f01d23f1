pub mod cluster;
pub mod error;
pub mod facility;
pub mod geo;
pub mod population;
pub mod scale;
pub mod timeline;
pub mod util;

pub use cluster::{ClusterFeature, ClusterType, Snapshot, SnapshotStats, parse_snapshot};
pub use error::VisError;
