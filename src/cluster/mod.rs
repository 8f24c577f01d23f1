mod model;
mod parse;
mod stats;

pub use model::{ClusterFeature, ClusterType, Snapshot};
pub use parse::parse_snapshot;
pub use stats::SnapshotStats;
