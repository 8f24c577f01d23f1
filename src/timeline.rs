use crate::cluster::{ClusterType, SnapshotStats, parse_snapshot};
use crate::error::VisError;

/// One day's totals. Day index equals the position of the source file in the
/// supplied order; the file-system layer decides that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayAggregate {
    pub size: u64,
    pub infected: u64,
}

pub fn total_course(
    files: &[String],
    reference: ClusterType,
) -> Result<Vec<DayAggregate>, VisError> {
    let mut course = Vec::with_capacity(files.len());
    for text in files {
        let snapshot = parse_snapshot(text)?;
        let stats = SnapshotStats::new(&snapshot, reference);
        course.push(DayAggregate {
            size: stats.total_population(),
            infected: stats.total_infected(),
        });
    }
    Ok(course)
}

/// Fails fast when the cluster is missing on some day; a cluster disappearing
/// mid-run means the input is inconsistent.
pub fn cluster_course(
    files: &[String],
    kind: ClusterType,
    id: u32,
) -> Result<Vec<DayAggregate>, VisError> {
    let mut course = Vec::with_capacity(files.len());
    for (day, text) in files.iter().enumerate() {
        let snapshot = parse_snapshot(text)?;
        let stats = SnapshotStats::new(&snapshot, kind);
        let feature = stats
            .cluster(kind, id)
            .ok_or(VisError::ClusterNotFound { kind, id, day })?;
        course.push(DayAggregate {
            size: u64::from(feature.size),
            infected: u64::from(feature.infected),
        });
    }
    Ok(course)
}
