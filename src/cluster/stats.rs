use super::model::{ClusterFeature, ClusterType, Snapshot};

/// Derived metrics over one snapshot. Population totals sum the features of
/// the configured reference type, the type whose clusters cover everybody;
/// which type that is differs between simulator configurations, so it is a
/// parameter here.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotStats<'a> {
    snapshot: &'a Snapshot,
    reference: ClusterType,
}

impl<'a> SnapshotStats<'a> {
    pub fn new(snapshot: &'a Snapshot, reference: ClusterType) -> Self {
        Self {
            snapshot,
            reference,
        }
    }

    fn reference_features(&self) -> impl Iterator<Item = &'a ClusterFeature> {
        let reference = self.reference;
        self.snapshot
            .features
            .iter()
            .filter(move |feature| feature.kind == reference)
    }

    pub fn total_population(&self) -> u64 {
        self.reference_features()
            .map(|feature| u64::from(feature.size))
            .sum()
    }

    pub fn total_infected(&self) -> u64 {
        self.reference_features()
            .map(|feature| u64::from(feature.infected))
            .sum()
    }

    /// Non-finite when the reference population is empty; callers guard.
    pub fn infected_fraction(&self) -> f64 {
        self.total_infected() as f64 / self.total_population() as f64
    }

    pub fn healthy_fraction(&self) -> f64 {
        1.0 - self.infected_fraction()
    }

    pub fn cluster(&self, kind: ClusterType, id: u32) -> Option<&'a ClusterFeature> {
        self.snapshot
            .features
            .iter()
            .find(|feature| feature.kind == kind && feature.id == id)
    }

    pub fn clusters_of(&self, kind: ClusterType) -> Snapshot {
        Snapshot {
            features: self
                .snapshot
                .features
                .iter()
                .filter(|feature| feature.kind == kind)
                .cloned()
                .collect(),
            malformed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(kind: ClusterType, id: u32, size: u32, infected: u32) -> ClusterFeature {
        ClusterFeature {
            id,
            kind,
            size,
            infected,
            infected_percent: if size == 0 {
                -1.0
            } else {
                infected as f64 / size as f64
            },
            lon: 4.0 + id as f64 * 0.01,
            lat: 51.0 + id as f64 * 0.01,
        }
    }

    fn sample() -> Snapshot {
        Snapshot {
            features: vec![
                feature(ClusterType::Household, 1, 50, 5),
                feature(ClusterType::School, 1, 400, 20),
                feature(ClusterType::Household, 2, 30, 3),
                feature(ClusterType::Work, 9, 120, 0),
            ],
            malformed: 0,
        }
    }

    #[test]
    fn reference_type_totals() {
        let snapshot = sample();
        let stats = SnapshotStats::new(&snapshot, ClusterType::Household);

        assert_eq!(stats.total_population(), 80);
        assert_eq!(stats.total_infected(), 8);
        assert_eq!(stats.infected_fraction(), 0.1);
        assert_eq!(stats.healthy_fraction(), 0.9);
    }

    #[test]
    fn infected_never_exceeds_population() {
        let snapshot = sample();
        for kind in ClusterType::ALL {
            let stats = SnapshotStats::new(&snapshot, kind);
            assert!(stats.total_population() >= stats.total_infected());
        }
    }

    #[test]
    fn empty_reference_population_is_non_finite() {
        let snapshot = sample();
        let stats = SnapshotStats::new(&snapshot, ClusterType::SecondaryCommunity);
        assert_eq!(stats.total_population(), 0);
        assert!(!stats.infected_fraction().is_finite());
    }

    #[test]
    fn cluster_lookup_hits_and_misses() {
        let snapshot = sample();
        let stats = SnapshotStats::new(&snapshot, ClusterType::Household);

        let hit = stats.cluster(ClusterType::Work, 9).unwrap();
        assert_eq!(hit.size, 120);
        assert!(stats.cluster(ClusterType::Work, 10).is_none());
        assert!(stats.cluster(ClusterType::School, 9).is_none());
    }

    #[test]
    fn type_partitions_cover_the_snapshot_exactly() {
        let snapshot = sample();
        let stats = SnapshotStats::new(&snapshot, ClusterType::Household);

        let total = ClusterType::ALL
            .into_iter()
            .map(|kind| stats.clusters_of(kind).feature_count())
            .sum::<usize>();
        assert_eq!(total, snapshot.feature_count());

        let households = stats.clusters_of(ClusterType::Household);
        assert_eq!(households.feature_count(), 2);
        assert_eq!(households.features[0].id, 1);
        assert_eq!(households.features[1].id, 2);
    }
}
