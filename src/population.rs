use std::collections::BTreeMap;

use serde::Deserialize;

use crate::cluster::ClusterType;
use crate::error::VisError;

/// Value count per bucket (cluster size, or age in years).
pub type Histogram = BTreeMap<u32, u64>;

/// Per-day population statistics document from the extended simulation
/// output: per-type cluster size histograms, an age histogram, and per-type
/// population densities.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PopulationStats {
    #[serde(default)]
    pub cluster_sizes: BTreeMap<ClusterType, Histogram>,
    #[serde(default)]
    pub age_map: Histogram,
    #[serde(default)]
    pub densities: BTreeMap<ClusterType, f64>,
}

impl PopulationStats {
    pub fn total_people(&self) -> u64 {
        self.age_map.values().sum()
    }

    pub fn size_histogram(&self, kind: ClusterType) -> Option<&Histogram> {
        self.cluster_sizes.get(&kind)
    }
}

pub fn parse_population(text: &str) -> Result<PopulationStats, VisError> {
    serde_json::from_str(text).map_err(|source| VisError::MalformedDocument {
        what: "population",
        source,
    })
}
