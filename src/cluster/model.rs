use std::fmt;

use serde::Deserialize;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ClusterType {
    Household,
    Work,
    School,
    PrimaryCommunity,
    SecondaryCommunity,
}

impl ClusterType {
    pub const ALL: [ClusterType; 5] = [
        Self::Household,
        Self::Work,
        Self::School,
        Self::PrimaryCommunity,
        Self::SecondaryCommunity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Household => "household",
            Self::Work => "work",
            Self::School => "school",
            Self::PrimaryCommunity => "primary_community",
            Self::SecondaryCommunity => "secondary_community",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == value)
    }
}

impl fmt::Display for ClusterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug)]
pub struct ClusterFeature {
    pub id: u32,
    pub kind: ClusterType,
    pub size: u32,
    pub infected: u32,
    pub infected_percent: f64,
    pub lon: f64,
    pub lat: f64,
}

impl ClusterFeature {
    /// -1.0 is the simulator's "no infection data" sentinel.
    pub fn display_infected_percent(&self) -> f64 {
        if self.infected_percent == -1.0 {
            0.0
        } else {
            self.infected_percent
        }
    }

    pub fn coordinates(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// All cluster records of one simulated day, in file order.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub features: Vec<ClusterFeature>,
    pub malformed: usize,
}

impl Snapshot {
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for kind in ClusterType::ALL {
            assert_eq!(ClusterType::from_label(kind.label()), Some(kind));
        }
        assert_eq!(ClusterType::from_label("hospital"), None);
    }

    #[test]
    fn sentinel_percent_displays_as_zero() {
        let feature = ClusterFeature {
            id: 1,
            kind: ClusterType::Household,
            size: 10,
            infected: 0,
            infected_percent: -1.0,
            lon: 4.0,
            lat: 51.0,
        };
        assert_eq!(feature.display_infected_percent(), 0.0);

        let feature = ClusterFeature {
            infected_percent: 0.25,
            ..feature
        };
        assert_eq!(feature.display_infected_percent(), 0.25);
    }
}
