use serde::Deserialize;

use crate::error::VisError;
use crate::geo::{GEO_CIRCLE_POINTS, LatLon, geo_circle};

/// An air travel facility from the extended simulation output.
#[derive(Clone, Debug, Deserialize)]
pub struct Facility {
    pub name: String,
    pub city: String,
    pub location: LatLon,
    pub passengers_today: u64,
    pub passengers_x_days: u64,
    pub x_days: u32,
    /// Sphere-of-influence radius in kilometers.
    pub influence: f64,
}

impl Facility {
    pub fn daily_average(&self) -> f64 {
        self.passengers_x_days as f64 / f64::from(self.x_days)
    }

    pub fn influence_ring(&self) -> Vec<[f64; 2]> {
        geo_circle(self.location, self.influence, GEO_CIRCLE_POINTS)
    }
}

#[derive(Debug, Deserialize)]
struct FacilityDocument {
    facilities: Vec<Facility>,
}

pub fn parse_facilities(text: &str) -> Result<Vec<Facility>, VisError> {
    let document: FacilityDocument =
        serde_json::from_str(text).map_err(|source| VisError::MalformedDocument {
            what: "facility",
            source,
        })?;
    Ok(document.facilities)
}
