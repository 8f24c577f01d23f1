use std::f64::consts::TAU;

use serde::Deserialize;

use crate::cluster::Snapshot;

pub const GEO_CIRCLE_POINTS: usize = 64;

const KM_PER_DEGREE_LAT: f64 = 110.574;
const KM_PER_DEGREE_LON_AT_EQUATOR: f64 = 111.320;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Closed polygon ring approximating a circle of `radius_km` around
/// `center`, as `points + 1` lon/lat pairs with the first repeated at the
/// end. Planar approximation; fine for city-scale influence rings, wrong for
/// large radii or near the poles.
pub fn geo_circle(center: LatLon, radius_km: f64, points: usize) -> Vec<[f64; 2]> {
    if points == 0 {
        return Vec::new();
    }

    let degrees_lon = radius_km / (KM_PER_DEGREE_LON_AT_EQUATOR * center.lat.to_radians().cos());
    let degrees_lat = radius_km / KM_PER_DEGREE_LAT;

    let mut ring = Vec::with_capacity(points + 1);
    for index in 0..points {
        let theta = index as f64 / points as f64 * TAU;
        ring.push([
            center.lon + theta.cos() * degrees_lon,
            center.lat + theta.sin() * degrees_lat,
        ]);
    }
    ring.push(ring[0]);
    ring
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: LatLon,
    pub max: LatLon,
}

/// Smallest lon/lat box around all features, expanded by `margin` degrees on
/// every side. `None` for an empty snapshot.
pub fn bounding_box(snapshot: &Snapshot, margin: f64) -> Option<BoundingBox> {
    let first = snapshot.features.first()?;
    let mut min_lon = first.lon;
    let mut max_lon = first.lon;
    let mut min_lat = first.lat;
    let mut max_lat = first.lat;

    for feature in &snapshot.features[1..] {
        min_lon = min_lon.min(feature.lon);
        max_lon = max_lon.max(feature.lon);
        min_lat = min_lat.min(feature.lat);
        max_lat = max_lat.max(feature.lat);
    }

    Some(BoundingBox {
        min: LatLon {
            lat: min_lat - margin,
            lon: min_lon - margin,
        },
        max: LatLon {
            lat: max_lat + margin,
            lon: max_lon + margin,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ClusterFeature, ClusterType};

    const BRUSSELS: LatLon = LatLon {
        lat: 50.85,
        lon: 4.35,
    };

    #[test]
    fn ring_is_closed_with_one_extra_point() {
        let ring = geo_circle(BRUSSELS, 5.0, GEO_CIRCLE_POINTS);
        assert_eq!(ring.len(), GEO_CIRCLE_POINTS + 1);
        assert_eq!(ring[0], ring[GEO_CIRCLE_POINTS]);

        let ring = geo_circle(BRUSSELS, 5.0, 8);
        assert_eq!(ring.len(), 9);
        assert_eq!(ring[0], ring[8]);
    }

    #[test]
    fn ring_spans_the_expected_latitude_extent() {
        let ring = geo_circle(BRUSSELS, 110.574, 64);
        let max_lat = ring.iter().map(|point| point[1]).fold(f64::MIN, f64::max);
        let min_lat = ring.iter().map(|point| point[1]).fold(f64::MAX, f64::min);

        // 110.574 km is one degree of latitude
        assert!((max_lat - BRUSSELS.lat - 1.0).abs() < 1e-9);
        assert!((BRUSSELS.lat - min_lat - 1.0).abs() < 1e-9);
    }

    #[test]
    fn longitude_extent_grows_with_latitude() {
        let spread = |lat: f64| {
            let ring = geo_circle(LatLon { lat, lon: 0.0 }, 10.0, 32);
            let max = ring.iter().map(|point| point[0]).fold(f64::MIN, f64::max);
            let min = ring.iter().map(|point| point[0]).fold(f64::MAX, f64::min);
            max - min
        };
        assert!(spread(60.0) > spread(10.0));
    }

    #[test]
    fn zero_points_yields_no_ring() {
        assert!(geo_circle(BRUSSELS, 5.0, 0).is_empty());
    }

    fn located(lon: f64, lat: f64) -> ClusterFeature {
        ClusterFeature {
            id: 0,
            kind: ClusterType::Household,
            size: 1,
            infected: 0,
            infected_percent: 0.0,
            lon,
            lat,
        }
    }

    #[test]
    fn bounding_box_covers_all_features() {
        let snapshot = Snapshot {
            features: vec![located(4.3, 50.8), located(4.9, 52.3), located(3.7, 51.0)],
            malformed: 0,
        };
        let bbox = bounding_box(&snapshot, 0.5).unwrap();

        assert_eq!(bbox.min.lon, 3.7 - 0.5);
        assert_eq!(bbox.max.lon, 4.9 + 0.5);
        assert_eq!(bbox.min.lat, 50.8 - 0.5);
        assert_eq!(bbox.max.lat, 52.3 + 0.5);
    }

    #[test]
    fn bounding_box_of_empty_snapshot_is_none() {
        assert!(bounding_box(&Snapshot::default(), 0.5).is_none());
    }
}
