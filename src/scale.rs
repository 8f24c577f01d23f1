use crate::cluster::Snapshot;

/// Scale factor applied to the unzoomed size extremes at a given map zoom
/// level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomStep {
    pub zoom: u8,
    pub factor: f64,
}

pub const DEFAULT_ZOOM_LADDER: [ZoomStep; 6] = [
    ZoomStep {
        zoom: 1,
        factor: 1.0,
    },
    ZoomStep {
        zoom: 4,
        factor: 1.0,
    },
    ZoomStep {
        zoom: 7,
        factor: 2.0,
    },
    ZoomStep {
        zoom: 13,
        factor: 4.0,
    },
    ZoomStep {
        zoom: 15,
        factor: 7.0,
    },
    ZoomStep {
        zoom: 18,
        factor: 10.0,
    },
];

/// One breakpoint of the (zoom, cluster size) -> rendered radius table
/// consumed by an interval-interpolating renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleStop {
    pub zoom: u8,
    pub size: u32,
    pub rendered: f64,
}

/// Builds the stop table for one snapshot: every distinct cluster size is
/// linearly rescaled into `[min_rendered * factor, max_rendered * factor]`
/// per ladder entry, ascending within each zoom level, behind a zero floor
/// stop. When all clusters share one size everything maps to the scaled
/// minimum instead of dividing by zero.
pub fn scale_stops(
    snapshot: &Snapshot,
    min_rendered: f64,
    max_rendered: f64,
    ladder: &[ZoomStep],
) -> Vec<ScaleStop> {
    let mut stops = vec![ScaleStop {
        zoom: 0,
        size: 0,
        rendered: 0.0,
    }];

    let mut sizes = snapshot
        .features
        .iter()
        .map(|feature| feature.size)
        .collect::<Vec<_>>();
    sizes.sort_unstable();
    sizes.dedup();

    let Some((&min_size, &max_size)) = sizes.first().zip(sizes.last()) else {
        return stops;
    };

    for step in ladder {
        let zoom_min = min_rendered * step.factor;
        let zoom_max = max_rendered * step.factor;
        let span = f64::from(max_size - min_size);

        for &size in &sizes {
            let rendered = if max_size == min_size {
                zoom_min
            } else {
                f64::from(size - min_size) * (zoom_max - zoom_min) / span + zoom_min
            };
            stops.push(ScaleStop {
                zoom: step.zoom,
                size,
                rendered,
            });
        }
    }

    stops
}
