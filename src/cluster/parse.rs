use log::warn;

use super::model::{ClusterFeature, ClusterType, Snapshot};
use crate::error::VisError;

struct HeaderLayout {
    lon: usize,
    lat: usize,
    id: usize,
    size: usize,
    infected: usize,
    infected_percent: usize,
    kind: Option<usize>,
}

fn header_layout(header: &str) -> Result<HeaderLayout, VisError> {
    let columns = header.split(',').map(str::trim).collect::<Vec<_>>();
    let find = |column: &'static str| {
        columns
            .iter()
            .position(|name| *name == column)
            .ok_or(VisError::MalformedHeader { column })
    };

    Ok(HeaderLayout {
        lon: find("lon")?,
        lat: find("lat")?,
        id: find("id")?,
        size: find("size")?,
        infected: find("infected")?,
        infected_percent: find("infected_percent")?,
        kind: columns.iter().position(|name| *name == "type"),
    })
}

fn int_field(fields: &[&str], index: usize, malformed: &mut bool) -> u32 {
    match fields.get(index).and_then(|raw| raw.parse().ok()) {
        Some(value) => value,
        None => {
            *malformed = true;
            0
        }
    }
}

fn float_field(fields: &[&str], index: usize, malformed: &mut bool) -> f64 {
    match fields.get(index).and_then(|raw| raw.parse().ok()) {
        Some(value) => value,
        None => {
            *malformed = true;
            f64::NAN
        }
    }
}

/// Parses one simulated day's snapshot file. Column positions come from the
/// header line, so files may reorder columns freely. When the optional `type`
/// column is absent every record is a household, the type the simulator puts
/// everybody in.
pub fn parse_snapshot(text: &str) -> Result<Snapshot, VisError> {
    let mut lines = text.lines();
    let layout = header_layout(lines.next().unwrap_or(""))?;

    let mut snapshot = Snapshot::default();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = line.split(',').map(str::trim).collect::<Vec<_>>();
        let mut malformed = false;

        let kind = match layout.kind {
            Some(index) => match fields.get(index).and_then(|raw| ClusterType::from_label(raw)) {
                Some(kind) => kind,
                None => {
                    malformed = true;
                    ClusterType::Household
                }
            },
            None => ClusterType::Household,
        };

        snapshot.features.push(ClusterFeature {
            id: int_field(&fields, layout.id, &mut malformed),
            kind,
            size: int_field(&fields, layout.size, &mut malformed),
            infected: int_field(&fields, layout.infected, &mut malformed),
            infected_percent: float_field(&fields, layout.infected_percent, &mut malformed),
            lon: float_field(&fields, layout.lon, &mut malformed),
            lat: float_field(&fields, layout.lat, &mut malformed),
        });

        if malformed {
            snapshot.malformed += 1;
            warn!("snapshot record has unparseable fields: {line:?}");
        }
    }

    Ok(snapshot)
}
