use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;

use epivis::cluster::{ClusterType, Snapshot, SnapshotStats, parse_snapshot};
use epivis::facility::parse_facilities;
use epivis::geo::{self, LatLon};
use epivis::population::parse_population;
use epivis::scale::{DEFAULT_ZOOM_LADDER, scale_stops};
use epivis::timeline::{cluster_course, total_course};
use epivis::util::{format_count, format_fraction};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Cluster type whose sizes are summed for whole-population totals.
    #[arg(long, value_enum, global = true, default_value_t = ClusterType::PrimaryCommunity)]
    reference_type: ClusterType,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate view of one simulated day
    Summary {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long, default_value_t = 0)]
        day: usize,
    },
    /// Per-day aggregates across the whole run, whole population or one cluster
    Timeline {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long, value_enum, requires = "id")]
        kind: Option<ClusterType>,
        #[arg(long, requires = "kind")]
        id: Option<u32>,
    },
    /// One cluster's record on one day
    Cluster {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long, default_value_t = 0)]
        day: usize,
        #[arg(long, value_enum)]
        kind: ClusterType,
        #[arg(long)]
        id: u32,
    },
    /// Zoom-ladder radius stop table for a day's snapshot
    Scale {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long, default_value_t = 0)]
        day: usize,
        #[arg(long, default_value_t = 1.0)]
        min_size: f64,
        #[arg(long, default_value_t = 10.0)]
        max_size: f64,
    },
    /// Influence ring polygon around a point, printed as JSON
    Circle {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Radius in kilometers
        #[arg(long)]
        radius: f64,
        #[arg(long, default_value_t = geo::GEO_CIRCLE_POINTS)]
        points: usize,
    },
    /// Air travel facilities and their spheres of influence
    Facilities {
        #[arg(long)]
        file: PathBuf,
    },
    /// Population statistics document summary
    Population {
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Summary { dir, day } => summary(&dir, day, args.reference_type),
        Command::Timeline { dir, kind, id } => timeline(&dir, kind.zip(id), args.reference_type),
        Command::Cluster { dir, day, kind, id } => cluster(&dir, day, kind, id),
        Command::Scale {
            dir,
            day,
            min_size,
            max_size,
        } => scale(&dir, day, min_size, max_size),
        Command::Circle {
            lat,
            lon,
            radius,
            points,
        } => circle(LatLon { lat, lon }, radius, points),
        Command::Facilities { file } => facilities(&file),
        Command::Population { file } => population(&file),
    }
}

/// Reads every regular file in the run directory, in lexicographic name
/// order; that order defines the simulated-day index.
fn load_run(dir: &Path) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read simulation directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        files.push(text);
    }

    info!("loaded {} snapshot files from {}", files.len(), dir.display());
    Ok(files)
}

fn load_day(dir: &Path, day: usize) -> Result<Snapshot> {
    let files = load_run(dir)?;
    let text = files
        .get(day)
        .with_context(|| format!("run has {} days, no day {day}", files.len()))?;
    let snapshot = parse_snapshot(text)
        .with_context(|| format!("failed to parse snapshot for day {day}"))?;
    Ok(snapshot)
}

fn summary(dir: &Path, day: usize, reference: ClusterType) -> Result<()> {
    let snapshot = load_day(dir, day)?;
    let stats = SnapshotStats::new(&snapshot, reference);

    println!("day {day}: {} clusters", snapshot.feature_count());
    for kind in ClusterType::ALL {
        println!(
            "  {kind:<20} {}",
            stats.clusters_of(kind).feature_count()
        );
    }
    println!("population ({reference}): {}", format_count(stats.total_population()));
    println!(
        "infected:  {} ({})",
        format_count(stats.total_infected()),
        format_fraction(stats.infected_fraction())
    );
    if let Some(bbox) = geo::bounding_box(&snapshot, 0.0) {
        println!(
            "bounds: ({:.4}, {:.4}) .. ({:.4}, {:.4})",
            bbox.min.lon, bbox.min.lat, bbox.max.lon, bbox.max.lat
        );
    }
    if snapshot.malformed > 0 {
        println!("warning: {} records had unparseable fields", snapshot.malformed);
    }
    Ok(())
}

fn timeline(dir: &Path, target: Option<(ClusterType, u32)>, reference: ClusterType) -> Result<()> {
    let files = load_run(dir)?;
    let course = match target {
        Some((kind, id)) => cluster_course(&files, kind, id)
            .with_context(|| format!("failed to build course for {kind} cluster {id}"))?,
        None => total_course(&files, reference).context("failed to build population course")?,
    };

    println!("day\tsize\tinfected");
    for (day, aggregate) in course.iter().enumerate() {
        println!("{day}\t{}\t{}", aggregate.size, aggregate.infected);
    }
    Ok(())
}

fn cluster(dir: &Path, day: usize, kind: ClusterType, id: u32) -> Result<()> {
    let snapshot = load_day(dir, day)?;
    let stats = SnapshotStats::new(&snapshot, kind);
    let Some(feature) = stats.cluster(kind, id) else {
        bail!("no {kind} cluster with id {id} on day {day}");
    };

    println!("cluster {} ({})", feature.id, feature.kind);
    println!("size:     {}", format_count(u64::from(feature.size)));
    println!("infected: {}", format_count(u64::from(feature.infected)));
    println!(
        "infected fraction: {}",
        format_fraction(feature.display_infected_percent())
    );
    println!("location: ({:.4}, {:.4})", feature.lon, feature.lat);
    Ok(())
}

fn scale(dir: &Path, day: usize, min_size: f64, max_size: f64) -> Result<()> {
    let snapshot = load_day(dir, day)?;
    let stops = scale_stops(&snapshot, min_size, max_size, &DEFAULT_ZOOM_LADDER);

    println!("zoom\tsize\trendered");
    for stop in stops {
        println!("{}\t{}\t{:.2}", stop.zoom, stop.size, stop.rendered);
    }
    Ok(())
}

fn circle(center: LatLon, radius_km: f64, points: usize) -> Result<()> {
    let ring = geo::geo_circle(center, radius_km, points);
    println!("{}", serde_json::to_string(&ring)?);
    Ok(())
}

fn facilities(file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read facility file {}", file.display()))?;
    let facilities = parse_facilities(&text)?;

    for facility in &facilities {
        println!(
            "{} ({}): {} passengers today, {:.0}/day over {} days, influence {} km",
            facility.name,
            facility.city,
            format_count(facility.passengers_today),
            facility.daily_average(),
            facility.x_days,
            facility.influence
        );
    }
    println!("{} facilities", facilities.len());
    Ok(())
}

fn population(file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read population file {}", file.display()))?;
    let stats = parse_population(&text)?;

    println!("people: {}", format_count(stats.total_people()));
    for kind in ClusterType::ALL {
        let buckets = stats
            .size_histogram(kind)
            .map(|histogram| histogram.len())
            .unwrap_or(0);
        let density = stats
            .densities
            .get(&kind)
            .map(|value| format!("{value:.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        println!("  {kind:<20} {buckets} size buckets, density {density}");
    }
    Ok(())
}
