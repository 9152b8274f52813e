//! Définition et implémentation des commandes CLI
//!
//! CLI simplifiée:
//! - `convert`: GeoJSON EPSG:2326 → GeoJSON WGS84 (échantillonné)
//! - `inspect`: statistiques d'un fichier source + conversion témoin

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use geo::CoordsIter;
use tracing::{info, warn};

use crate::convert;
use crate::export;
use crate::parcels;
use crate::report::{ConvertReport, ConvertStatus};
use crate::reproject::ParcelReprojector;

/// EPSG cible de l'export (WGS84)
const TARGET_EPSG: u32 = 4326;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a parcel GeoJSON from EPSG:2326 to WGS84
    Convert(ConvertArgs),

    /// Inspect a parcel GeoJSON (feature count, CRS, sample conversion)
    Inspect {
        /// Path to the source GeoJSON file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the source GeoJSON file (EPSG:2326)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output GeoJSON file (WGS84)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Keep every Nth feature
    #[arg(long, default_value_t = 38)]
    pub stride: usize,

    /// Maximum number of sampled features
    #[arg(long, default_value_t = 10_000)]
    pub max_features: usize,

    /// Log progress every N converted features
    #[arg(long, default_value_t = 2_000)]
    pub progress_every: usize,

    /// Maximum number of worker threads (default: all cores)
    #[arg(long, alias = "threads")]
    pub jobs: Option<usize>,

    /// Write a JSON conversion report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Exécute la commande convert
pub fn cmd_convert(args: &ConvertArgs) -> Result<()> {
    if args.stride == 0 {
        anyhow::bail!("--stride must be >= 1");
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure worker pool")?;
    }

    let started = std::time::Instant::now();

    let collection = parcels::load(&args.input)?;
    info!(
        features = collection.parcels.len(),
        skipped = collection.skipped,
        epsg = collection.epsg,
        "Collection loaded"
    );

    let reprojector = ParcelReprojector::new(collection.epsg, TARGET_EPSG).with_context(|| {
        format!(
            "Cannot reproject EPSG:{} to EPSG:{}",
            collection.epsg, TARGET_EPSG
        )
    })?;
    info!(reprojector = reprojector.description(), "Reprojector ready");

    let sampled = parcels::sample(&collection.parcels, args.stride, args.max_features);
    info!(
        sampled = sampled.len(),
        stride = args.stride,
        max = args.max_features,
        "Sampling"
    );

    let mut report = ConvertReport::new(collection.epsg, TARGET_EPSG);
    report.features_loaded = collection.parcels.len();
    report.features_skipped = collection.skipped;
    report.features_sampled = sampled.len();

    let outcome = convert::convert_parcels(
        &sampled,
        &reprojector,
        args.progress_every,
        &|processed, total| {
            info!(processed = processed, total = total, "Conversion progress");
        },
    );

    report.features_converted = outcome.converted.len();
    report.features_failed = outcome.failed;
    report.features_out_of_bounds = outcome.out_of_bounds;
    report.bounds = convert::output_bounds(&outcome.converted);

    export::geojson::export_collection(
        &outcome.converted,
        collection.name.as_deref(),
        TARGET_EPSG,
        &args.output,
    )?;
    info!(output = %args.output.display(), features = outcome.converted.len(), "Export complete");

    report.set_duration(started.elapsed());
    report.finalize();
    report.display();

    if let Some(report_path) = &args.report {
        report.save_to_file(report_path)?;
        info!(path = %report_path.display(), "Report saved");
    }

    if report.status == ConvertStatus::Failed {
        anyhow::bail!("Conversion failed: no feature could be converted");
    }

    Ok(())
}

/// Exécute la commande inspect
pub fn cmd_inspect(input: &Path) -> Result<()> {
    let collection = parcels::load(input)?;

    println!("=== {} ===", input.display());
    if let Some(name) = &collection.name {
        println!("Name: {}", name);
    }
    println!("Source EPSG: {}", collection.epsg);
    println!("Features: {}", collection.parcels.len());
    if collection.skipped > 0 {
        println!("Skipped (no geometry): {}", collection.skipped);
    }

    let mut by_kind: HashMap<&'static str, usize> = HashMap::new();
    for parcel in &collection.parcels {
        *by_kind.entry(geometry_kind(&parcel.geometry)).or_default() += 1;
    }
    let mut kinds: Vec<_> = by_kind.into_iter().collect();
    kinds.sort();
    for (kind, count) in kinds {
        println!("  {}: {}", kind, count);
    }

    // Conversion témoin sur la première coordonnée
    if let Some(coord) = collection
        .parcels
        .first()
        .and_then(|p| p.geometry.coords_iter().next())
    {
        match hk1980::hk1980_to_wgs84(coord.x, coord.y) {
            Ok((lon, lat)) => {
                println!("\nTest conversion:");
                println!("  EPSG:2326  E={:.2} N={:.2}", coord.x, coord.y);
                println!("  WGS84      lon={:.6} lat={:.6}", lon, lat);
            }
            Err(e) => warn!(error = %e, "Test conversion failed"),
        }
    }

    Ok(())
}

fn geometry_kind(geometry: &geo::Geometry) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::Line(_) | geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::Polygon(_) | geo::Geometry::Rect(_) | geo::Geometry::Triangle(_) => {
            "Polygon"
        }
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, Point};

    #[test]
    fn test_geometry_kind() {
        assert_eq!(
            geometry_kind(&Geometry::Point(Point::new(0.0, 0.0))),
            "Point"
        );
        assert_eq!(
            geometry_kind(&Geometry::MultiPolygon(geo::MultiPolygon::new(vec![]))),
            "MultiPolygon"
        );
    }
}
