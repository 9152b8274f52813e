//! Conversion parallèle des parcelles échantillonnées
//!
//! Chaque conversion est indépendante : le lot est distribué sur le pool
//! rayon sans verrou, seuls les compteurs de progression sont partagés.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::{CoordsIter, Geometry};
use rayon::prelude::*;
use tracing::warn;

use crate::parcels::Parcel;
use crate::report::Bounds;
use crate::reproject::ParcelReprojector;

/// Enveloppe plausible de Hong Kong en degrés (validation de sortie).
/// Légèrement plus large que l'emprise administrative pour ne pas
/// signaler les franges du territoire.
pub const HK_LON_RANGE: RangeInclusive<f64> = 113.8..=114.6;
pub const HK_LAT_RANGE: RangeInclusive<f64> = 22.1..=22.7;

/// Résultat d'une conversion de lot
pub struct ConvertOutcome {
    /// Parcelles converties, dans l'ordre du lot d'entrée
    pub converted: Vec<Parcel>,
    /// Parcelles abandonnées sur erreur de conversion
    pub failed: usize,
    /// Parcelles converties mais hors de l'enveloppe de Hong Kong
    pub out_of_bounds: usize,
}

/// Convertit un lot de parcelles en parallèle.
///
/// `on_progress` est invoqué toutes les `progress_every` conversions avec
/// le nombre de parcelles traitées et le total du lot. Les échecs sont
/// signalés en warning et la parcelle est abandonnée ; les coordonnées
/// sorties de l'enveloppe de Hong Kong sont comptées comme des anomalies
/// de données amont sans interrompre le lot.
pub fn convert_parcels(
    parcels: &[Parcel],
    reprojector: &ParcelReprojector,
    progress_every: usize,
    on_progress: &(dyn Fn(usize, usize) + Sync),
) -> ConvertOutcome {
    let total = parcels.len();
    let progress_every = progress_every.max(1);

    let done = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let out_of_bounds = AtomicUsize::new(0);

    let converted: Vec<Parcel> = parcels
        .par_iter()
        .filter_map(|parcel| {
            let result = reprojector.transform_geometry(&parcel.geometry);

            let processed = done.fetch_add(1, Ordering::Relaxed) + 1;
            if processed % progress_every == 0 {
                on_progress(processed, total);
            }

            let geometry = match result {
                Ok(geometry) => geometry,
                Err(e) => {
                    warn!(id = ?parcel.id, error = %e, "Failed to reproject parcel");
                    failed.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            };

            if !geometry_in_hk_bounds(&geometry) {
                warn!(id = ?parcel.id, "Converted parcel outside Hong Kong bounds");
                out_of_bounds.fetch_add(1, Ordering::Relaxed);
            }

            Some(Parcel {
                id: parcel.id.clone(),
                geometry,
                properties: parcel.properties.clone(),
            })
        })
        .collect();

    ConvertOutcome {
        converted,
        failed: failed.load(Ordering::Relaxed),
        out_of_bounds: out_of_bounds.load(Ordering::Relaxed),
    }
}

/// Vérifie que tous les sommets tombent dans l'enveloppe de Hong Kong
fn geometry_in_hk_bounds(geometry: &Geometry) -> bool {
    geometry
        .coords_iter()
        .all(|c| HK_LON_RANGE.contains(&c.x) && HK_LAT_RANGE.contains(&c.y))
}

/// Emprise des parcelles converties, en degrés
pub fn output_bounds(parcels: &[Parcel]) -> Option<Bounds> {
    let mut bounds = Bounds::empty();
    for parcel in parcels {
        for coord in parcel.geometry.coords_iter() {
            bounds.extend(coord.x, coord.y);
        }
    }

    if bounds.is_empty() {
        None
    } else {
        Some(bounds)
    }
}
