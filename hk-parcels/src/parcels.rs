//! Chargement et échantillonnage des collections de parcelles
//!
//! Le fichier source est un FeatureCollection GeoJSON dont les coordonnées
//! sont exprimées sur la grille EPSG:2326 (le membre `crs`, non standard
//! depuis RFC 7946, est tout de même porté par les exports du Lands
//! Department et sert ici à détecter la source).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{FeatureCollection, GeoJson};
use tracing::warn;

/// EPSG présumé quand le fichier ne porte pas de membre `crs`
const DEFAULT_EPSG: u32 = 2326;

/// Une parcelle avec sa géométrie et ses attributs
#[derive(Debug, Clone)]
pub struct Parcel {
    /// Identifiant de la feature source, s'il existe
    pub id: Option<geojson::feature::Id>,

    /// Géométrie en coordonnées de la grille source
    pub geometry: geo::Geometry,

    /// Attributs de la feature (JSON arbitraire)
    pub properties: Option<geojson::JsonObject>,
}

/// Collection de parcelles chargée depuis un GeoJSON
#[derive(Debug)]
pub struct ParcelCollection {
    /// Nom de la collection (membre `name` du FeatureCollection)
    pub name: Option<String>,

    /// EPSG source détecté depuis le membre `crs`
    pub epsg: u32,

    /// Parcelles avec géométrie exploitable
    pub parcels: Vec<Parcel>,

    /// Features ignorées (sans géométrie ou géométrie non convertible)
    pub skipped: usize,
}

/// Charge un FeatureCollection GeoJSON depuis le disque
pub fn load(path: &Path) -> Result<ParcelCollection> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let reader = BufReader::new(file);

    let geojson: GeoJson = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid GeoJSON in {}", path.display()))?;
    let collection = FeatureCollection::try_from(geojson)
        .with_context(|| format!("Expected a FeatureCollection in {}", path.display()))?;

    let name = collection
        .foreign_members
        .as_ref()
        .and_then(|m| m.get("name"))
        .and_then(|v| v.as_str())
        .map(String::from);

    let epsg = collection
        .foreign_members
        .as_ref()
        .and_then(|m| m.get("crs"))
        .and_then(crs_epsg)
        .unwrap_or(DEFAULT_EPSG);

    let mut parcels = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for feature in collection.features {
        let Some(geometry) = feature.geometry else {
            skipped += 1;
            continue;
        };

        match geo::Geometry::try_from(geometry) {
            Ok(geom) => parcels.push(Parcel {
                id: feature.id,
                geometry: geom,
                properties: feature.properties,
            }),
            Err(e) => {
                warn!(id = ?feature.id, error = %e, "Unsupported geometry, feature skipped");
                skipped += 1;
            }
        }
    }

    Ok(ParcelCollection {
        name,
        epsg,
        parcels,
        skipped,
    })
}

/// Extrait le code EPSG d'un membre `crs` GeoJSON.
///
/// Accepte les formes `EPSG:2326` et `urn:ogc:def:crs:EPSG::2326`.
fn crs_epsg(crs: &serde_json::Value) -> Option<u32> {
    let name = crs.pointer("/properties/name")?.as_str()?;
    name.rsplit(':')
        .find(|part| !part.is_empty())?
        .parse()
        .ok()
}

/// Échantillonnage déterministe : une parcelle sur `stride`, plafonné à `max`
pub fn sample(parcels: &[Parcel], stride: usize, max: usize) -> Vec<Parcel> {
    parcels
        .iter()
        .step_by(stride.max(1))
        .take(max)
        .cloned()
        .collect()
}
