//! Choix du chemin de reprojection : séries pures Rust ou PROJ
//!
//! Le chemin pur Rust (`hk1980`) n'applique pas de transformation de
//! datum ; le décalage International 1924 → WGS84 reste de l'ordre de la
//! centaine de mètres sur Hong Kong. Compiler avec `--features datum`
//! pour passer par PROJ et la transformation à 7 paramètres.

use anyhow::Result;
use geo::Geometry;
use hk1980::GridConverter;

#[cfg(feature = "datum")]
use anyhow::Context;

/// Reprojecteur de parcelles
pub enum ParcelReprojector {
    /// Séries pures Rust (sans datum)
    Lite(GridConverter),
    /// PROJ (datum 7 paramètres)
    #[cfg(feature = "datum")]
    Proj(ProjReprojector),
    /// Pas de reprojection (source == cible)
    Identity,
}

impl ParcelReprojector {
    /// Crée un nouveau reprojecteur pour le couple EPSG donné
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self> {
        if source_epsg == target_epsg {
            return Ok(Self::Identity);
        }

        // Avec le feature `datum`, PROJ est essayé en premier : il porte
        // la transformation de datum complète vers WGS84.
        #[cfg(feature = "datum")]
        match ProjReprojector::new(source_epsg, target_epsg) {
            Ok(proj) => return Ok(Self::Proj(proj)),
            Err(e) => {
                tracing::warn!(error = %e, "PROJ unavailable, falling back to pure-Rust series")
            }
        }

        let lite = GridConverter::new(source_epsg, target_epsg)?;
        Ok(Self::Lite(lite))
    }

    /// Transforme une géométrie
    pub fn transform_geometry(&self, geom: &Geometry) -> Result<Geometry> {
        match self {
            Self::Identity => Ok(geom.clone()),
            Self::Lite(lite) => Ok(lite.transform_geometry(geom)?),
            #[cfg(feature = "datum")]
            Self::Proj(proj) => proj.transform_geometry(geom),
        }
    }

    /// Description du chemin de reprojection utilisé
    pub fn description(&self) -> &'static str {
        match self {
            Self::Identity => "identity (pas de reprojection)",
            Self::Lite(_) => "hk1980 (séries pures Rust, sans datum)",
            #[cfg(feature = "datum")]
            Self::Proj(_) => "proj (datum 7 paramètres)",
        }
    }
}

/// Reprojection via PROJ, datum inclus
#[cfg(feature = "datum")]
pub struct ProjReprojector {
    proj: proj::Proj,
}

#[cfg(feature = "datum")]
impl ProjReprojector {
    /// Crée une transformation PROJ entre deux EPSG
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self> {
        let source = format!("EPSG:{}", source_epsg);
        let target = format!("EPSG:{}", target_epsg);

        let proj = proj::Proj::new_known_crs(&source, &target, None).with_context(|| {
            format!("Failed to create projection from {} to {}", source, target)
        })?;

        Ok(Self { proj })
    }

    /// Transforme une géométrie
    pub fn transform_geometry(&self, geom: &Geometry) -> Result<Geometry> {
        use geo::MapCoords;

        geom.try_map_coords(|coord| {
            let (x, y) = self
                .proj
                .convert((coord.x, coord.y))
                .context("Coordinate transformation failed")?;
            Ok(geo::Coord { x, y })
        })
    }
}
