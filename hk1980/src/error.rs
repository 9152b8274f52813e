//! Types d'erreurs pour le crate hk1980

use thiserror::Error;

/// Erreurs pouvant survenir lors d'une conversion de coordonnées
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    /// Entrée non finie (NaN ou infini)
    #[error("non-finite input coordinate: easting={easting}, northing={northing}")]
    NonFiniteInput { easting: f64, northing: f64 },

    /// Coordonnée trop éloignée du domaine de validité de la grille
    #[error("coordinate outside projection domain: easting={easting}, northing={northing}")]
    OutOfDomain { easting: f64, northing: f64 },

    /// Couple source/cible non supporté
    #[error("unsupported reprojection EPSG:{source_epsg} -> EPSG:{target_epsg}")]
    Unsupported { source_epsg: u32, target_epsg: u32 },
}
