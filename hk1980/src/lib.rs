//! # hk1980
//!
//! Conversion de la grille Hong Kong 1980 (EPSG:2326) vers WGS84.
//!
//! ## Features
//!
//! - Projection Transverse Mercator inverse en Rust pur (séries de Snyder)
//! - Ellipsoïde International 1924 et paramètres de grille figés
//! - Erreurs typées pour les entrées hors domaine (pas de NaN silencieux)
//! - Types `geo` pour l'interopérabilité avec l'écosystème Rust géospatial
//!
//! ## Usage
//!
//! ```rust
//! use hk1980::hk1980_to_wgs84;
//!
//! // Origine de la grille
//! let (lon, lat) = hk1980_to_wgs84(836_694.05, 819_069.8)?;
//! assert!((lon - 114.178556).abs() < 1e-6);
//! assert!((lat - 22.312133).abs() < 1e-6);
//! # Ok::<(), hk1980::ProjectionError>(())
//! ```
//!
//! La conversion n'applique pas de transformation de datum : les
//! coordonnées géodésiques sur l'ellipsoïde International 1924 sont
//! restituées telles quelles en degrés. Le décalage résiduel vers WGS84
//! reste de l'ordre de la centaine de mètres sur Hong Kong.

pub mod converter;
pub mod ellipsoid;
pub mod error;
pub mod grid;
pub mod tmerc;

pub use converter::GridConverter;
pub use ellipsoid::{Ellipsoid, INTERNATIONAL_1924};
pub use error::ProjectionError;
pub use grid::{hk1980_to_wgs84, HK1980_GRID};
pub use tmerc::TransverseMercator;

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés, longitude d'abord (ordre (x, y) de GeoJSON)
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }

    /// Crée depuis des degrés
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: lon_deg.to_radians(),
            lat: lat_deg.to_radians(),
        }
    }
}
