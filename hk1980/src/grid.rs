//! Grille Hong Kong 1980 (EPSG:2326)
//!
//! Transverse Mercator sur l'ellipsoïde International 1924, origine
//! géodésique à 22°18'43.68" N, 114°10'42.80" E.
//! Référence: <https://epsg.io/2326>

use std::f64::consts::PI;

use crate::ellipsoid::INTERNATIONAL_1924;
use crate::error::ProjectionError;
use crate::tmerc::TransverseMercator;

/// Latitude d'origine, en degrés
const LAT0_DEG: f64 = 22.312133333333;
/// Méridien central, en degrés
const LON0_DEG: f64 = 114.178555555556;

/// Définition de la grille Hong Kong 1980 (EPSG:2326)
pub const HK1980_GRID: TransverseMercator = TransverseMercator {
    ellipsoid: INTERNATIONAL_1924,
    lat0: LAT0_DEG * PI / 180.0,
    lon0: LON0_DEG * PI / 180.0,
    k0: 1.0,
    x0: 836_694.05,
    y0: 819_069.8,
};

/// Convertit une coordonnée EPSG:2326 (mètres) vers WGS84 (degrés décimaux).
///
/// Retourne `(longitude, latitude)` — l'ordre (x, y) de GeoJSON.
pub fn hk1980_to_wgs84(easting: f64, northing: f64) -> Result<(f64, f64), ProjectionError> {
    HK1980_GRID
        .inverse(easting, northing)
        .map(|geo| geo.to_degrees())
}
