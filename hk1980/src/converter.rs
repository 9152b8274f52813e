//! Conversion de géométries `geo` entre la grille HK 1980 et WGS84

use geo::{Coord, Geometry, MapCoords};

use crate::error::ProjectionError;
use crate::grid::hk1980_to_wgs84;

/// Convertisseur grille → géographique pour les géométries `geo`
///
/// Source supportée : EPSG:2326. Cible supportée : EPSG:4326.
pub struct GridConverter {
    source_epsg: u32,
    target_epsg: u32,
}

impl GridConverter {
    /// Crée un nouveau convertisseur après validation du couple EPSG
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self, ProjectionError> {
        if !Self::is_supported(source_epsg, target_epsg) {
            return Err(ProjectionError::Unsupported {
                source_epsg,
                target_epsg,
            });
        }

        Ok(Self {
            source_epsg,
            target_epsg,
        })
    }

    /// Vérifie si l'EPSG source est supporté
    pub fn is_supported_source(epsg: u32) -> bool {
        matches!(epsg, 2326)
    }

    /// Vérifie si l'EPSG cible est supporté
    pub fn is_supported_target(epsg: u32) -> bool {
        matches!(epsg, 4326)
    }

    /// Vérifie si la conversion est supportée
    pub fn is_supported(source: u32, target: u32) -> bool {
        Self::is_supported_source(source) && Self::is_supported_target(target)
    }

    /// Retourne l'EPSG source
    pub fn source_epsg(&self) -> u32 {
        self.source_epsg
    }

    /// Retourne l'EPSG cible
    pub fn target_epsg(&self) -> u32 {
        self.target_epsg
    }

    /// Transforme un point (easting, northing) vers (longitude, latitude)
    pub fn transform_point(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        hk1980_to_wgs84(x, y)
    }

    /// Transforme une géométrie complète, quelle que soit sa variante
    pub fn transform_geometry(&self, geom: &Geometry) -> Result<Geometry, ProjectionError> {
        geom.try_map_coords(|coord| {
            let (lon, lat) = self.transform_point(coord.x, coord.y)?;
            Ok(Coord { x: lon, y: lat })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, LineString, Point};

    #[test]
    fn test_unsupported_pairs() {
        assert!(GridConverter::new(4326, 4326).is_err());
        assert!(GridConverter::new(2326, 3857).is_err());
        assert!(GridConverter::new(2154, 4326).is_err());
    }

    #[test]
    fn test_supported_pair() {
        let converter = GridConverter::new(2326, 4326).unwrap();
        assert_eq!(converter.source_epsg(), 2326);
        assert_eq!(converter.target_epsg(), 4326);
    }

    #[test]
    fn test_transform_point() {
        let converter = GridConverter::new(2326, 4326).unwrap();
        let (lon, lat) = converter.transform_point(833_000.0, 817_000.0).unwrap();

        assert!((114.0..=114.5).contains(&lon), "lon={}", lon);
        assert!((22.2..=22.5).contains(&lat), "lat={}", lat);
    }

    #[test]
    fn test_transform_polygon() {
        let converter = GridConverter::new(2326, 4326).unwrap();

        // Petit carré de 100 m sur la grille
        let poly = polygon![
            (x: 833_000.0, y: 817_000.0),
            (x: 833_100.0, y: 817_000.0),
            (x: 833_100.0, y: 817_100.0),
            (x: 833_000.0, y: 817_100.0),
            (x: 833_000.0, y: 817_000.0),
        ];

        let result = converter
            .transform_geometry(&Geometry::Polygon(poly))
            .unwrap();

        let Geometry::Polygon(converted) = result else {
            panic!("Expected Polygon geometry");
        };

        // L'anneau reste fermé, avec le même nombre de sommets
        assert_eq!(converted.exterior().0.len(), 5);
        assert_eq!(converted.exterior().0.first(), converted.exterior().0.last());

        for coord in &converted.exterior().0 {
            assert!((114.0..=114.5).contains(&coord.x), "lon={}", coord.x);
            assert!((22.2..=22.5).contains(&coord.y), "lat={}", coord.y);
        }
    }

    #[test]
    fn test_transform_multilinestring_and_point() {
        let converter = GridConverter::new(2326, 4326).unwrap();

        let point = Geometry::Point(Point::new(836_694.05, 819_069.8));
        let Geometry::Point(p) = converter.transform_geometry(&point).unwrap() else {
            panic!("Expected Point geometry");
        };
        assert!((p.x() - 114.178556).abs() < 1e-6);
        assert!((p.y() - 22.312133).abs() < 1e-6);

        let line = Geometry::LineString(LineString::from(vec![
            (820_000.0, 810_000.0),
            (840_000.0, 830_000.0),
        ]));
        let Geometry::LineString(ls) = converter.transform_geometry(&line).unwrap() else {
            panic!("Expected LineString geometry");
        };
        assert_eq!(ls.0.len(), 2);
    }

    #[test]
    fn test_transform_geometry_propagates_domain_error() {
        let converter = GridConverter::new(2326, 4326).unwrap();

        let line = Geometry::LineString(LineString::from(vec![
            (833_000.0, 817_000.0),
            (f64::NAN, 817_000.0),
        ]));

        assert!(converter.transform_geometry(&line).is_err());
    }
}
