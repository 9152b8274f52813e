//! Projection Transverse Mercator inverse
//!
//! Formulation en séries (Snyder, "Map Projections - A Working Manual"):
//! latitude au pied de la méridienne puis corrections en puissances de D.
//! La troncature des séries reste sous 0,1 mm sur une emprise de quelques
//! dizaines de kilomètres autour de l'origine de la grille.

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjectionError;
use crate::Geographic;

/// Paramètres d'une grille Transverse Mercator
#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    /// Ellipsoïde de référence
    pub ellipsoid: Ellipsoid,
    /// Latitude d'origine (radians)
    pub lat0: f64,
    /// Méridien central (radians)
    pub lon0: f64,
    /// Facteur d'échelle au méridien central
    pub k0: f64,
    /// False easting (mètres)
    pub x0: f64,
    /// False northing (mètres)
    pub y0: f64,
}

impl TransverseMercator {
    /// Longueur d'arc de méridien depuis l'équateur (série directe)
    pub(crate) fn meridional_arc(&self, lat: f64) -> f64 {
        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2();

        a * ((1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0) * lat
            - (3.0 * e2 / 8.0 + 3.0 * e2.powi(2) / 32.0 + 45.0 * e2.powi(3) / 1024.0)
                * (2.0 * lat).sin()
            + (15.0 * e2.powi(2) / 256.0 + 45.0 * e2.powi(3) / 1024.0) * (4.0 * lat).sin()
            - (35.0 * e2.powi(3) / 3072.0) * (6.0 * lat).sin())
    }

    /// Latitude au pied de la méridienne (inversion de la série d'arc)
    pub(crate) fn footpoint_latitude(&self, m: f64) -> f64 {
        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2();

        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));

        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

        mu + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin()
    }

    /// Projection inverse : coordonnées grille → géographiques (radians)
    ///
    /// Retourne une erreur typée pour les entrées non finies ou si la
    /// coordonnée sort du domaine où les séries ont un sens.
    pub fn inverse(&self, easting: f64, northing: f64) -> Result<Geographic, ProjectionError> {
        if !easting.is_finite() || !northing.is_finite() {
            return Err(ProjectionError::NonFiniteInput { easting, northing });
        }

        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2();
        let ep2 = self.ellipsoid.ep2();

        // Coordonnées réduites
        let x = easting - self.x0;
        let y = northing - self.y0;

        // Arc de méridien au point courant. Le northing de la grille est
        // référencé à l'arc de la latitude d'origine (nul pour une grille
        // UTM dont l'origine est l'équateur).
        let m = self.meridional_arc(self.lat0) + y / self.k0;

        let phi1 = self.footpoint_latitude(m);

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let n1 = a / (1.0 - e2 * sin_phi1.powi(2)).sqrt();
        let t1 = tan_phi1.powi(2);
        let c1 = ep2 * cos_phi1.powi(2);
        let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1.powi(2)).powf(1.5);
        let d = x / (n1 * self.k0);

        // Latitude
        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d.powi(2) / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4)
                        / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2) - 252.0 * ep2
                        - 3.0 * c1.powi(2))
                        * d.powi(6)
                        / 720.0);

        // Longitude
        let lon = self.lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2
                    + 24.0 * t1.powi(2))
                    * d.powi(5)
                    / 120.0)
                / cos_phi1;

        if !lat.is_finite() || !lon.is_finite() || lat.abs() > std::f64::consts::FRAC_PI_2 {
            return Err(ProjectionError::OutOfDomain { easting, northing });
        }

        Ok(Geographic::new(lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::HK1980_GRID;

    #[test]
    fn test_meridional_arc_at_equator() {
        assert_eq!(HK1980_GRID.meridional_arc(0.0), 0.0);
    }

    #[test]
    fn test_meridional_arc_monotonic() {
        let mut previous = 0.0;
        for deg in 1..=80 {
            let arc = HK1980_GRID.meridional_arc((deg as f64).to_radians());
            assert!(arc > previous, "arc should grow with latitude, deg={}", deg);
            previous = arc;
        }
    }

    #[test]
    fn test_footpoint_inverts_meridional_arc() {
        // Les deux séries sont inverses l'une de l'autre ; l'écart résiduel
        // est la troncature en e1⁵ (~1e-14 rad).
        for deg in [0.0_f64, 5.0, 22.312133, 45.0, 60.0, 80.0] {
            let lat = deg.to_radians();
            let arc = HK1980_GRID.meridional_arc(lat);
            let back = HK1980_GRID.footpoint_latitude(arc);
            assert!(
                (back - lat).abs() < 1e-10,
                "footpoint mismatch at {}°: {}",
                deg,
                (back - lat).abs()
            );
        }
    }

    #[test]
    fn test_inverse_rejects_non_finite() {
        assert!(HK1980_GRID.inverse(f64::NAN, 819_069.8).is_err());
        assert!(HK1980_GRID.inverse(836_694.05, f64::INFINITY).is_err());
        assert!(HK1980_GRID.inverse(f64::NEG_INFINITY, f64::NAN).is_err());
    }

    #[test]
    fn test_inverse_rejects_out_of_domain() {
        // Northing aberrant : l'arc de méridien dépasse le quart de méridien
        assert!(HK1980_GRID.inverse(836_694.05, 1.0e9).is_err());
        assert!(HK1980_GRID.inverse(836_694.05, -1.0e9).is_err());
        // Easting aberrant : les termes en D divergent
        assert!(HK1980_GRID.inverse(1.0e12, 819_069.8).is_err());
    }
}
