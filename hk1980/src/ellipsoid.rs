//! Définitions des ellipsoïdes

/// Paramètres d'un ellipsoïde de référence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,
    /// Aplatissement
    pub f: f64,
}

impl Ellipsoid {
    /// Demi-petit axe (rayon polaire) en mètres
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// Première excentricité au carré
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Première excentricité
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Deuxième excentricité au carré
    pub fn ep2(&self) -> f64 {
        self.e2() / (1.0 - self.e2())
    }
}

/// Ellipsoïde International 1924 (Hayford), utilisé par le Hong Kong 1980 Grid
pub const INTERNATIONAL_1924: Ellipsoid = Ellipsoid {
    a: 6_378_388.0,
    f: 1.0 / 297.0,
};
