//! Rapport de conversion avec graceful degradation
//!
//! Collecte les compteurs de la conversion et produit un résumé console
//! ainsi qu'un export JSON optionnel.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConvertStatus {
    /// Conversion réussie sans erreur
    Success,
    /// Conversion réussie avec des erreurs non-fatales
    PartialSuccess,
    /// Conversion échouée (aucune parcelle produite)
    Failed,
}

/// Emprise des coordonnées converties, en degrés
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Emprise vide, prête à être étendue
    pub fn empty() -> Self {
        Self {
            min_lon: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
        }
    }

    /// Étend l'emprise pour couvrir le point donné
    pub fn extend(&mut self, lon: f64, lat: f64) {
        self.min_lon = self.min_lon.min(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lon = self.max_lon.max(lon);
        self.max_lat = self.max_lat.max(lat);
    }

    /// Vraie si aucun point n'a été ajouté
    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon
    }
}

/// Rapport complet d'une conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    /// EPSG source
    pub source_epsg: u32,
    /// EPSG cible
    pub target_epsg: u32,

    /// Features lues dans le fichier source
    pub features_loaded: usize,
    /// Features ignorées au chargement (sans géométrie exploitable)
    pub features_skipped: usize,
    /// Features retenues par l'échantillonnage
    pub features_sampled: usize,
    /// Features converties avec succès
    pub features_converted: usize,
    /// Features abandonnées sur erreur de conversion
    pub features_failed: usize,
    /// Features converties hors de l'enveloppe de Hong Kong
    pub features_out_of_bounds: usize,

    /// Durée totale de la conversion
    pub duration_secs: f64,
    /// Statut global
    pub status: ConvertStatus,
    /// Emprise des sorties, si au moins une parcelle a été convertie
    pub bounds: Option<Bounds>,
}

impl ConvertReport {
    /// Crée un nouveau rapport pour un couple EPSG
    pub fn new(source_epsg: u32, target_epsg: u32) -> Self {
        Self {
            source_epsg,
            target_epsg,
            features_loaded: 0,
            features_skipped: 0,
            features_sampled: 0,
            features_converted: 0,
            features_failed: 0,
            features_out_of_bounds: 0,
            duration_secs: 0.0,
            status: ConvertStatus::Success,
            bounds: None,
        }
    }

    /// Définit la durée de la conversion
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final à partir des compteurs
    pub fn finalize(&mut self) {
        self.status = if self.features_converted == 0 && self.features_sampled > 0 {
            ConvertStatus::Failed
        } else if self.features_failed > 0 {
            ConvertStatus::PartialSuccess
        } else {
            ConvertStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!(
            "CONVERSION REPORT - EPSG:{} -> EPSG:{}",
            self.source_epsg, self.target_epsg
        );
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Features: {} loaded, {} sampled, {} converted, {} failed",
            self.features_loaded,
            self.features_sampled,
            self.features_converted,
            self.features_failed
        );
        if self.features_skipped > 0 {
            println!("Skipped at load (no geometry): {}", self.features_skipped);
        }
        if self.features_out_of_bounds > 0 {
            println!(
                "Outside Hong Kong bounds: {} (check source data)",
                self.features_out_of_bounds
            );
        }

        if let Some(bounds) = &self.bounds {
            println!(
                "Bounds: lon {:.6}..{:.6}, lat {:.6}..{:.6}",
                bounds.min_lon, bounds.max_lon, bounds.min_lat, bounds.max_lat
            );
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour les logs
    pub fn summary(&self) -> String {
        format!(
            "EPSG:{} -> EPSG:{}: {} converted, {} failed, {} out of bounds",
            self.source_epsg,
            self.target_epsg,
            self.features_converted,
            self.features_failed,
            self.features_out_of_bounds
        )
    }
}
