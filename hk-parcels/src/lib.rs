//! # hk-parcels
//!
//! Conversion des parcelles cadastrales de Hong Kong (EPSG:2326) vers WGS84.
//!
//! ## Features
//!
//! - Chargement GeoJSON avec détection du CRS source
//! - Échantillonnage déterministe (une feature sur N, plafonné)
//! - Reprojection parallèle via `hk1980` (ou PROJ avec le feature `datum`)
//! - Export GeoJSON streaming avec tag CRS
//! - Rapport de conversion détaillé
//!
//! ## Usage CLI
//!
//! ```bash
//! # Convertir un lot de parcelles vers WGS84
//! hk-parcels convert --input ./lot.json --output ./lot_wgs84.geojson
//!
//! # Ajuster l'échantillonnage
//! hk-parcels convert -i ./lot.json -o ./out.geojson --stride 10 --max-features 50000
//!
//! # Inspecter un fichier source
//! hk-parcels inspect --input ./lot.json
//! ```

pub mod cli;
pub mod convert;
pub mod export;
pub mod parcels;
pub mod report;
pub mod reproject;

pub use report::{ConvertReport, ConvertStatus};
pub use reproject::ParcelReprojector;
