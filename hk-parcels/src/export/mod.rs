//! Export des parcelles converties

pub mod geojson;
