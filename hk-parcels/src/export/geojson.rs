//! Export vers GeoJSON avec geozero (streaming)
//!
//! L'enveloppe du FeatureCollection est écrite à la main pour porter les
//! membres `name` et `crs` ; les géométries sont sérialisées feature par
//! feature sans matérialiser le document complet en mémoire.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;

use crate::parcels::Parcel;

/// Exporte des parcelles en GeoJSON (FeatureCollection avec tag CRS)
pub fn export_collection(
    parcels: &[Parcel],
    name: Option<&str>,
    epsg: u32,
    output_path: &Path,
) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    // Header FeatureCollection avec name et CRS
    write!(writer, r#"{{"type":"FeatureCollection""#)?;
    if let Some(name) = name {
        write!(writer, r#","name":"#)?;
        serde_json::to_writer(&mut writer, name)?;
    }
    write!(
        writer,
        r#","crs":{{"type":"name","properties":{{"name":"urn:ogc:def:crs:EPSG::{}"}}}},"features":["#,
        epsg
    )?;

    // Écrire chaque feature
    for (i, parcel) in parcels.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write_parcel(&mut writer, parcel)?;
    }

    // Footer
    write!(writer, "]}}")?;
    writer.flush()?;

    Ok(())
}

/// Écrit une parcelle en GeoJSON
fn write_parcel<W: Write>(writer: &mut W, parcel: &Parcel) -> Result<()> {
    write!(writer, r#"{{"type":"Feature""#)?;

    if let Some(id) = &parcel.id {
        write!(writer, r#","id":"#)?;
        serde_json::to_writer(&mut *writer, id)?;
    }

    // Géométrie via geozero
    write!(writer, r#","geometry":"#)?;
    let mut geom_buf = Vec::new();
    let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
    parcel.geometry.process_geom(&mut geom_writer)?;
    writer.write_all(&geom_buf)?;

    // Properties
    write!(writer, r#","properties":"#)?;
    match &parcel.properties {
        Some(properties) => serde_json::to_writer(&mut *writer, properties)?,
        None => write!(writer, "null")?,
    }
    write!(writer, "}}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, Point};
    use std::io::Cursor;

    fn parcel_with_properties() -> Parcel {
        let mut properties = geojson::JsonObject::new();
        properties.insert("PRN".to_string(), serde_json::json!("12345"));

        Parcel {
            id: Some(geojson::feature::Id::String("lot_1".to_string())),
            geometry: Geometry::Point(Point::new(114.14, 22.29)),
            properties: Some(properties),
        }
    }

    #[test]
    fn test_write_parcel() {
        let mut buffer = Cursor::new(Vec::new());
        write_parcel(&mut buffer, &parcel_with_properties()).unwrap();

        let json = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(json.contains(r#""type":"Feature""#));
        assert!(json.contains(r#""id":"lot_1""#));
        assert!(json.contains(r#""PRN":"12345""#));
        assert!(json.contains("coordinates"));
    }

    #[test]
    fn test_write_parcel_without_id_or_properties() {
        let parcel = Parcel {
            id: None,
            geometry: Geometry::Point(Point::new(114.14, 22.29)),
            properties: None,
        };

        let mut buffer = Cursor::new(Vec::new());
        write_parcel(&mut buffer, &parcel).unwrap();

        let json = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(!json.contains(r#""id""#));
        assert!(json.contains(r#""properties":null"#));
    }

    #[test]
    fn test_export_collection() {
        let parcels = vec![parcel_with_properties()];

        let output_path = std::env::temp_dir().join("hk_parcels_test_export.geojson");
        export_collection(&parcels, Some("LOT"), 4326, &output_path).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains(r#""type":"FeatureCollection""#));
        assert!(content.contains(r#""name":"LOT""#));
        assert!(content.contains("EPSG::4326"));
        assert!(content.contains(r#""id":"lot_1""#));

        // Le document produit doit rester un GeoJSON lisible
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["features"].as_array().unwrap().len(), 1);

        std::fs::remove_file(output_path).ok();
    }
}
