//! KML output for the bounding-box builder: one Placemark carrying the
//! box as a Polygon in WGS84, the format consumed by Google Earth.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::core::coords::GeoCoord;
use crate::error::{Error, Result};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// `lon,lat,0` triplets separated by spaces, ring closed on the first
/// corner.
fn coordinates_string(corners: &[GeoCoord]) -> String {
    let mut parts: Vec<String> = corners
        .iter()
        .map(|c| format!("{},{},0", c.lon, c.lat))
        .collect();
    if let Some(first) = corners.first() {
        parts.push(format!("{},{},0", first.lon, first.lat));
    }
    parts.join(" ")
}

fn write_document<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    corners: &[GeoCoord],
) -> std::result::Result<(), quick_xml::Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    writer.write_event(Event::Start(kml))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;
    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;

    writer.write_event(Event::Start(BytesStart::new("name")))?;
    writer.write_event(Event::Text(BytesText::new(name)))?;
    writer.write_event(Event::End(BytesEnd::new("name")))?;

    writer.write_event(Event::Start(BytesStart::new("Polygon")))?;
    writer.write_event(Event::Start(BytesStart::new("outerBoundaryIs")))?;
    writer.write_event(Event::Start(BytesStart::new("LinearRing")))?;
    writer.write_event(Event::Start(BytesStart::new("coordinates")))?;
    writer.write_event(Event::Text(BytesText::new(&coordinates_string(corners))))?;
    writer.write_event(Event::End(BytesEnd::new("coordinates")))?;
    writer.write_event(Event::End(BytesEnd::new("LinearRing")))?;
    writer.write_event(Event::End(BytesEnd::new("outerBoundaryIs")))?;
    writer.write_event(Event::End(BytesEnd::new("Polygon")))?;

    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;
    Ok(())
}

/// Serialize a named bounding-box polygon to a KML string.
pub fn kml_document(name: &str, corners: &[GeoCoord]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_document(&mut writer, name, corners).map_err(|e| Error::Kml(e.to_string()))?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Kml(e.to_string()))
}

/// Write the KML document to disk.
pub fn write_kml(path: &Path, name: &str, corners: &[GeoCoord]) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut writer = Writer::new_with_indent(file, b' ', 2);
    write_document(&mut writer, name, corners).map_err(|e| Error::Kml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoCoord> {
        vec![
            GeoCoord { lat: 1.0, lon: 0.0 },
            GeoCoord { lat: 1.0, lon: 1.0 },
            GeoCoord { lat: 0.0, lon: 1.0 },
            GeoCoord { lat: 0.0, lon: 0.0 },
        ]
    }

    #[test]
    fn ring_is_closed_on_first_corner() {
        let coords = coordinates_string(&square());
        assert_eq!(coords.matches("0,1,0").count(), 2); // opening + closing
        assert_eq!(coords.split(' ').count(), 5);
        assert!(coords.starts_with("0,1,0 "));
        assert!(coords.ends_with(" 0,1,0"));
    }

    #[test]
    fn document_carries_name_and_namespace() {
        let kml = kml_document("Test Area", &square()).unwrap();
        assert!(kml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(kml.contains("xmlns=\"http://www.opengis.net/kml/2.2\""));
        assert!(kml.contains("<name>Test Area</name>"));
        assert!(kml.contains("<coordinates>"));
        assert!(kml.contains("</kml>"));
    }

    #[test]
    fn placemark_name_is_escaped() {
        let kml = kml_document("A <B> & C", &square()).unwrap();
        assert!(kml.contains("A &lt;B&gt; &amp; C"));
    }
}
