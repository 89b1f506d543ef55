//! Startup loading of the static inputs: world geometry and the bilingual
//! name table. Failures here are fatal; the game cannot run without its
//! reference data.

use crate::{GeoIndex, NameResolver, Result};
use geojson::{FeatureCollection, GeoJson};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Load the world GeoJSON and build the centroid index.
pub fn load_geo_index(path: impl AsRef<Path>) -> Result<GeoIndex> {
    let path = path.as_ref();
    info!("Loading country geometry from {:?}", path);

    let contents = fs::read_to_string(path)?;
    let geojson: GeoJson = contents.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;
    let index = GeoIndex::from_feature_collection(collection)?;

    info!("Indexed {} countries", index.len());
    Ok(index)
}

/// Load the Spanish -> English name table and build the resolver.
pub fn load_name_table(path: impl AsRef<Path>) -> Result<NameResolver> {
    let path = path.as_ref();
    info!("Loading name table from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let pairs: HashMap<String, String> = serde_json::from_reader(reader)?;
    let resolver = NameResolver::from_pairs(pairs);

    info!("Loaded {} country names", resolver.len());
    Ok(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Language;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_geo_index() {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"Chile"},
             "geometry":{"type":"Polygon","coordinates":
               [[[-72.0,-36.0],[-70.0,-36.0],[-70.0,-34.0],[-72.0,-34.0],[-72.0,-36.0]]]}},
            {"type":"Feature","properties":{},
             "geometry":{"type":"Point","coordinates":[0.0,0.0]}}
        ]}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let index = load_geo_index(file.path()).unwrap();
        assert_eq!(index.all_ids(), &["Chile".to_string()]);
        let c = index.centroid("Chile").unwrap();
        assert!((c.lat - (-35.0)).abs() < 1e-9);
        assert!((c.lon - (-71.0)).abs() < 1e-9);
    }

    #[test]
    fn test_load_geo_index_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not geojson at all").unwrap();
        assert!(load_geo_index(file.path()).is_err());
    }

    #[test]
    fn test_load_name_table() {
        let json = r#"{"Japón": "Japan", "Alemania": "Germany"}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let resolver = load_name_table(file.path()).unwrap();
        assert_eq!(resolver.len(), 2);
        let (id, language) = resolver.resolve("japon").unwrap();
        assert_eq!(id, "Japan");
        assert_eq!(language, Language::Spanish);
    }

    #[test]
    fn test_load_name_table_missing_file() {
        assert!(load_name_table("does/not/exist.json").is_err());
    }
}
