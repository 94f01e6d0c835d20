//! Food-keyed JSON document: serialization, atomic write and load
//!
//! The document is a JSON object whose keys are food names in
//! first-appearance order. Output is pretty-printed with 2-space indent and
//! raw UTF-8 (no `\u` escaping of Japanese text).

use crate::catalogue::{Catalogue, FoodEntry};
use crate::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

impl Serialize for Catalogue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, entry) in self.iter() {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

struct CatalogueVisitor;

impl<'de> Visitor<'de> for CatalogueVisitor {
    type Value = Catalogue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object keyed by food name")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Catalogue, A::Error> {
        let mut catalogue = Catalogue::default();
        while let Some((name, entry)) = access.next_entry::<String, FoodEntry>()? {
            catalogue.insert(name, entry);
        }
        Ok(catalogue)
    }
}

impl<'de> Deserialize<'de> for Catalogue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogueVisitor)
    }
}

/// Render the document text
pub fn to_json_string(catalogue: &Catalogue) -> Result<String> {
    Ok(serde_json::to_string_pretty(catalogue)?)
}

/// Write the document atomically: `<path>.tmp` then rename over `path`
///
/// Nothing is left at `path` if serialization or the write fails.
pub fn write_document(path: &Path, catalogue: &Catalogue) -> Result<()> {
    let json = to_json_string(catalogue)?;
    let temp_path = temp_path_for(path);

    if let Err(e) = fs::write(&temp_path, json.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!("Wrote {} foods to {}", catalogue.len(), path.display());
    Ok(())
}

/// Load a previously written document, keeping key order
pub fn load_document(path: &Path) -> Result<Catalogue> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound(format!("document {}", path.display())),
        _ => Error::Io(e),
    })?;
    let catalogue: Catalogue = serde_json::from_str(&text)?;
    debug!("Loaded {} foods from {}", catalogue.len(), path.display());
    Ok(catalogue)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
