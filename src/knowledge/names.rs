use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::locale::Locale;

/// Built-in display names per label. Labels missing here display as-is.
const NAMES: &[(&str, &str, &str)] = &[
    // (label, English, Marathi)
    ("Healthy", "Healthy", "निरोगी"),
    ("Yellow Leaf", "Yellow Leaf", "पिवळी पाने"),
    ("RedRot", "Red Rot", "लाल किडणे"),
    ("Red Rot", "Red Rot", "लाल किडणे"),
    ("Rust", "Rust", "गंज"),
    ("BrownRust", "Brown Rust", "तपकिरी गंज"),
    ("Brown Rust", "Brown Rust", "तपकिरी गंज"),
    ("Mosaic", "Mosaic", "मोझेक"),
    ("Grassy shoot", "Grassy Shoot", "गवताळ फांदी"),
    ("Banded Chlorosis", "Banded Chlorosis", "पट्टेदार पांढरा रोग"),
    ("Brown Spot", "Brown Spot", "तपकिरी डाग"),
    ("Dried Leaves", "Dried Leaves", "सुकलेली पाने"),
    ("Pokkah Boeng", "Pokkah Boeng", "पोक्का बोएंग"),
    ("Sett Rot", "Sett Rot", "बियाणे किडणे"),
];

/// Human-readable name of `label` in `locale` from the built-in table.
pub fn localized_name(label: &str, locale: Locale) -> String {
    NAMES
        .iter()
        .find(|(l, _, _)| *l == label)
        .map(|(_, en, mr)| match locale {
            Locale::English => *en,
            Locale::Marathi => *mr,
        })
        .unwrap_or(label)
        .to_owned()
}

/// The part of the class mapping file that carries display names. Other
/// keys in the file are ignored.
#[derive(Debug, Default, Deserialize)]
struct ClassMapping {
    #[serde(default)]
    marathi_names: HashMap<String, String>,
}

/// Display names shipped next to a model, layered over the built-in table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    marathi: HashMap<String, String>,
}

impl NameTable {
    pub fn from_json_str(json: &str) -> Result<NameTable> {
        let mapping: ClassMapping =
            serde_json::from_str(json).map_err(|e| Error::Knowledge(e.to_string()))?;
        Ok(NameTable { marathi: mapping.marathi_names })
    }

    /// Reads `{"marathi_names": {"<label>": "<name>"}}` from `path`. A missing
    /// file gives an empty table.
    pub fn load(path: impl AsRef<Path>) -> Result<NameTable> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no class mapping; using built-in names");
                return Ok(NameTable::default());
            }
            Err(e) => return Err(e.into()),
        };
        let table = NameTable::from_json_str(&json)
            .map_err(|e| Error::Knowledge(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), names = table.marathi.len(), "loaded class mapping");
        Ok(table)
    }

    pub fn name(&self, label: &str, locale: Locale) -> String {
        let custom = match locale {
            Locale::Marathi => self.marathi.get(label).filter(|n| !n.trim().is_empty()),
            Locale::English => None,
        };
        match custom {
            Some(name) => name.clone(),
            None => localized_name(label, locale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_labels() {
        assert_eq!(localized_name("RedRot", Locale::English), "Red Rot");
        assert_eq!(localized_name("RedRot", Locale::Marathi), "लाल किडणे");
        assert_eq!(localized_name("Leaf Scald", Locale::Marathi), "Leaf Scald");
    }

    #[test]
    fn mapping_overrides_marathi_only() {
        let table = NameTable::from_json_str(
            r#"{"classes": ["Healthy", "RedRot"], "marathi_names": {"RedRot": "लाल सड", "Leaf Scald": "पान करपा"}}"#,
        )
        .unwrap();
        assert_eq!(table.name("RedRot", Locale::Marathi), "लाल सड");
        assert_eq!(table.name("Leaf Scald", Locale::Marathi), "पान करपा");
        assert_eq!(table.name("RedRot", Locale::English), "Red Rot");
        assert_eq!(table.name("Healthy", Locale::Marathi), "निरोगी");
    }

    #[test]
    fn missing_mapping_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = NameTable::load(dir.path().join("class_mapping.json")).unwrap();
        assert_eq!(table, NameTable::default());
    }

    #[test]
    fn malformed_mapping_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("class_mapping.json");
        std::fs::write(&path, r#"{"marathi_names": ["RedRot"]}"#).unwrap();
        assert!(matches!(NameTable::load(&path), Err(Error::Knowledge(_))));
    }
}
