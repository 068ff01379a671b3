use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::knowledge::names::NameTable;
use crate::knowledge::record::{placeholders, DiseaseKnowledge, KnowledgeField, ReferenceEntry};
use crate::locale::Locale;

type LocaleTable = BTreeMap<String, ReferenceEntry>;

/// Static reference content keyed by locale then label.
///
/// Loaded once at startup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    tables: HashMap<Locale, LocaleTable>,
    names: NameTable,
}

impl KnowledgeBase {
    pub fn empty() -> KnowledgeBase {
        KnowledgeBase::default()
    }

    /// Parses the JSON layout `{ "<locale>": { "<label>": { ...entry } } }`.
    pub fn from_json_str(json: &str) -> Result<KnowledgeBase> {
        let raw: HashMap<String, LocaleTable> =
            serde_json::from_str(json).map_err(|e| Error::Knowledge(e.to_string()))?;
        let mut tables = HashMap::new();
        for (code, table) in raw {
            let locale: Locale = code.parse().map_err(|e: crate::locale::UnknownLocale| {
                Error::Knowledge(e.to_string())
            })?;
            tables.insert(locale, table);
        }
        Ok(KnowledgeBase { tables, names: NameTable::default() })
    }

    /// Replaces the display-name overrides.
    pub fn with_names(mut self, names: NameTable) -> KnowledgeBase {
        self.names = names;
        self
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Loads the knowledge file at `path`. A missing file yields an empty base
    /// (every lookup falls back to placeholders); a malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<KnowledgeBase> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "knowledge file not found; all content will use placeholders");
                return Ok(KnowledgeBase::empty());
            }
            Err(e) => return Err(e.into()),
        };
        let base = KnowledgeBase::from_json_str(&json)
            .map_err(|e| Error::Knowledge(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), entries = base.entry_count(), "loaded disease knowledge");
        Ok(base)
    }

    pub fn entry_count(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    /// Every label with content in at least one locale, sorted.
    pub fn labels(&self) -> Vec<String> {
        self.tables
            .values()
            .flat_map(|t| t.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Resolves the content for `label` in `locale`.
    ///
    /// Never fails: each missing field independently becomes placeholder text
    /// in `locale` and is listed in `fallback_fields`.
    pub fn lookup(&self, label: &str, locale: Locale) -> DiseaseKnowledge {
        let entry = self.tables.get(&locale).and_then(|t| t.get(label));
        if entry.is_none() {
            warn!(label, %locale, "no reference entry; using placeholders");
        }
        let entry = entry.cloned().unwrap_or_default();
        let text = placeholders(locale);
        let mut fallback_fields = Vec::new();

        let mut string_field = |value: Option<String>, field: KnowledgeField, placeholder: &str| {
            match value.filter(|s| !s.trim().is_empty()) {
                Some(v) => v,
                None => {
                    fallback_fields.push(field);
                    placeholder.to_owned()
                }
            }
        };
        let symptoms = string_field(entry.symptoms, KnowledgeField::Symptoms, text.symptoms);
        let treatment = string_field(entry.solution, KnowledgeField::Treatment, text.treatment);
        let prevention = string_field(entry.prevention, KnowledgeField::Prevention, text.prevention);
        let recovery = entry
            .recovery_time
            .filter(|s| !s.trim().is_empty())
            .or(entry.expected_recovery_time);
        let recovery_time = string_field(recovery, KnowledgeField::RecoveryTime, text.generic);

        let mut list_field = |value: Option<Vec<String>>, field: KnowledgeField| {
            match value.filter(|v| !v.is_empty()) {
                Some(v) => v,
                None => {
                    fallback_fields.push(field);
                    vec![text.generic.to_owned()]
                }
            }
        };
        let detailed_symptoms = list_field(entry.detailed_symptoms, KnowledgeField::DetailedSymptoms);
        let organic_solutions = list_field(entry.organic_solutions, KnowledgeField::OrganicSolutions);
        let immediate_care = list_field(entry.immediate_care, KnowledgeField::ImmediateCare);

        DiseaseKnowledge {
            label: label.to_owned(),
            localized_name: self.names.name(label, locale),
            locale,
            symptoms,
            detailed_symptoms,
            treatment,
            organic_solutions,
            prevention,
            immediate_care,
            recovery_time,
            fallback_fields,
        }
    }
}
