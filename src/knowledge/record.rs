use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// One label's reference content as stored in the knowledge file.
///
/// Every field is optional; absent fields resolve to a placeholder in
/// [`DiseaseKnowledge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceEntry {
    pub symptoms: Option<String>,
    pub detailed_symptoms: Option<Vec<String>>,
    pub solution: Option<String>,
    pub organic_solutions: Option<Vec<String>>,
    pub prevention: Option<String>,
    pub immediate_care: Option<Vec<String>>,
    /// Preferred over `expected_recovery_time` when both are present.
    pub recovery_time: Option<String>,
    pub expected_recovery_time: Option<String>,
}

/// Names of the content fields, used as explicit fallback markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeField {
    Symptoms,
    DetailedSymptoms,
    Treatment,
    OrganicSolutions,
    Prevention,
    ImmediateCare,
    RecoveryTime,
}

/// Fully resolved, farmer-facing content for one label in one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseKnowledge {
    pub label: String,
    pub localized_name: String,
    pub locale: Locale,
    pub symptoms: String,
    pub detailed_symptoms: Vec<String>,
    pub treatment: String,
    pub organic_solutions: Vec<String>,
    pub prevention: String,
    pub immediate_care: Vec<String>,
    pub recovery_time: String,
    /// Fields that were missing from the reference data and hold placeholder
    /// text instead.
    pub fallback_fields: Vec<KnowledgeField>,
}

impl DiseaseKnowledge {
    pub fn is_complete(&self) -> bool {
        self.fallback_fields.is_empty()
    }
}

/// Placeholder text per field when reference content is missing.
pub(crate) struct Placeholders {
    pub symptoms: &'static str,
    pub treatment: &'static str,
    pub prevention: &'static str,
    pub generic: &'static str,
}

pub(crate) fn placeholders(locale: Locale) -> Placeholders {
    match locale {
        Locale::English => Placeholders {
            symptoms: "Symptom information not available",
            treatment: "Treatment information not available",
            prevention: "Prevention information not available",
            generic: "Information not available",
        },
        Locale::Marathi => Placeholders {
            symptoms: "लक्षणे उपलब्ध नाहीत",
            treatment: "उपचार माहिती उपलब्ध नाही",
            prevention: "प्रतिबंध माहिती उपलब्ध नाही",
            generic: "माहिती उपलब्ध नाही",
        },
    }
}
