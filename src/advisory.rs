//! Farmer guidance derived from a classification: how urgent it is, when to
//! call an expert, and what the confidence means in plain words.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassificationResult, ConfidenceTier};
use crate::constants::MEDIUM_CONFIDENCE;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    Soon,
    WithinWeek,
}

/// How much farming experience the requester reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    #[default]
    Beginner,
    Experienced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExperience(pub String);

impl fmt::Display for UnknownExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown experience level '{}' (expected 'beginner' or 'experienced')", self.0)
    }
}

impl std::error::Error for UnknownExperience {}

impl FromStr for Experience {
    type Err = UnknownExperience;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Experience::Beginner),
            "experienced" | "expert" => Ok(Experience::Experienced),
            _ => Err(UnknownExperience(s.to_owned())),
        }
    }
}

/// Label-specific actions on top of the generic advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub immediate_actions: Vec<String>,
    pub warnings: Vec<String>,
    /// Set for beginners.
    pub expert_consultation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub urgency: Urgency,
    pub urgency_text: String,
    pub consultation: String,
    pub confidence_explanation: String,
    /// One-word judgement of how far the prediction can be trusted.
    pub reliability: String,
    pub next_steps: Vec<String>,
    pub recommendations: Recommendations,
    pub warning_signs: Vec<String>,
    pub success_indicators: Vec<String>,
}

pub fn advise(result: &ClassificationResult, experience: Experience, locale: Locale) -> Advisory {
    let urgency = if result.urgent {
        Urgency::Immediate
    } else if result.confidence < MEDIUM_CONFIDENCE {
        Urgency::Soon
    } else {
        Urgency::WithinWeek
    };

    Advisory {
        urgency,
        urgency_text: urgency_text(urgency, locale).to_owned(),
        consultation: consultation(result, locale).to_owned(),
        confidence_explanation: explanation(result.confidence_tier, locale).to_owned(),
        reliability: reliability(result.confidence_tier, locale).to_owned(),
        next_steps: owned(next_steps(locale)),
        recommendations: recommendations(&result.label, experience, locale),
        warning_signs: owned(warning_signs(locale)),
        success_indicators: owned(success_indicators(locale)),
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

fn is_red_rot(label: &str) -> bool {
    matches!(label, "RedRot" | "Red Rot")
}

fn urgency_text(urgency: Urgency, locale: Locale) -> &'static str {
    match (urgency, locale) {
        (Urgency::Immediate, Locale::English) => "Immediately",
        (Urgency::Immediate, Locale::Marathi) => "तत्काळ",
        (Urgency::Soon, Locale::English) => "Soon",
        (Urgency::Soon, Locale::Marathi) => "लवकरच",
        (Urgency::WithinWeek, Locale::English) => "Within a week",
        (Urgency::WithinWeek, Locale::Marathi) => "आठवड्यात",
    }
}

fn consultation(result: &ClassificationResult, locale: Locale) -> &'static str {
    let rot = is_red_rot(&result.label) || result.label == "Sett Rot";
    match locale {
        Locale::English if rot => "Contact an agricultural expert immediately",
        Locale::Marathi if rot => "तत्काळ कृषी तज्ञांशी संपर्क साधा",
        Locale::English if result.confidence < MEDIUM_CONFIDENCE => {
            "Consult an expert to confirm the diagnosis"
        }
        Locale::Marathi if result.confidence < MEDIUM_CONFIDENCE => {
            "निदान निश्चित करण्यासाठी तज्ञांचा सल्ला घ्या"
        }
        Locale::English if result.is_healthy() => "Continue regular inspection",
        Locale::Marathi if result.is_healthy() => "नियमित तपासणी चालू ठेवा",
        Locale::English => "Contact an expert if there is no improvement after treatment",
        Locale::Marathi => "उपचारानंतर सुधारणा न दिसल्यास तज्ञांशी संपर्क साधा",
    }
}

fn explanation(tier: ConfidenceTier, locale: Locale) -> &'static str {
    match (tier, locale) {
        (ConfidenceTier::High, Locale::English) => "The model is very confident in this diagnosis",
        (ConfidenceTier::High, Locale::Marathi) => "AI ला या निदानावर पूर्ण विश्वास आहे",
        (ConfidenceTier::Medium, Locale::English) => "The model is fairly confident in this diagnosis",
        (ConfidenceTier::Medium, Locale::Marathi) => "AI ला या निदानावर चांगला विश्वास आहे",
        (ConfidenceTier::Low, Locale::English) => "The model is unsure; get an expert to confirm",
        (ConfidenceTier::Low, Locale::Marathi) => "AI ला संशय आहे, तज्ञांची पुष्टी घ्या",
    }
}

fn reliability(tier: ConfidenceTier, locale: Locale) -> &'static str {
    match (tier, locale) {
        (ConfidenceTier::High, Locale::English) => "Reliable",
        (ConfidenceTier::High, Locale::Marathi) => "विश्वसनीय",
        (ConfidenceTier::Medium, Locale::English) => "Good",
        (ConfidenceTier::Medium, Locale::Marathi) => "चांगली",
        (ConfidenceTier::Low, Locale::English) => "Doubtful",
        (ConfidenceTier::Low, Locale::Marathi) => "संशयास्पद",
    }
}

fn next_steps(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::English => &[
            "Consult an expert",
            "Start the recommended treatment",
            "Check the crop again after 3-4 days",
        ],
        Locale::Marathi => &[
            "तज्ञाशी सल्लामसलत करा",
            "शिफारस केलेले उपचार सुरू करा",
            "3-4 दिवसांनी पुन्हा तपासा",
        ],
    }
}

fn recommendations(label: &str, experience: Experience, locale: Locale) -> Recommendations {
    let immediate: &[&str] = match (label, locale) {
        ("Healthy", Locale::English) => &["Keep up the current management", "Keep inspecting regularly"],
        ("Healthy", Locale::Marathi) => &["सध्याचे व्यवस्थापन चालू ठेवा", "नियमित तपासणी करत रहा"],
        (l, Locale::English) if is_red_rot(l) => &[
            "Remove infected parts without delay",
            "Get expert advice",
            "Separate the neighbouring crop",
        ],
        (l, Locale::Marathi) if is_red_rot(l) => &[
            "संक्रमित भाग तातडीने काढून टाका",
            "तज्ञ सल्ला घ्या",
            "बाजूचे पीक वेगळे करा",
        ],
        _ => &[],
    };
    let warnings: &[&str] = match locale {
        Locale::English if is_red_rot(label) => {
            &["This needs urgent attention", "It can spread to other crops"]
        }
        Locale::Marathi if is_red_rot(label) => {
            &["ही बाब तातडीने हाताळण्याची गरज आहे", "इतर पिकांमध्ये पसरू शकते"]
        }
        _ => &[],
    };
    let expert_consultation = match (experience, locale) {
        (Experience::Beginner, Locale::English) => Some("Expert advice is required"),
        (Experience::Beginner, Locale::Marathi) => Some("तज्ञ सल्ला घेणे आवश्यक"),
        (Experience::Experienced, _) => None,
    };

    Recommendations {
        immediate_actions: owned(immediate),
        warnings: owned(warnings),
        expert_consultation: expert_consultation.map(str::to_owned),
    }
}

fn warning_signs(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::English => &["Symptoms are getting worse", "It is spreading to new areas"],
        Locale::Marathi => &["लक्षणे वाढत असल्यास", "नवीन भागात पसरत असल्यास"],
    }
}

fn success_indicators(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::English => &["New green leaves appear", "Old symptoms fade"],
        Locale::Marathi => &["नवीन हिरवी पाने येणे", "जुनी लक्षणे कमी होणे"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify, LabelSet};

    fn labels() -> LabelSet {
        LabelSet::new(["Healthy", "RedRot", "Rust", "Mosaic"])
    }

    #[test]
    fn urgent_rot_needs_expert_now() {
        let r = classify(&[0.02, 0.9, 0.04, 0.04], &labels()).unwrap();
        let a = advise(&r, Experience::Beginner, Locale::English);
        assert_eq!(a.urgency, Urgency::Immediate);
        assert_eq!(a.consultation, "Contact an agricultural expert immediately");
        assert_eq!(a.next_steps.len(), 3);
        assert_eq!(a.reliability, "Reliable");
    }

    #[test]
    fn low_confidence_is_soon_and_asks_for_confirmation() {
        let r = classify(&[0.1, 0.2, 0.45, 0.25], &labels()).unwrap();
        let a = advise(&r, Experience::Beginner, Locale::Marathi);
        assert_eq!(a.urgency, Urgency::Soon);
        assert_eq!(a.urgency_text, "लवकरच");
        assert_eq!(a.consultation, "निदान निश्चित करण्यासाठी तज्ञांचा सल्ला घ्या");
        assert_eq!(a.reliability, "संशयास्पद");
    }

    #[test]
    fn confident_healthy_keeps_routine() {
        let r = classify(&[0.97, 0.01, 0.01, 0.01], &labels()).unwrap();
        let a = advise(&r, Experience::Experienced, Locale::English);
        assert_eq!(a.urgency, Urgency::WithinWeek);
        assert_eq!(a.consultation, "Continue regular inspection");
        assert_eq!(a.confidence_explanation, "The model is very confident in this diagnosis");
        assert_eq!(
            a.recommendations.immediate_actions,
            vec!["Keep up the current management", "Keep inspecting regularly"]
        );
        assert!(a.recommendations.warnings.is_empty());
        assert_eq!(a.recommendations.expert_consultation, None);
    }

    #[test]
    fn medium_confidence_disease_waits_for_treatment_result() {
        let r = classify(&[0.1, 0.1, 0.1, 0.7], &labels()).unwrap();
        let a = advise(&r, Experience::Experienced, Locale::English);
        assert_eq!(a.urgency, Urgency::WithinWeek);
        assert_eq!(a.consultation, "Contact an expert if there is no improvement after treatment");
        assert_eq!(a.reliability, "Good");
        assert!(a.recommendations.immediate_actions.is_empty());
    }

    #[test]
    fn red_rot_carries_actions_and_warnings() {
        let r = classify(&[0.02, 0.9, 0.04, 0.04], &labels()).unwrap();
        let a = advise(&r, Experience::Beginner, Locale::Marathi);
        assert_eq!(a.recommendations.immediate_actions.len(), 3);
        assert_eq!(a.recommendations.immediate_actions[0], "संक्रमित भाग तातडीने काढून टाका");
        assert_eq!(
            a.recommendations.warnings,
            vec!["ही बाब तातडीने हाताळण्याची गरज आहे", "इतर पिकांमध्ये पसरू शकते"]
        );
        assert_eq!(a.recommendations.expert_consultation.as_deref(), Some("तज्ञ सल्ला घेणे आवश्यक"));
    }

    #[test]
    fn watch_lists_exist_in_both_locales() {
        let r = classify(&[0.1, 0.1, 0.7, 0.1], &labels()).unwrap();
        for locale in Locale::all() {
            let a = advise(&r, Experience::Beginner, locale);
            assert_eq!(a.warning_signs.len(), 2);
            assert_eq!(a.success_indicators.len(), 2);
        }
        let mr = advise(&r, Experience::Beginner, Locale::Marathi);
        assert_eq!(mr.success_indicators[0], "नवीन हिरवी पाने येणे");
    }

    #[test]
    fn parses_experience_levels() {
        assert_eq!("Beginner".parse::<Experience>(), Ok(Experience::Beginner));
        assert_eq!(" experienced ".parse::<Experience>(), Ok(Experience::Experienced));
        assert!("novice".parse::<Experience>().is_err());
        assert_eq!(Experience::default(), Experience::Beginner);
    }
}
