//! Composition of the per-stage results into the final [`Diagnosis`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::advisory::Advisory;
use crate::classifier::{ClassificationResult, ConfidenceTier, Severity};
use crate::cost::CostEstimate;
use crate::knowledge::{DiseaseKnowledge, NameTable};
use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub label: String,
    pub localized_name: String,
    pub confidence: f32,
    pub confidence_percent: f32,
    pub confidence_tier: ConfidenceTier,
    pub severity: Severity,
    pub confidence_gap: f32,
    pub urgent: bool,
    pub expert_needed: bool,
    pub healthy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAlternative {
    pub label: String,
    pub localized_name: String,
    pub probability: f32,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub summary: Summary,
    pub knowledge: DiseaseKnowledge,
    pub cost: CostEstimate,
    pub advisory: Advisory,
    pub alternatives: Vec<RankedAlternative>,
    pub locale: Locale,
    pub generated_at: DateTime<Utc>,
}

/// Builds the response. Does no validation; every input is already final.
pub fn assemble(
    result: ClassificationResult,
    knowledge: DiseaseKnowledge,
    cost: CostEstimate,
    advisory: Advisory,
    names: &NameTable,
    locale: Locale,
    generated_at: DateTime<Utc>,
) -> Diagnosis {
    let alternatives = result
        .alternatives
        .iter()
        .map(|alt| RankedAlternative {
            localized_name: names.name(&alt.label, locale),
            label: alt.label.clone(),
            probability: alt.probability,
            rank: alt.rank,
        })
        .collect();

    let summary = Summary {
        localized_name: names.name(&result.label, locale),
        healthy: result.is_healthy(),
        confidence_percent: (result.confidence * 1000.0).round() / 10.0,
        label: result.label,
        confidence: result.confidence,
        confidence_tier: result.confidence_tier,
        severity: result.severity,
        confidence_gap: result.confidence_gap,
        urgent: result.urgent,
        expert_needed: result.expert_needed,
    };

    Diagnosis { summary, knowledge, cost, advisory, alternatives, locale, generated_at }
}
