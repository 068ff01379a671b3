//! Turns a probability distribution into a diagnosis: top label, confidence
//! tier, severity tier and ranked alternatives.

use std::cmp::Ordering;

use serde::Serialize;

use crate::classifier::labels::{is_healthy, LabelSet};
use crate::constants::{
    ALTERNATIVE_FLOOR, HIGH_CONFIDENCE, MAX_ALTERNATIVES, MEDIUM_CONFIDENCE, URGENT_CONFIDENCE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Boundaries are inclusive on the higher tier.
    pub fn from_confidence(confidence: f32) -> ConfidenceTier {
        if confidence >= HIGH_CONFIDENCE {
            ConfidenceTier::High
        } else if confidence >= MEDIUM_CONFIDENCE {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// Fixed per-label urgency, independent of how confident the model is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    None,
}

impl Severity {
    pub fn for_label(label: &str) -> Severity {
        if is_healthy(label) {
            return Severity::None;
        }
        match label {
            "RedRot" | "Red Rot" | "Grassy shoot" | "Sett Rot" => Severity::Critical,
            "BrownRust" | "Mosaic" | "Pokkah Boeng" | "Rust" => Severity::High,
            "Banded Chlorosis" | "Brown Spot" | "Yellow Leaf" | "Dried Leaves" => Severity::Medium,
            _ => Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub label: String,
    pub probability: f32,
    /// 1-based position in the probability ranking (the top pick is 1).
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub label: String,
    pub label_index: usize,
    pub confidence: f32,
    pub confidence_tier: ConfidenceTier,
    pub severity: Severity,
    /// Top probability minus the runner-up; equals `confidence` for one class.
    pub confidence_gap: f32,
    pub urgent: bool,
    pub expert_needed: bool,
    pub alternatives: Vec<Alternative>,
}

impl ClassificationResult {
    pub fn is_healthy(&self) -> bool {
        is_healthy(&self.label)
    }
}

/// Index of the largest probability; exact ties go to the lower index.
fn stable_argmax(distribution: &[f32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in distribution.iter().enumerate() {
        match best {
            Some(b) if *p <= distribution[b] => {}
            _ if p.is_nan() => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Classifies `distribution`, index-aligned with `labels`.
///
/// Returns `None` for an empty distribution or one with no comparable
/// probability. Entries past the end of `labels` are ignored.
pub fn classify(distribution: &[f32], labels: &LabelSet) -> Option<ClassificationResult> {
    let usable = &distribution[..distribution.len().min(labels.len())];
    let top = stable_argmax(usable)?;
    let label = labels.get(top)?.to_owned();
    let confidence = usable[top];

    // Stable sort keeps index order among equal probabilities.
    let mut ranked: Vec<usize> = (0..usable.len()).filter(|i| !usable[*i].is_nan()).collect();
    ranked.sort_by(|&a, &b| usable[b].partial_cmp(&usable[a]).unwrap_or(Ordering::Equal));

    let runner_up = ranked.iter().find(|&&i| i != top).map(|&i| usable[i]).unwrap_or(0.0);

    let alternatives: Vec<Alternative> = ranked
        .iter()
        .enumerate()
        .filter(|&(_, &i)| i != top)
        .filter(|&(_, &i)| usable[i] > ALTERNATIVE_FLOOR)
        .take(MAX_ALTERNATIVES)
        .filter_map(|(pos, &i)| {
            Some(Alternative {
                label: labels.get(i)?.to_owned(),
                probability: usable[i],
                rank: pos + 1,
            })
        })
        .collect();

    let severity = Severity::for_label(&label);
    let healthy = is_healthy(&label);

    Some(ClassificationResult {
        confidence_tier: ConfidenceTier::from_confidence(confidence),
        severity,
        confidence_gap: confidence - runner_up,
        urgent: confidence > URGENT_CONFIDENCE && !healthy,
        expert_needed: severity == Severity::Critical,
        alternatives,
        label_index: top,
        label,
        confidence,
    })
}
