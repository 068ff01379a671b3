pub mod adapter;
pub mod confidence;
pub mod labels;

pub use adapter::{Classifier, ClassifierAdapter, Inference};
pub use confidence::{classify, Alternative, ClassificationResult, ConfidenceTier, Severity};
pub use labels::{is_healthy, LabelSet};
