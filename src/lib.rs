//! Sugarcane leaf disease diagnosis.
//!
//! An uploaded leaf photo is normalized into a fixed-shape tensor, run
//! through a black-box classifier, and turned into a farmer-facing report:
//! the most likely disease with confidence and severity tiers, localized
//! reference content, a treatment cost estimate and follow-up advice.
//!
//! [`Pipeline`] wires the stages together; each stage is usable on its own.

pub mod advisory;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod cost;
pub mod error;
pub mod knowledge;
pub mod locale;
pub mod model;
pub mod pipeline;
pub mod preprocess;
pub mod report;

use tracing_subscriber::EnvFilter;

// Convenience re-exports
pub use advisory::{advise, Advisory, Experience, Urgency};
pub use classifier::{
    classify, ClassificationResult, Classifier, ClassifierAdapter, ConfidenceTier, LabelSet,
    Severity,
};
pub use config::ServiceConfig;
pub use cost::{CostEstimate, CostEstimator};
pub use error::{Error, Result};
pub use knowledge::{DiseaseKnowledge, KnowledgeBase, NameTable};
pub use locale::Locale;
pub use model::DenseNetwork;
pub use pipeline::{Pipeline, RequestContext};
pub use preprocess::{normalize, ImageTensor};
pub use report::{assemble, Diagnosis};

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over the
/// built-in filter. Calling it twice is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
