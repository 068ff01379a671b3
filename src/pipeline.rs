use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::advisory::{advise, Experience};
use crate::classifier::{classify, ClassifierAdapter};
use crate::constants::DEFAULT_FARM_SIZE;
use crate::cost::{validate_farm_size, CostEstimator};
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::knowledge::{DiseaseKnowledge, KnowledgeBase, NameTable};
use crate::locale::Locale;
use crate::model::DenseNetwork;
use crate::preprocess::normalize;
use crate::report::{assemble, Diagnosis};

/// Per-request options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestContext {
    /// Area to treat, in acres.
    pub farm_size: f64,
    pub locale: Locale,
    pub experience: Experience,
}

impl Default for RequestContext {
    fn default() -> Self {
        RequestContext {
            farm_size: DEFAULT_FARM_SIZE,
            locale: Locale::default(),
            experience: Experience::default(),
        }
    }
}

/// The full image-to-diagnosis flow.
///
/// Built once at startup and shared (usually behind an `Arc`) by every
/// request. Only the adapter holds mutable state.
pub struct Pipeline {
    adapter: ClassifierAdapter,
    knowledge: KnowledgeBase,
    estimator: CostEstimator,
}

impl Pipeline {
    pub fn new(adapter: ClassifierAdapter, knowledge: KnowledgeBase) -> Pipeline {
        Pipeline { adapter, knowledge, estimator: CostEstimator::new() }
    }

    /// Loads the knowledge file and, if present, the model file.
    ///
    /// A model that fails to load is logged and the pipeline starts without
    /// one; requests then fail with `ModelUnavailable` until a reload
    /// succeeds. A malformed knowledge file is fatal.
    pub fn load(model_path: &Path, knowledge_path: &Path) -> Result<Pipeline> {
        let knowledge = KnowledgeBase::load(knowledge_path)?;
        Ok(Pipeline::with_model_file(model_path, knowledge))
    }

    /// [`Pipeline::load`] with the paths from `config`, plus the class
    /// mapping's display names.
    pub fn from_config(config: &ServiceConfig) -> Result<Pipeline> {
        let names = NameTable::load(&config.class_mapping_path)?;
        let knowledge = KnowledgeBase::load(&config.knowledge_path)?.with_names(names);
        Ok(Pipeline::with_model_file(&config.model_path, knowledge))
    }

    fn with_model_file(model_path: &Path, knowledge: KnowledgeBase) -> Pipeline {
        let adapter = ClassifierAdapter::empty();
        match DenseNetwork::load_json(model_path) {
            Ok(network) => adapter.install(Box::new(network)),
            Err(e) => warn!(path = %model_path.display(), error = %e, "model not loaded"),
        }
        Pipeline::new(adapter, knowledge)
    }

    pub fn adapter(&self) -> &ClassifierAdapter {
        &self.adapter
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Runs every stage on one uploaded image.
    ///
    /// The farm size is checked before decoding so a bad request never
    /// reaches the model. Any stage error aborts the request.
    pub fn diagnose(&self, bytes: &[u8], ctx: &RequestContext) -> Result<Diagnosis> {
        validate_farm_size(ctx.farm_size)?;

        let tensor = normalize(bytes)?;
        debug!(shape = ?tensor.shape(), "normalized");

        let inference = self.adapter.infer(&tensor)?;
        let result = classify(&inference.probabilities, &inference.labels)
            .ok_or_else(|| Error::Inference("model output has no usable probability".into()))?;
        debug!(
            label = %result.label,
            confidence = result.confidence,
            tier = ?result.confidence_tier,
            "classified"
        );

        let knowledge = self.knowledge.lookup(&result.label, ctx.locale);
        if !knowledge.is_complete() {
            debug!(fields = ?knowledge.fallback_fields, "knowledge used placeholders");
        }
        let cost = self.estimator.estimate(&result.label, ctx.farm_size)?;
        let advisory = advise(&result, ctx.experience, ctx.locale);

        info!(label = %result.label, confidence = result.confidence, locale = %ctx.locale, "diagnosis ready");
        let names = self.knowledge.names();
        Ok(assemble(result, knowledge, cost, advisory, names, ctx.locale, Utc::now()))
    }

    /// Replaces the model with the one at `path`. On failure the current
    /// model, if any, stays installed.
    pub fn reload_model(&self, path: &Path) -> Result<()> {
        let network = DenseNetwork::load_json(path)?;
        self.adapter.install(Box::new(network));
        Ok(())
    }

    /// Reference content for every known label: those in the knowledge base
    /// plus the ones the loaded model can emit.
    pub fn disease_catalog(&self, locale: Locale) -> Vec<DiseaseKnowledge> {
        let mut labels = self.knowledge.labels();
        if let Some(model_labels) = self.adapter.labels() {
            labels.extend(model_labels.iter().map(str::to_owned));
        }
        labels.sort();
        labels.dedup();
        labels.iter().map(|label| self.knowledge.lookup(label, locale)).collect()
    }
}
