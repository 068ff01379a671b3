use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

pub fn handle(state: &AppState) -> Value {
    let labels = state.pipeline.adapter().labels();
    let loaded = labels.is_some();
    let status = if loaded { "healthy" } else { "degraded" };
    let label_list: &[String] = labels.as_deref().map(|l| l.as_slice()).unwrap_or(&[]);
    json!({
        "status": status,
        "model_loaded": loaded,
        "labels": label_list,
        "knowledge_entries": state.pipeline.knowledge().entry_count(),
        "timestamp": Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{state_with_model, state_without_model};

    #[test]
    fn reports_loaded_model() {
        let body = handle(&state_with_model(vec![0.7, 0.1, 0.1, 0.1]));
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_loaded"], true);
        assert_eq!(body["labels"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn reports_missing_model() {
        let body = handle(&state_without_model());
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["model_loaded"], false);
        assert_eq!(body["labels"], serde_json::json!([]));
    }
}
