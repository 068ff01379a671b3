use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/model/reload
// ---------------------------------------------------------------------------

/// Reloads the model from the configured path. On failure the previous
/// model, if any, keeps serving.
pub fn handle_reload(state: &AppState) -> Result<Value, ApiError> {
    let path = &state.config.model_path;
    state.pipeline.reload_model(path)?;
    let labels = state.pipeline.adapter().labels();
    let label_list: &[String] = labels.as_deref().map(|l| l.as_slice()).unwrap_or(&[]);
    info!(path = %path.display(), "model reloaded");
    Ok(json!({
        "success": true,
        "model_path": path,
        "labels": label_list,
    }))
}
