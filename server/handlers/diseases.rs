use serde_json::{json, Value};

use canescan::Locale;

use crate::error::ApiError;
use crate::state::AppState;
use crate::util::form::{parse_query, query_get};

// ---------------------------------------------------------------------------
// GET /api/all-diseases?locale=
// ---------------------------------------------------------------------------

pub fn handle(query: &str, state: &AppState) -> Result<Value, ApiError> {
    let pairs = parse_query(query);
    let locale = match query_get(&pairs, "locale").filter(|s| !s.is_empty()) {
        Some(code) => code.parse::<Locale>()?,
        None => state.config.default_locale,
    };
    let diseases = state.pipeline.disease_catalog(locale);
    Ok(json!({
        "success": true,
        "locale": locale,
        "total": diseases.len(),
        "diseases": diseases,
    }))
}
