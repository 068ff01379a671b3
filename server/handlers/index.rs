use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle() -> Value {
    json!({
        "name": "canescan",
        "description": "Sugarcane leaf disease diagnosis",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /api/health",
            "GET /api/all-diseases?locale=",
            "POST /api/predict",
            "POST /api/model/reload",
        ],
    })
}
