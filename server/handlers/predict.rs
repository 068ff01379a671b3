use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};

use canescan::constants::DEFAULT_FARM_SIZE;
use canescan::{Experience, Locale, RequestContext};

use crate::error::ApiError;
use crate::state::AppState;
use crate::util::form::{parse_query, query_get};
use crate::util::multipart::{extract_boundary, first_file, parse_parts, text_field};

/// An upload decoded from any of the accepted body encodings.
#[derive(Debug)]
pub struct PredictInput {
    pub image: Vec<u8>,
    pub farm_size: Option<String>,
    pub locale: Option<String>,
    pub experience: Option<String>,
}

#[derive(Deserialize)]
struct JsonUpload {
    image: String,
    #[serde(default)]
    farm_size: Option<Value>,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    experience: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /api/predict
// ---------------------------------------------------------------------------

pub fn handle(content_type: &str, query: &str, body: &[u8], state: &AppState) -> Result<Value, ApiError> {
    let input = parse_upload(content_type, query, body)?;
    let ctx = request_context(&input, state.config.default_locale)?;
    let diagnosis = state.pipeline.diagnose(&input.image, &ctx)?;
    Ok(json!({ "success": true, "diagnosis": diagnosis }))
}

/// Extracts the image and options from a multipart form, a JSON document
/// (`image` as plain base64 or a data URL) or a raw image body. Query
/// parameters fill in options the body does not carry.
pub fn parse_upload(content_type: &str, query: &str, body: &[u8]) -> Result<PredictInput, ApiError> {
    let mime = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

    let mut input = if mime == "multipart/form-data" {
        let boundary = extract_boundary(content_type)
            .ok_or_else(|| ApiError::BadRequest("multipart body without boundary".into()))?;
        let parts = parse_parts(body, &boundary);
        PredictInput {
            image: first_file(&parts).map(<[u8]>::to_vec).unwrap_or_default(),
            farm_size: text_field(&parts, "farm_size"),
            locale: text_field(&parts, "locale"),
            experience: text_field(&parts, "experience"),
        }
    } else if mime == "application/json" || (mime.is_empty() && body.first() == Some(&b'{')) {
        parse_json(body)?
    } else {
        PredictInput { image: body.to_vec(), farm_size: None, locale: None, experience: None }
    };

    if input.image.is_empty() {
        return Err(ApiError::MissingImage);
    }

    let pairs = parse_query(query);
    if input.farm_size.is_none() {
        input.farm_size = query_get(&pairs, "farm_size").map(str::to_owned);
    }
    if input.locale.is_none() {
        input.locale = query_get(&pairs, "locale").map(str::to_owned);
    }
    if input.experience.is_none() {
        input.experience = query_get(&pairs, "experience").map(str::to_owned);
    }
    Ok(input)
}

fn parse_json(body: &[u8]) -> Result<PredictInput, ApiError> {
    let upload: JsonUpload = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("malformed JSON body: {}", e)))?;

    // `data:image/png;base64,....` or bare base64.
    let encoded = match upload.image.split_once("base64,") {
        Some((_, data)) => data,
        None => upload.image.as_str(),
    };
    let image = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| canescan::Error::InvalidImage(format!("image is not valid base64: {}", e)))?;

    let farm_size = match upload.farm_size {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    };
    Ok(PredictInput { image, farm_size, locale: upload.locale, experience: upload.experience })
}

fn request_context(input: &PredictInput, default_locale: Locale) -> Result<RequestContext, ApiError> {
    let farm_size = match input.farm_size.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse::<f64>().map_err(|_| ApiError::FarmSizeNotNumeric(raw.to_owned()))?,
        None => DEFAULT_FARM_SIZE,
    };
    let locale = match input.locale.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(code) => code.parse::<Locale>()?,
        None => default_locale,
    };
    let experience = match input.experience.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(level) => level.parse::<Experience>().map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => Experience::default(),
    };
    Ok(RequestContext { farm_size, locale, experience })
}
