//! Request-level errors and their HTTP status mapping.

use serde::Serialize;
use tiny_http::StatusCode;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] canescan::Error),
    #[error("no image in request")]
    MissingImage,
    #[error("farm_size '{0}' is not a number")]
    FarmSizeNotNumeric(String),
    #[error(transparent)]
    Locale(#[from] canescan::locale::UnknownLocale),
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
    #[error("no route for {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(canescan::Error::ModelUnavailable) => StatusCode(503),
            ApiError::Pipeline(e) if e.is_client_error() => StatusCode(400),
            ApiError::Pipeline(_) => StatusCode(500),
            ApiError::MissingImage
            | ApiError::FarmSizeNotNumeric(_)
            | ApiError::Locale(_)
            | ApiError::BadRequest(_) => StatusCode(400),
            ApiError::PayloadTooLarge { .. } => StatusCode(413),
            ApiError::NotFound(_) => StatusCode(404),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Pipeline(e) => e.code(),
            ApiError::MissingImage => "NO_IMAGE",
            ApiError::FarmSizeNotNumeric(_) => "INVALID_FARM_SIZE",
            ApiError::Locale(_) => "INVALID_LOCALE",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            ApiError::NotFound(_) => "NOT_FOUND",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: ErrorDetail { code: self.code(), message: self.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canescan::Error;

    #[test]
    fn status_mapping() {
        let cases: Vec<(ApiError, u16)> = vec![
            (Error::InvalidImage("x".into()).into(), 400),
            (Error::NormalizationError("x".into()).into(), 400),
            (Error::InvalidFarmSize(0.0).into(), 400),
            (Error::ModelUnavailable.into(), 503),
            (Error::ShapeMismatch { expected: vec![1], actual: vec![2] }.into(), 500),
            (Error::Inference("x".into()).into(), 500),
            (ApiError::MissingImage, 400),
            (ApiError::PayloadTooLarge { limit: 10 }, 413),
            (ApiError::NotFound("/x".into()), 404),
        ];
        for (err, status) in cases {
            assert_eq!(err.status().0, status, "{:?}", err);
        }
    }

    #[test]
    fn body_shape() {
        let json = serde_json::to_value(ApiError::from(Error::ModelUnavailable).body()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "MODEL_UNAVAILABLE");
        assert_eq!(json["error"]["message"], "model is not loaded");
    }
}
