use std::io::Cursor;

use serde::Serialize;
use serde_json::Value;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::{debug, error, warn};

use crate::error::ApiError;
use crate::handlers;
use crate::state::SharedState;
use crate::util::body::read_limited;
use crate::util::form::split_url;

pub type JsonResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn header(field: &str, value: &str) -> Option<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes()).ok()
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> JsonResponse {
    let (status, bytes) = match serde_json::to_vec(body) {
        Ok(bytes) => (status, bytes),
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            (StatusCode(500), br#"{"success":false}"#.to_vec())
        }
    };
    let mut response = Response::from_data(bytes).with_status_code(status);
    for h in [
        header("Content-Type", "application/json; charset=utf-8"),
        header("Access-Control-Allow-Origin", "*"),
    ]
    .into_iter()
    .flatten()
    {
        response.add_header(h);
    }
    response
}

pub fn error_response(err: &ApiError) -> JsonResponse {
    let status = err.status();
    if status.0 >= 500 {
        error!(code = err.code(), "{}", err);
    } else {
        warn!(code = err.code(), status = status.0, "{}", err);
    }
    json_response(status, &err.body())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes one request and always answers it with JSON.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let (path, query) = split_url(&url);
    debug!(%method, path, "request");

    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let result: Result<Value, ApiError> = match (&method, path) {
        (Method::Get, "/")                 => Ok(handlers::index::handle()),
        (Method::Get, "/api/health")       => Ok(handlers::health::handle(&state)),
        (Method::Get, "/api/all-diseases") => handlers::diseases::handle(query, &state),
        (Method::Post, "/api/predict")     => {
            let declared = request.body_length();
            read_limited(request.as_reader(), declared, state.config.max_upload_bytes)
                .and_then(|body| handlers::predict::handle(&content_type, query, &body, &state))
        }
        (Method::Post, "/api/model/reload") => handlers::model::handle_reload(&state),
        _ => Err(ApiError::NotFound(format!("{} {}", method, path))),
    };

    let response = match result {
        Ok(body) => json_response(StatusCode(200), &body),
        Err(e) => error_response(&e),
    };
    if let Err(e) = request.respond(response) {
        warn!(error = %e, "failed to send response");
    }
}
