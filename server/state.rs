use std::sync::Arc;

use canescan::{Pipeline, ServiceConfig};

/// Everything a request handler needs. Built once in `main`.
pub struct AppState {
    pub pipeline: Pipeline,
    pub config: ServiceConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(pipeline: Pipeline, config: ServiceConfig) -> SharedState {
        Arc::new(AppState { pipeline, config })
    }
}
