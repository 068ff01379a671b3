//! canescan HTTP service
//!
//! Accepts leaf photos over HTTP and answers with a JSON diagnosis.
//! Served by a synchronous tiny_http server with one thread per request.
//!
//! Run with:
//!   cargo run --bin canescan-server --release
//!
//! Settings come from `CANESCAN_CONFIG` (JSON file) and `CANESCAN_*`
//! environment variables; logging from `RUST_LOG`.

mod error;
mod handlers;
mod routes;
mod state;
mod util;

use std::process::ExitCode;

use tiny_http::Server;
use tracing::{error, info};

use canescan::{Pipeline, ServiceConfig};
use state::AppState;

fn main() -> ExitCode {
    canescan::init_tracing();

    let config = match ServiceConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let pipeline = match Pipeline::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let addr = config.bind_addr();
    let server = match Server::http(&addr) {
        Ok(s) => s,
        Err(e) => {
            error!(%addr, "failed to bind HTTP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("╔══════════════════════════════════════════════╗");
    println!("║          canescan                            ║");
    println!("║  sugarcane leaf disease diagnosis            ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  POST /api/predict                           ║");
    println!("║  GET  /api/health   GET /api/all-diseases    ║");
    println!("╚══════════════════════════════════════════════╝");
    info!(
        %addr,
        model_loaded = pipeline.adapter().is_loaded(),
        locale = %config.default_locale,
        "listening"
    );

    let shared_state = AppState::new(pipeline, config);

    // A slow upload or inference only blocks its own thread; the model
    // itself still runs one request at a time.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    ExitCode::SUCCESS
}
