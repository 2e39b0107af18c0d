//! AWS Lambda handler for running DRIP projections
//!
//! Accepts a projection config as a JSON POST body and returns the
//! projection result. Invalid JSON or an invalid config gets a 400.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use std::time::Instant;

use drip_projection::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary};
use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Input configuration for the projection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    #[serde(flatten)]
    pub config: ProjectionConfig,

    /// Include the year-by-year series (default: true)
    #[serde(default = "default_include_yearly")]
    pub include_yearly: bool,
}

fn default_include_yearly() -> bool { true }

/// Output from the projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub summary: ProjectionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProjectionResult>,
    pub execution_time_ms: u64,
}

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Status code and JSON body for one request
fn handle_body(method: &str, body: &str) -> (u16, String) {
    if method != "POST" {
        return error_body(405, &format!("Method {} not allowed", method));
    }

    let start = Instant::now();
    let body = if body.trim().is_empty() { "{}" } else { body };

    let request: ProjectionRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return error_body(400, &format!("Invalid JSON: {}", e)),
    };

    if let Err(e) = request.config.validate() {
        warn!("Rejected projection config: {}", e);
        return error_body(400, &format!("Invalid config: {}", e));
    }

    let result = ProjectionEngine::new(request.config).run();
    if !result.is_finite() {
        warn!("Projection overflowed for an accepted config");
        return error_body(422, "Projection overflowed: inputs produce unbounded share counts");
    }
    info!(
        "Projected {} years, final value {:.2}",
        result.yearly.len(),
        result.final_portfolio_value
    );

    let response = ProjectionResponse {
        summary: result.summary(),
        result: request.include_yearly.then_some(result),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    match serde_json::to_string(&response) {
        Ok(json) => (200, json),
        Err(e) => error_body(500, &format!("Failed to serialize result: {}", e)),
    }
}

fn error_body(status: u16, message: &str) -> (u16, String) {
    (status, serde_json::json!({ "error": message }).to_string())
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str().to_string();

    // Handle CORS preflight
    if method == "OPTIONS" {
        let mut builder = Response::builder().status(200);
        for (name, value) in CORS_HEADERS {
            builder = builder.header(name, value);
        }
        return Ok(builder.body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };

    let (status, json) = handle_body(&method, &body_str);

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "application/json");
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    Ok(builder.body(Body::Text(json))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
