//! wgts-lambda
//!
//! Lambda entry points for the oncoanalyser-wgts glue steps. Each binary in
//! `src/bin` wires one handler from [`handlers`] into `lambda_runtime`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use tracing_subscriber::EnvFilter;

/// Structured JSON logging for CloudWatch.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();
}
