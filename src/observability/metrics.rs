//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nft_mint_attempts_total` (counter): finished attempts by outcome
//! - `nft_mint_chain_switch_total` (counter): switch requests by result
//! - `nft_mint_rpc_errors_total` (counter): exhausted RPC calls by method
//! - `nft_mint_confirmations` (gauge): depth of the tracked transaction

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Serve Prometheus metrics on `addr`. Requires a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_mint_attempt(outcome: &'static str) {
    metrics::counter!("nft_mint_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_chain_switch(success: bool) {
    let result = if success { "ok" } else { "failed" };
    metrics::counter!("nft_mint_chain_switch_total", "result" => result).increment(1);
}

pub fn record_rpc_error(call: &'static str) {
    metrics::counter!("nft_mint_rpc_errors_total", "call" => call).increment(1);
}

pub fn record_confirmations(depth: u64) {
    metrics::gauge!("nft_mint_confirmations").set(depth as f64);
}
