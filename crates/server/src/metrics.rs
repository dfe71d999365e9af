use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use tracing::error;

// Prometheus metrics (default registry)
pub static AUTH_EVENTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "todo_app_auth_events_total",
        "Authentication events by kind",
        &["event"]
    )
    .expect("register auth_events_total")
});

pub static TODO_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "todo_app_todo_operations_total",
        "Todo operations by outcome",
        &["operation", "outcome"]
    )
    .expect("register todo_operations_total")
});

/// `event`: registered, login, login_failed, logout, rejected.
pub fn record_auth(event: &str) {
    AUTH_EVENTS_TOTAL.with_label_values(&[event]).inc();
}

/// `found` is false when the envelope carried the not-found error.
pub fn record_todo(operation: &str, found: bool) {
    let outcome = if found { "success" } else { "not_found" };
    TODO_OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("encode metrics error: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "metrics encode error".to_string());
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics_handler() -> (StatusCode, String) {
    encode_metrics()
}
