// crates/kantine-server/src/telemetry.rs
// ============================================================================
// Module: Server Telemetry
// Description: Observability hooks for HTTP request handling.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for HTTP request counters and
//! latency histograms. It is intentionally dependency-light so downstream
//! deployments can plug in Prometheus or OpenTelemetry without redesign.
//! Telemetry must avoid leaking credentials or tokens; events carry only
//! method, path, status, and latency.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for request histograms.
pub const REQUEST_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000];

// ============================================================================
// SECTION: Metric Events
// ============================================================================

/// HTTP request metric event payload.
///
/// # Invariants
/// - `path` is the matched route template, never the raw URI, so tokens and
///   identifiers stay out of telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetricEvent {
    /// HTTP method label.
    pub method: String,
    /// Matched route template.
    pub path: String,
    /// Response status code.
    pub status: u16,
    /// Request latency.
    pub latency: Duration,
}

// ============================================================================
// SECTION: Metrics Sink
// ============================================================================

/// Sink receiving request metric events.
pub trait MetricsSink: Send + Sync {
    /// Records one request event.
    fn record(&self, event: &RequestMetricEvent);
}

/// Sink that drops all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record(&self, _event: &RequestMetricEvent) {}
}

/// Sink that buffers events in memory for tests and local inspection.
///
/// # Invariants
/// - Events are appended in arrival order.
#[derive(Debug, Default)]
pub struct MemoryMetricsSink {
    /// Buffered events.
    events: Mutex<Vec<RequestMetricEvent>>,
}

impl MemoryMetricsSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns all buffered events.
    #[must_use]
    pub fn drain(&self) -> Vec<RequestMetricEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |mut guard| guard.drain(..).collect())
    }
}

impl MetricsSink for MemoryMetricsSink {
    fn record(&self, event: &RequestMetricEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.clone());
        }
    }
}
