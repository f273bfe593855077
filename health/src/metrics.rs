//! Prometheus metrics for health verification.
//!
//! The [`HealthMetrics`] struct owns a dedicated [`Registry`] that an
//! exporter can encode into the Prometheus text exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Encoder, Histogram, HistogramOpts, IntCounter, IntGauge,
    Opts, Registry, TextEncoder,
};

use crate::report::HealthReport;

/// Metrics covering probe traffic and the latest verification result.
pub struct HealthMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Total number of probes dispatched.
    pub probes_total: IntCounter,
    /// Total number of probes that did not reach their endpoint.
    pub probes_failed: IntCounter,
    /// Total number of completed verification runs.
    pub runs_total: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Endpoints down in the latest run.
    pub endpoints_down: IntGauge,
    /// Targets skipped as malformed in the latest run.
    pub malformed_targets: IntGauge,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Wall-clock duration of a verification run, in milliseconds.
    pub verify_duration_ms: Histogram,
}

impl HealthMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let probes_total = register_int_counter_with_registry!(
            Opts::new("netboot_probes_total", "Total reachability probes dispatched"),
            registry
        )
        .expect("failed to register probes_total counter");

        let probes_failed = register_int_counter_with_registry!(
            Opts::new(
                "netboot_probes_failed_total",
                "Total reachability probes that found the endpoint down"
            ),
            registry
        )
        .expect("failed to register probes_failed counter");

        let runs_total = register_int_counter_with_registry!(
            Opts::new("netboot_verify_runs_total", "Total verification runs completed"),
            registry
        )
        .expect("failed to register runs_total counter");

        let endpoints_down = register_int_gauge_with_registry!(
            Opts::new(
                "netboot_endpoints_down",
                "Endpoints down in the latest verification run"
            ),
            registry
        )
        .expect("failed to register endpoints_down gauge");

        let malformed_targets = register_int_gauge_with_registry!(
            Opts::new(
                "netboot_malformed_targets",
                "Targets skipped as malformed in the latest verification run"
            ),
            registry
        )
        .expect("failed to register malformed_targets gauge");

        // Exponential buckets covering 1 ms → ~16 s.
        let verify_duration_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "netboot_verify_duration_ms",
                "Verification run duration in milliseconds"
            )
            .buckets(prometheus::exponential_buckets(1.0, 2.0, 15).expect("valid bucket layout")),
            registry
        )
        .expect("failed to register verify_duration_ms histogram");

        Self {
            registry,
            probes_total,
            probes_failed,
            runs_total,
            endpoints_down,
            malformed_targets,
            verify_duration_ms,
        }
    }

    /// Record the result of one finished run.
    pub fn observe_report(&self, report: &HealthReport, elapsed_ms: f64) {
        let down = report.down().len() as u64;
        self.probes_total.inc_by(report.len() as u64);
        self.probes_failed.inc_by(down);
        self.runs_total.inc();
        self.endpoints_down.set(down as i64);
        self.malformed_targets.set(report.malformed().len() as i64);
        self.verify_duration_ms.observe(elapsed_ms);
    }

    /// Encode every metric in the Prometheus text format.
    pub fn encode(&self) -> String {
        let mut buf = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buf) {
            tracing::warn!(error = %e, "failed to encode health metrics");
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Default for HealthMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn fresh_registry_exports_every_metric() {
        let text = HealthMetrics::new().encode();
        for name in [
            "netboot_probes_total",
            "netboot_probes_failed_total",
            "netboot_verify_runs_total",
            "netboot_endpoints_down",
            "netboot_malformed_targets",
            "netboot_verify_duration_ms",
        ] {
            assert!(text.contains(name), "missing {name}");
        }
    }

    #[test]
    fn gauges_reflect_latest_run_only() {
        let metrics = HealthMetrics::new();
        let empty = HealthReport::new(BTreeMap::new(), BTreeMap::new());
        metrics.endpoints_down.set(5);
        metrics.observe_report(&empty, 3.0);
        assert_eq!(metrics.endpoints_down.get(), 0);
        assert_eq!(metrics.runs_total.get(), 1);
        assert_eq!(metrics.verify_duration_ms.get_sample_count(), 1);
    }
}
