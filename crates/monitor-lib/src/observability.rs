//! Metrics and structured event logging for the monitor
//!
//! Metrics live in the default Prometheus registry and are registered once per
//! process; [`MonitorMetrics`] is a cheap handle onto them.

use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge,
    HistogramVec, IntCounter, IntCounterVec, IntGauge,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// View render buckets in seconds. Views are in-memory, so the range is tight.
const RENDER_BUCKETS: &[f64] = &[
    0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.05, 0.1,
];

static GLOBAL_METRICS: OnceLock<MonitorMetricsInner> = OnceLock::new();

struct MonitorMetricsInner {
    view_requests: IntCounterVec,
    view_render_seconds: HistogramVec,
    lookup_misses: IntCounterVec,
    alerts_acknowledged: IntCounter,
    active_alerts: IntGauge,
}

impl MonitorMetricsInner {
    fn new() -> Self {
        Self {
            view_requests: register_int_counter_vec!(
                "backup_monitor_view_requests_total",
                "Number of view models served, by view",
                &["view"]
            )
            .expect("Failed to register view_requests_total"),

            view_render_seconds: register_histogram_vec!(
                "backup_monitor_view_render_seconds",
                "Time spent building a view model",
                &["view"],
                RENDER_BUCKETS.to_vec()
            )
            .expect("Failed to register view_render_seconds"),

            lookup_misses: register_int_counter_vec!(
                "backup_monitor_lookup_misses_total",
                "Lookups for clusters, workflows or alerts that matched nothing",
                &["entity"]
            )
            .expect("Failed to register lookup_misses_total"),

            alerts_acknowledged: register_int_counter!(
                "backup_monitor_alerts_acknowledged_total",
                "Alerts acknowledged through the API"
            )
            .expect("Failed to register alerts_acknowledged_total"),

            active_alerts: register_int_gauge!(
                "backup_monitor_active_alerts",
                "Alerts that are not yet acknowledged"
            )
            .expect("Failed to register active_alerts"),
        }
    }
}

/// Handle to the process-wide monitor metrics
///
/// Clones share the same underlying collectors.
#[derive(Clone)]
pub struct MonitorMetrics {
    _private: (),
}

impl Default for MonitorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(MonitorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &MonitorMetricsInner {
        GLOBAL_METRICS.get_or_init(MonitorMetricsInner::new)
    }

    /// Count one served view and its build time
    pub fn observe_view(&self, view: &str, duration_secs: f64) {
        let inner = self.inner();
        inner.view_requests.with_label_values(&[view]).inc();
        inner
            .view_render_seconds
            .with_label_values(&[view])
            .observe(duration_secs);
    }

    pub fn view_requests(&self, view: &str) -> u64 {
        self.inner().view_requests.with_label_values(&[view]).get()
    }

    /// `entity` is one of "cluster", "workflow", "alert"
    pub fn inc_lookup_miss(&self, entity: &str) {
        self.inner().lookup_misses.with_label_values(&[entity]).inc();
    }

    pub fn lookup_misses(&self, entity: &str) -> u64 {
        self.inner().lookup_misses.with_label_values(&[entity]).get()
    }

    pub fn inc_alerts_acknowledged(&self) {
        self.inner().alerts_acknowledged.inc();
    }

    pub fn set_active_alerts(&self, count: i64) {
        self.inner().active_alerts.set(count);
    }

    pub fn active_alerts(&self) -> i64 {
        self.inner().active_alerts.get()
    }
}

/// Emits the monitor's significant events as structured fields
#[derive(Clone, Debug)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn log_startup(&self, version: &str, clusters: usize, workflows: usize, alerts: usize) {
        info!(
            event = "monitor_started",
            instance = %self.instance,
            version = %version,
            clusters = clusters,
            workflows = workflows,
            alerts = alerts,
            "Backup monitor started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "monitor_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Backup monitor shutting down"
        );
    }

    pub fn log_alert_acknowledged(&self, alert_id: u32, title: &str, remaining_active: usize) {
        info!(
            event = "alert_acknowledged",
            instance = %self.instance,
            alert_id = alert_id,
            title = %title,
            remaining_active = remaining_active,
            "Alert acknowledged"
        );
    }

    pub fn log_workflow_lookup_miss(&self, slug: &str) {
        warn!(
            event = "workflow_lookup_miss",
            instance = %self.instance,
            slug = %slug,
            "No workflow matches slug"
        );
    }

    pub fn log_cluster_lookup_miss(&self, cluster_id: &str) {
        warn!(
            event = "cluster_lookup_miss",
            instance = %self.instance,
            cluster_id = %cluster_id,
            "No cluster matches id"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_metrics_accumulate() {
        let metrics = MonitorMetrics::new();
        let before = metrics.view_requests("test-view");

        metrics.observe_view("test-view", 0.0002);
        metrics.observe_view("test-view", 0.0004);

        assert_eq!(metrics.view_requests("test-view"), before + 2);
    }

    #[test]
    fn test_handles_share_collectors() {
        let first = MonitorMetrics::new();
        let second = first.clone();
        let before = first.lookup_misses("test-entity");

        second.inc_lookup_miss("test-entity");
        assert_eq!(first.lookup_misses("test-entity"), before + 1);
    }

    #[test]
    fn test_structured_logger_instance() {
        let logger = StructuredLogger::new("monitor-a");
        assert_eq!(logger.instance(), "monitor-a");

        logger.log_workflow_lookup_miss("missing");
        logger.log_alert_acknowledged(1, "Storage Capacity Critical", 1);
    }
}
