//! Summary counts derived from catalog slices
//!
//! Every aggregate is a single pass over its input and partitions it, so the
//! buckets of one summary always add up to the input length.

use serde::{Deserialize, Serialize};

use crate::models::{Alert, AlertSeverity, Cluster, HealthStatus, JobActivity, JobStatus, Workflow, WorkflowStatus};

/// Alert counts shown on the alerts page summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    /// Unacknowledged critical alerts
    pub critical: usize,
    /// Unacknowledged warnings
    pub warning: usize,
    pub acknowledged: usize,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut summary, alert| {
            match (alert.acknowledged, alert.severity) {
                (true, _) => summary.acknowledged += 1,
                (false, AlertSeverity::Critical) => summary.critical += 1,
                (false, AlertSeverity::Warning) => summary.warning += 1,
            }
            summary
        })
    }

    /// Alerts still waiting for acknowledgement
    pub fn active(&self) -> usize {
        self.critical + self.warning
    }

    pub fn total(&self) -> usize {
        self.active() + self.acknowledged
    }
}

/// Workflow counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStatusCounts {
    pub running: usize,
    pub success: usize,
    pub failed: usize,
    pub scheduled: usize,
}

impl WorkflowStatusCounts {
    pub fn from_workflows(workflows: &[Workflow]) -> Self {
        workflows.iter().fold(Self::default(), |mut counts, workflow| {
            *counts.slot(workflow.status) += 1;
            counts
        })
    }

    fn slot(&mut self, status: WorkflowStatus) -> &mut usize {
        match status {
            WorkflowStatus::Running => &mut self.running,
            WorkflowStatus::Success => &mut self.success,
            WorkflowStatus::Failed => &mut self.failed,
            WorkflowStatus::Scheduled => &mut self.scheduled,
        }
    }

    pub fn get(&self, status: WorkflowStatus) -> usize {
        match status {
            WorkflowStatus::Running => self.running,
            WorkflowStatus::Success => self.success,
            WorkflowStatus::Failed => self.failed,
            WorkflowStatus::Scheduled => self.scheduled,
        }
    }

    pub fn total(&self) -> usize {
        self.running + self.success + self.failed + self.scheduled
    }
}

/// Job counts for a cluster's activity feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusCounts {
    pub success: usize,
    pub running: usize,
    pub failed: usize,
}

impl JobStatusCounts {
    pub fn from_jobs(jobs: &[JobActivity]) -> Self {
        jobs.iter().fold(Self::default(), |mut counts, job| {
            match job.status {
                JobStatus::Success => counts.success += 1,
                JobStatus::Running => counts.running += 1,
                JobStatus::Failed => counts.failed += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.success + self.running + self.failed
    }
}

/// Fleet-wide figures for a list of clusters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub clusters: usize,
    pub healthy: usize,
    pub warning: usize,
    pub total_capacity_tb: u64,
    /// Capacity-weighted storage used, in percent
    pub storage_used_percent: f64,
    pub active_jobs: u64,
}

impl ClusterSummary {
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        let mut summary = Self::default();
        let mut used_tb = 0.0;

        for cluster in clusters {
            summary.clusters += 1;
            match cluster.status {
                HealthStatus::Healthy => summary.healthy += 1,
                HealthStatus::Warning => summary.warning += 1,
            }
            summary.total_capacity_tb += u64::from(cluster.capacity_tb);
            summary.active_jobs += u64::from(cluster.active_jobs);
            used_tb += f64::from(cluster.capacity_tb) * f64::from(cluster.storage_used) / 100.0;
        }

        if summary.total_capacity_tb > 0 {
            summary.storage_used_percent = used_tb / summary.total_capacity_tb as f64 * 100.0;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn alert(id: u32, severity: AlertSeverity, acknowledged: bool) -> Alert {
        Alert {
            id,
            title: format!("alert {}", id),
            severity,
            category: "Backup".to_string(),
            source: "test".to_string(),
            time: "now".to_string(),
            description: String::new(),
            acknowledged,
        }
    }

    #[test]
    fn test_alert_summary_partitions_input() {
        let alerts = vec![
            alert(1, AlertSeverity::Critical, false),
            alert(2, AlertSeverity::Warning, false),
            alert(3, AlertSeverity::Warning, true),
            alert(4, AlertSeverity::Critical, true),
            alert(5, AlertSeverity::Critical, false),
        ];

        let summary = AlertSummary::from_alerts(&alerts);
        assert_eq!(summary.critical, 2);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.acknowledged, 2);
        assert_eq!(summary.total(), alerts.len());
    }

    #[test]
    fn test_alert_summary_sums_to_len_for_every_prefix() {
        let alerts = Catalog::seed().alerts;
        for n in 0..=alerts.len() {
            assert_eq!(AlertSummary::from_alerts(&alerts[..n]).total(), n);
        }
    }

    #[test]
    fn test_alert_summary_seed() {
        let summary = AlertSummary::from_alerts(&Catalog::seed().alerts);
        assert_eq!(
            summary,
            AlertSummary {
                critical: 1,
                warning: 1,
                acknowledged: 1
            }
        );
        assert_eq!(summary.active(), 2);
    }

    #[test]
    fn test_workflow_counts_seed() {
        let counts = WorkflowStatusCounts::from_workflows(&Catalog::seed().workflows);

        assert_eq!(counts.running, 1);
        assert_eq!(counts.success, 2);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.scheduled, 1);
        assert_eq!(counts.total(), 5);
        assert_eq!(
            WorkflowStatus::ALL.iter().map(|s| counts.get(*s)).sum::<usize>(),
            counts.total()
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(AlertSummary::from_alerts(&[]).total(), 0);
        assert_eq!(WorkflowStatusCounts::from_workflows(&[]).total(), 0);
        assert_eq!(JobStatusCounts::from_jobs(&[]).total(), 0);

        let clusters = ClusterSummary::from_clusters(&[]);
        assert_eq!(clusters.clusters, 0);
        assert_eq!(clusters.storage_used_percent, 0.0);
    }

    #[test]
    fn test_cluster_summary_seed() {
        let summary = ClusterSummary::from_clusters(&Catalog::seed().clusters);

        assert_eq!(summary.clusters, 4);
        assert_eq!(summary.healthy, 3);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.total_capacity_tb, 247 + 382 + 156 + 98);
        assert_eq!(summary.active_jobs, 45 + 38 + 23 + 12);
        assert!(summary.storage_used_percent > 0.0 && summary.storage_used_percent <= 100.0);
    }

    #[test]
    fn test_job_counts() {
        let catalog = Catalog::seed();
        let detail = catalog.cluster_detail("production-east-01").unwrap();
        let counts = JobStatusCounts::from_jobs(&detail.job_activity);

        assert_eq!(counts.success, 2);
        assert_eq!(counts.running, 1);
        assert_eq!(counts.failed, 1);
    }
}
