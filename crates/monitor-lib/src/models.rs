//! Core data models for the backup monitor
//!
//! Every entity is seeded once at startup and only read afterwards, with the
//! exception of the alert acknowledged flag. Relationships between entities
//! are plain display strings (a workflow names its cluster, an alert names
//! its source) rather than checked foreign keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health status of a cluster or a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Warning,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "Healthy"),
            HealthStatus::Warning => write!(f, "Warning"),
        }
    }
}

/// Backup cluster as shown on the clusters list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: HealthStatus,
    pub nodes: u32,
    /// Raw capacity in TB
    pub capacity_tb: u32,
    /// Percentage in `[0, 100]`
    pub storage_used: u8,
    pub active_jobs: u32,
    pub last_backup: String,
    pub uptime: String,
}

/// Role a node plays inside its cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    Storage,
    Compute,
    Management,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Storage => write!(f, "Storage Node"),
            NodeRole::Compute => write!(f, "Compute Node"),
            NodeRole::Management => write!(f, "Management Node"),
        }
    }
}

/// Hardware inventory entry of a cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub role: NodeRole,
    pub cpu: String,
    pub ram: String,
    pub storage: String,
    pub status: HealthStatus,
}

/// Live utilization of a single node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeUsage {
    pub name: String,
    pub cpu_percent: u8,
    pub memory_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Success,
    Running,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Success => write!(f, "Success"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Recent backup job executed on a cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobActivity {
    pub id: u32,
    pub name: String,
    pub duration: String,
    pub status: JobStatus,
    pub time: String,
}

/// Everything the cluster detail page knows about one cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterDetail {
    pub cluster: Cluster,
    pub hardware: Vec<Node>,
    pub component_health: Vec<NodeUsage>,
    pub job_activity: Vec<JobActivity>,
}

/// Lifecycle status of a backup workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowStatus {
    Running,
    Success,
    Failed,
    Scheduled,
}

impl WorkflowStatus {
    pub const ALL: [WorkflowStatus; 4] = [
        WorkflowStatus::Running,
        WorkflowStatus::Success,
        WorkflowStatus::Failed,
        WorkflowStatus::Scheduled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Running => "Running",
            WorkflowStatus::Success => "Success",
            WorkflowStatus::Failed => "Failed",
            WorkflowStatus::Scheduled => "Scheduled",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduled backup workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique id assigned when the catalog is built
    pub id: u32,
    /// URL key derived from the title
    pub slug: String,
    pub title: String,
    pub status: WorkflowStatus,
    pub backup_type: String,
    /// Display name of the owning cluster
    pub cluster: String,
    pub success_rate: String,
    pub schedule: String,
    pub last_run: String,
    pub duration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertSeverity {
    Critical,
    Warning,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Critical => write!(f, "Critical"),
            AlertSeverity::Warning => write!(f, "Warning"),
        }
    }
}

/// System alert raised against a cluster, node or workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    pub title: String,
    pub severity: AlertSeverity,
    pub category: String,
    pub source: String,
    pub time: String,
    pub description: String,
    pub acknowledged: bool,
}

impl Alert {
    /// Label shown on the alert badge
    pub fn badge(&self) -> String {
        if self.acknowledged {
            "Acknowledged".to_string()
        } else {
            self.severity.to_string()
        }
    }
}

/// Direction of a stat card's change indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Summary tile shown at the top of the dashboard and reports pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub trend: Trend,
    /// Sparkline points in `[0, 100]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chart: Vec<u8>,
}

/// Entry in the dashboard's recent jobs feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentJob {
    pub title: String,
    pub time: String,
    pub status: JobStatus,
}

/// Static content backing the dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFeed {
    pub stat_cards: Vec<StatCard>,
    pub recent_jobs: Vec<RecentJob>,
}

/// Labelled value under a trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

/// Bar chart series on the reports page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub title: String,
    pub unit: String,
    pub data: Vec<u8>,
    pub values: Vec<LabeledValue>,
}

/// Per-cluster resource bars on the hardware health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterHealthBar {
    pub name: String,
    pub status: HealthStatus,
    pub cpu_percent: u8,
    pub memory_percent: u8,
    pub storage_percent: u8,
}

/// Static content backing the reports page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub stats: Vec<StatCard>,
    pub cpu_trend: TrendSeries,
    pub storage_trend: TrendSeries,
    pub cluster_health: Vec<ClusterHealthBar>,
    pub success_rate_trend: TrendSeries,
    pub job_volume_trend: TrendSeries,
    pub connectivity_trend: TrendSeries,
    pub connectivity_stats: Vec<LabeledValue>,
}
