//! Page view models
//!
//! Each function here derives everything one page renders from a
//! [`DataProvider`]. Derivation is pure apart from the provider reads.

use serde::{Deserialize, Serialize};

use crate::aggregate::{AlertSummary, ClusterSummary, JobStatusCounts, WorkflowStatusCounts};
use crate::error::MonitorError;
use crate::filter::search;
use crate::models::{
    Alert, Cluster, ClusterHealthBar, HealthStatus, JobActivity, LabeledValue, Node, NodeUsage,
    RecentJob, StatCard, TrendSeries, Workflow, WorkflowStatus,
};
use crate::provider::DataProvider;
use crate::tabs::{AlertsTab, ClusterDetailTab, ReportsTab, TabInfo, TabState};

/// Message rendered when a workflow slug does not resolve
pub const WORKFLOW_NOT_FOUND: &str = "Workflow not found";

/// Shown under the "Avg Resolution" card; there is no resolution history
/// to compute it from.
pub const AVG_RESOLUTION: &str = "45m";

/// Badge counts next to the sidebar navigation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCounts {
    pub clusters: usize,
    pub workflows: usize,
    pub active_alerts: usize,
}

/// One row of the dashboard's cluster health summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterHealthItem {
    pub id: String,
    pub name: String,
    pub status: HealthStatus,
    pub active_jobs: u32,
    pub storage_used: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub stat_cards: Vec<StatCard>,
    pub cluster_health: Vec<ClusterHealthItem>,
    pub backup_status: WorkflowStatusCounts,
    pub recent_jobs: Vec<RecentJob>,
    pub navigation: NavigationCounts,
}

pub async fn dashboard<P: DataProvider + ?Sized>(provider: &P) -> DashboardView {
    let feed = provider.dashboard_feed().await;
    let clusters = provider.list_clusters().await;
    let workflows = provider.list_workflows().await;
    let alerts = provider.list_alerts().await;

    DashboardView {
        stat_cards: feed.stat_cards,
        cluster_health: clusters
            .iter()
            .map(|c| ClusterHealthItem {
                id: c.id.clone(),
                name: c.name.clone(),
                status: c.status,
                active_jobs: c.active_jobs,
                storage_used: c.storage_used,
            })
            .collect(),
        backup_status: WorkflowStatusCounts::from_workflows(&workflows),
        recent_jobs: feed.recent_jobs,
        navigation: NavigationCounts {
            clusters: clusters.len(),
            workflows: workflows.len(),
            active_alerts: AlertSummary::from_alerts(&alerts).active(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClustersView {
    pub query: String,
    pub clusters: Vec<Cluster>,
    /// Figures over the filtered clusters
    pub summary: ClusterSummary,
}

pub async fn clusters<P: DataProvider + ?Sized>(provider: &P, query: &str) -> ClustersView {
    let all = provider.list_clusters().await;
    let matched: Vec<Cluster> = search(query, &all).into_iter().cloned().collect();

    ClustersView {
        query: query.to_string(),
        summary: ClusterSummary::from_clusters(&matched),
        clusters: matched,
    }
}

/// Payload of the active cluster detail tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tab", content = "data", rename_all = "kebab-case")]
pub enum ClusterDetailContent {
    HardwareInventory(Vec<Node>),
    ComponentHealth(Vec<NodeUsage>),
    JobActivity {
        jobs: Vec<JobActivity>,
        counts: JobStatusCounts,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterDetailView {
    pub cluster: Cluster,
    pub tab: ClusterDetailTab,
    pub tabs: Vec<TabInfo>,
    pub content: ClusterDetailContent,
}

pub async fn cluster_detail<P: DataProvider + ?Sized>(
    provider: &P,
    cluster_id: &str,
    tabs: TabState<ClusterDetailTab>,
) -> Result<ClusterDetailView, MonitorError> {
    let detail = provider
        .get_cluster(cluster_id)
        .await
        .ok_or_else(|| MonitorError::ClusterNotFound(cluster_id.to_string()))?;

    let content = match tabs.active() {
        ClusterDetailTab::HardwareInventory => ClusterDetailContent::HardwareInventory(detail.hardware),
        ClusterDetailTab::ComponentHealth => {
            ClusterDetailContent::ComponentHealth(detail.component_health)
        }
        ClusterDetailTab::JobActivity => ClusterDetailContent::JobActivity {
            counts: JobStatusCounts::from_jobs(&detail.job_activity),
            jobs: detail.job_activity,
        },
    };

    Ok(ClusterDetailView {
        cluster: detail.cluster,
        tab: tabs.active(),
        tabs: tabs.strip(),
        content,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowsView {
    pub query: String,
    pub workflows: Vec<Workflow>,
    /// Status counts over the filtered workflows
    pub counts: WorkflowStatusCounts,
}

pub async fn workflows<P: DataProvider + ?Sized>(provider: &P, query: &str) -> WorkflowsView {
    let all = provider.list_workflows().await;
    let matched: Vec<Workflow> = search(query, &all).into_iter().cloned().collect();

    WorkflowsView {
        query: query.to_string(),
        counts: WorkflowStatusCounts::from_workflows(&matched),
        workflows: matched,
    }
}

/// Execution of a workflow in its run history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentRun {
    pub id: u32,
    pub time: String,
    pub status: WorkflowStatus,
    pub duration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Success,
    Running,
    Failed,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfiguration {
    pub destination: String,
    pub retention_policy: String,
    pub encryption: String,
    pub exclusions: String,
}

impl Default for WorkflowConfiguration {
    fn default() -> Self {
        Self {
            destination: "Object Storage (S3-compatible)".to_string(),
            retention_policy: "30 daily, 12 monthly, 7 yearly".to_string(),
            encryption: "AES-256, KMS-managed".to_string(),
            exclusions: "Temp files, node_modules".to_string(),
        }
    }
}

/// Workflow detail page, including its explicit empty state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkflowDetailView {
    Found {
        workflow: Workflow,
        recent_runs: Vec<RecentRun>,
        steps: Vec<WorkflowStep>,
        configuration: WorkflowConfiguration,
    },
    NotFound {
        slug: String,
        message: String,
    },
}

impl WorkflowDetailView {
    pub fn is_found(&self) -> bool {
        matches!(self, WorkflowDetailView::Found { .. })
    }
}

/// Run history shown for a workflow; a running workflow gets an
/// in-progress entry on top.
pub fn recent_runs(status: WorkflowStatus) -> Vec<RecentRun> {
    let run = |id, time: &str, status, duration: &str| RecentRun {
        id,
        time: time.to_string(),
        status,
        duration: duration.to_string(),
    };

    let mut runs = vec![
        run(1, "Today, 02:00 AM", WorkflowStatus::Success, "2h 12m"),
        run(2, "Yesterday, 02:00 AM", WorkflowStatus::Success, "2h 05m"),
        run(3, "2 days ago, 02:00 AM", WorkflowStatus::Failed, "1h 23m"),
    ];
    if status == WorkflowStatus::Running {
        runs.insert(0, run(0, "In progress", WorkflowStatus::Running, "1h 07m"));
    }
    runs.truncate(4);
    runs
}

/// Pipeline steps with their status implied by the workflow status
pub fn workflow_steps(status: WorkflowStatus) -> Vec<WorkflowStep> {
    let step = |name: &str, status| WorkflowStep {
        name: name.to_string(),
        status,
    };

    vec![
        step("Pre-checks", StepStatus::Success),
        step(
            "Snapshot",
            if status == WorkflowStatus::Running {
                StepStatus::Running
            } else {
                StepStatus::Success
            },
        ),
        step(
            "Transfer",
            if status == WorkflowStatus::Failed {
                StepStatus::Failed
            } else {
                StepStatus::Success
            },
        ),
        step(
            "Verification",
            if status == WorkflowStatus::Success {
                StepStatus::Success
            } else {
                StepStatus::Pending
            },
        ),
    ]
}

pub async fn workflow_detail<P: DataProvider + ?Sized>(provider: &P, slug: &str) -> WorkflowDetailView {
    match provider.get_workflow_by_slug(slug).await {
        Some(workflow) => WorkflowDetailView::Found {
            recent_runs: recent_runs(workflow.status),
            steps: workflow_steps(workflow.status),
            configuration: WorkflowConfiguration::default(),
            workflow,
        },
        None => WorkflowDetailView::NotFound {
            slug: slug.to_string(),
            message: WORKFLOW_NOT_FOUND.to_string(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsView {
    pub tab: AlertsTab,
    pub tabs: Vec<TabInfo>,
    /// Counts over all alerts, independent of the active tab
    pub summary: AlertSummary,
    pub avg_resolution: String,
    pub alerts: Vec<Alert>,
}

pub async fn alerts<P: DataProvider + ?Sized>(provider: &P, tabs: TabState<AlertsTab>) -> AlertsView {
    let all = provider.list_alerts().await;
    let summary = AlertSummary::from_alerts(&all);
    let show_acknowledged = tabs.active() == AlertsTab::History;

    AlertsView {
        tab: tabs.active(),
        tabs: tabs.strip(),
        summary,
        avg_resolution: AVG_RESOLUTION.to_string(),
        alerts: all
            .into_iter()
            .filter(|a| a.acknowledged == show_acknowledged)
            .collect(),
    }
}

/// Payload of the active reports tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tab", rename_all = "kebab-case")]
pub enum ReportContent {
    HardwareHealth {
        cpu: TrendSeries,
        storage: TrendSeries,
        clusters: Vec<ClusterHealthBar>,
    },
    BackupTrends {
        success_rate: TrendSeries,
        job_volume: TrendSeries,
    },
    Connectivity {
        trend: TrendSeries,
        stats: Vec<LabeledValue>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsView {
    pub tab: ReportsTab,
    pub tabs: Vec<TabInfo>,
    pub stats: Vec<StatCard>,
    pub content: ReportContent,
}

pub async fn reports<P: DataProvider + ?Sized>(provider: &P, tabs: TabState<ReportsTab>) -> ReportsView {
    let data = provider.report_data().await;

    let content = match tabs.active() {
        ReportsTab::HardwareHealth => ReportContent::HardwareHealth {
            cpu: data.cpu_trend,
            storage: data.storage_trend,
            clusters: data.cluster_health,
        },
        ReportsTab::BackupTrends => ReportContent::BackupTrends {
            success_rate: data.success_rate_trend,
            job_volume: data.job_volume_trend,
        },
        ReportsTab::Connectivity => ReportContent::Connectivity {
            trend: data.connectivity_trend,
            stats: data.connectivity_stats,
        },
    };

    ReportsView {
        tab: tabs.active(),
        tabs: tabs.strip(),
        stats: data.stats,
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::InMemoryProvider;

    fn provider() -> InMemoryProvider {
        InMemoryProvider::seeded().unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_derives_counts() {
        let view = dashboard(&provider()).await;

        assert_eq!(view.stat_cards.len(), 4);
        assert_eq!(view.cluster_health.len(), 4);
        assert_eq!(view.backup_status.total(), 5);
        assert_eq!(view.recent_jobs.len(), 4);
        assert_eq!(
            view.navigation,
            NavigationCounts {
                clusters: 4,
                workflows: 5,
                active_alerts: 2
            }
        );
    }

    #[tokio::test]
    async fn test_clusters_filtered_by_location() {
        let view = clusters(&provider(), "west").await;

        assert_eq!(view.clusters.len(), 1);
        assert_eq!(view.clusters[0].location, "US West");
        assert_eq!(view.summary.clusters, 1);
        assert_eq!(view.summary.total_capacity_tb, 382);
    }

    #[tokio::test]
    async fn test_clusters_empty_query_lists_all() {
        let view = clusters(&provider(), "").await;
        assert_eq!(view.clusters.len(), 4);
        assert_eq!(view.clusters[0].id, "production-east-01");
    }

    #[tokio::test]
    async fn test_cluster_detail_default_tab() {
        let view = cluster_detail(&provider(), "production-east-01", TabState::new())
            .await
            .unwrap();

        assert_eq!(view.tab, ClusterDetailTab::HardwareInventory);
        match view.content {
            ClusterDetailContent::HardwareInventory(nodes) => assert_eq!(nodes.len(), 4),
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cluster_detail_job_activity_tab() {
        let mut tabs = TabState::<ClusterDetailTab>::new();
        tabs.select(ClusterDetailTab::JobActivity);
        let view = cluster_detail(&provider(), "production-east-01", tabs)
            .await
            .unwrap();

        match view.content {
            ClusterDetailContent::JobActivity { jobs, counts } => {
                assert_eq!(jobs.len(), 4);
                assert_eq!(counts.total(), 4);
                assert_eq!(counts.failed, 1);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cluster_detail_unknown_id() {
        let err = cluster_detail(&provider(), "nowhere", TabState::new())
            .await
            .unwrap_err();
        assert_eq!(err, MonitorError::ClusterNotFound("nowhere".to_string()));
    }

    #[tokio::test]
    async fn test_workflow_detail_found() {
        let view = workflow_detail(&provider(), "daily-sql-server-backup").await;

        match view {
            WorkflowDetailView::Found {
                workflow,
                recent_runs,
                steps,
                ..
            } => {
                assert_eq!(workflow.status, WorkflowStatus::Running);
                assert_eq!(recent_runs.len(), 4);
                assert_eq!(recent_runs[0].status, WorkflowStatus::Running);
                assert_eq!(steps[1].status, StepStatus::Running);
                assert_eq!(steps[3].status, StepStatus::Pending);
            }
            other => panic!("expected workflow, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_workflow_detail_not_found() {
        let view = workflow_detail(&provider(), "no-such-workflow").await;

        assert!(!view.is_found());
        assert_eq!(
            view,
            WorkflowDetailView::NotFound {
                slug: "no-such-workflow".to_string(),
                message: WORKFLOW_NOT_FOUND.to_string(),
            }
        );
    }

    #[test]
    fn test_steps_follow_status() {
        let failed = workflow_steps(WorkflowStatus::Failed);
        assert_eq!(failed[2].status, StepStatus::Failed);
        assert_eq!(failed[3].status, StepStatus::Pending);

        let success = workflow_steps(WorkflowStatus::Success);
        assert!(success.iter().all(|s| s.status == StepStatus::Success));

        assert_eq!(recent_runs(WorkflowStatus::Scheduled).len(), 3);
    }

    #[tokio::test]
    async fn test_alert_tabs_split_by_acknowledged() {
        let provider = provider();

        let active = alerts(&provider, TabState::new()).await;
        let ids: Vec<u32> = active.alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let history = alerts(&provider, TabState::from_selection(Some("history")).unwrap()).await;
        let ids: Vec<u32> = history.alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3]);

        assert_eq!(active.summary, history.summary);
        assert_eq!(active.summary.total(), 3);
    }

    #[tokio::test]
    async fn test_alert_tabs_with_critical_and_acknowledged() {
        use crate::catalog::Catalog;
        use crate::models::AlertSeverity;

        let alert = |id, severity, acknowledged| Alert {
            id,
            title: format!("Alert {}", id),
            severity,
            category: "Storage".to_string(),
            source: "DR-Central-01".to_string(),
            time: "1h ago".to_string(),
            description: "Storage utilization is high".to_string(),
            acknowledged,
        };
        let mut catalog = Catalog::seed();
        catalog.alerts = vec![
            alert(1, AlertSeverity::Critical, false),
            alert(3, AlertSeverity::Warning, true),
        ];
        let provider = InMemoryProvider::new(catalog).unwrap();

        let active = alerts(&provider, TabState::new()).await;
        let ids: Vec<u32> = active.alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);

        let history = alerts(&provider, TabState::from_selection(Some("history")).unwrap()).await;
        let ids: Vec<u32> = history.alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3]);

        assert_eq!(active.summary.critical, 1);
        assert_eq!(active.summary.warning, 0);
        assert_eq!(active.summary.acknowledged, 1);
    }

    #[tokio::test]
    async fn test_acknowledged_alert_moves_to_history() {
        let provider = provider();
        provider.acknowledge_alert(1).await.unwrap();

        let active = alerts(&provider, TabState::new()).await;
        assert_eq!(active.alerts.len(), 1);
        assert_eq!(active.alerts[0].id, 2);

        let history = alerts(&provider, TabState::from_selection(Some("history")).unwrap()).await;
        assert_eq!(history.alerts.len(), 2);
        assert_eq!(history.summary.acknowledged, 2);
    }

    #[tokio::test]
    async fn test_reports_tabs() {
        let provider = provider();

        let view = reports(&provider, TabState::new()).await;
        assert!(matches!(view.content, ReportContent::HardwareHealth { .. }));
        assert_eq!(view.stats.len(), 4);

        let view = reports(&provider, TabState::from_selection(Some("connectivity")).unwrap()).await;
        match view.content {
            ReportContent::Connectivity { stats, .. } => assert_eq!(stats.len(), 4),
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_view_json_shape() {
        let provider = provider();

        let missing = serde_json::to_value(workflow_detail(&provider, "nope").await).unwrap();
        assert_eq!(
            missing,
            serde_json::json!({
                "state": "not_found",
                "slug": "nope",
                "message": "Workflow not found"
            })
        );

        let mut tabs = TabState::<ClusterDetailTab>::new();
        tabs.select(ClusterDetailTab::ComponentHealth);
        let detail = cluster_detail(&provider, "production-east-01", tabs).await.unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["tab"], "component-health");
        assert_eq!(json["content"]["tab"], "component-health");
        assert!(json["content"]["data"].is_array());
        assert_eq!(json["cluster"]["status"], "Healthy");
    }
}
