//! Seed catalog of clusters, workflows and alerts
//!
//! The catalog is the only data source of the monitor. It is built once at
//! startup; afterwards the alert acknowledged flag is the only field that
//! changes.

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;
use crate::models::{
    Alert, AlertSeverity, Cluster, ClusterDetail, ClusterHealthBar, DashboardFeed, HealthStatus,
    JobActivity, JobStatus, LabeledValue, Node, NodeRole, NodeUsage, RecentJob, ReportData,
    StatCard, Trend, TrendSeries, Workflow, WorkflowStatus,
};
use crate::slug::{resolve, slugify, Resolution, SlugIndex};

/// Workflow definition before the catalog assigns its id and slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkflow {
    pub title: String,
    pub status: WorkflowStatus,
    pub backup_type: String,
    pub cluster: String,
    pub success_rate: String,
    pub schedule: String,
    pub last_run: String,
    pub duration: String,
}

/// Hardware and job data attached to one cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterInventory {
    pub cluster_id: String,
    pub hardware: Vec<Node>,
    pub component_health: Vec<NodeUsage>,
    pub job_activity: Vec<JobActivity>,
}

/// In-memory collection backing every page
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub clusters: Vec<Cluster>,
    pub inventories: Vec<ClusterInventory>,
    pub workflows: Vec<Workflow>,
    pub alerts: Vec<Alert>,
    pub dashboard: DashboardFeed,
    pub reports: ReportData,
}

impl Catalog {
    /// Give each workflow a unique id (1-based, in definition order) and its slug
    pub fn assign_workflows(definitions: Vec<NewWorkflow>) -> Vec<Workflow> {
        definitions
            .into_iter()
            .zip(1u32..)
            .map(|(def, id)| Workflow {
                id,
                slug: slugify(&def.title),
                title: def.title,
                status: def.status,
                backup_type: def.backup_type,
                cluster: def.cluster,
                success_rate: def.success_rate,
                schedule: def.schedule,
                last_run: def.last_run,
                duration: def.duration,
            })
            .collect()
    }

    /// Check catalog invariants and build the workflow slug index
    pub fn validate(&self) -> Result<SlugIndex, MonitorError> {
        SlugIndex::build(&self.workflows)
    }

    pub fn cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    /// Cluster joined with its inventory. Clusters without inventory get
    /// empty hardware, health and job lists.
    pub fn cluster_detail(&self, id: &str) -> Option<ClusterDetail> {
        let cluster = self.cluster(id)?.clone();
        let inventory = self.inventories.iter().find(|inv| inv.cluster_id == id);

        Some(ClusterDetail {
            cluster,
            hardware: inventory.map(|inv| inv.hardware.clone()).unwrap_or_default(),
            component_health: inventory
                .map(|inv| inv.component_health.clone())
                .unwrap_or_default(),
            job_activity: inventory
                .map(|inv| inv.job_activity.clone())
                .unwrap_or_default(),
        })
    }

    pub fn workflow(&self, id: u32) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.id == id)
    }

    /// Workflow routed under `slug`. Unambiguous once [`Catalog::validate`] passed.
    pub fn resolve_workflow(&self, slug: &str) -> Resolution<'_> {
        resolve(slug, &self.workflows)
    }

    pub fn alert(&self, id: u32) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    /// Mark an alert as acknowledged. Acknowledging twice is a no-op.
    pub fn acknowledge(&mut self, id: u32) -> Result<&Alert, MonitorError> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(MonitorError::AlertNotFound(id))?;
        alert.acknowledged = true;
        Ok(alert)
    }

    /// The demo data set shipped with the monitor
    pub fn seed() -> Self {
        Self {
            clusters: seed_clusters(),
            inventories: vec![seed_production_east_inventory()],
            workflows: Self::assign_workflows(seed_workflows()),
            alerts: seed_alerts(),
            dashboard: seed_dashboard(),
            reports: seed_reports(),
        }
    }
}

fn s(value: &str) -> String {
    value.to_string()
}

#[allow(clippy::too_many_arguments)]
fn cluster(
    id: &str,
    name: &str,
    location: &str,
    status: HealthStatus,
    nodes: u32,
    capacity_tb: u32,
    storage_used: u8,
    active_jobs: u32,
    last_backup: &str,
) -> Cluster {
    Cluster {
        id: s(id),
        name: s(name),
        location: s(location),
        status,
        nodes,
        capacity_tb,
        storage_used,
        active_jobs,
        last_backup: s(last_backup),
        uptime: s("99.9%"),
    }
}

fn seed_clusters() -> Vec<Cluster> {
    use HealthStatus::*;
    vec![
        cluster("production-east-01", "Production-East-01", "US East", Healthy, 4, 247, 85, 45, "2 min ago"),
        cluster("production-west-02", "Production-West-02", "US West", Healthy, 6, 382, 72, 38, "5 min ago"),
        cluster("dr-central-01", "DR-Central-01", "Central", Warning, 3, 156, 45, 23, "12 min ago"),
        cluster("dev-test-03", "Dev-Test-03", "Development", Healthy, 2, 98, 34, 12, "8 min ago"),
    ]
}

fn node(name: &str, role: NodeRole, cpu: &str, ram: &str, storage: &str, status: HealthStatus) -> Node {
    Node {
        name: s(name),
        role,
        cpu: s(cpu),
        ram: s(ram),
        storage: s(storage),
        status,
    }
}

fn usage(name: &str, cpu_percent: u8, memory_percent: u8) -> NodeUsage {
    NodeUsage {
        name: s(name),
        cpu_percent,
        memory_percent,
    }
}

fn job(id: u32, name: &str, duration: &str, status: JobStatus, time: &str) -> JobActivity {
    JobActivity {
        id,
        name: s(name),
        duration: s(duration),
        status,
        time: s(time),
    }
}

fn seed_production_east_inventory() -> ClusterInventory {
    use HealthStatus::*;
    ClusterInventory {
        cluster_id: s("production-east-01"),
        hardware: vec![
            node("node-01", NodeRole::Storage, "Intel Xeon Gold 6248", "128 GB", "48 TB", Healthy),
            node("node-02", NodeRole::Storage, "Intel Xeon Gold 6248", "128 GB", "48 TB", Healthy),
            node("node-03", NodeRole::Compute, "Intel Xeon Silver 4214", "64 GB", "2 TB", Warning),
            node("node-04", NodeRole::Management, "Intel Core i7-9700", "32 GB", "1 TB", Healthy),
        ],
        component_health: vec![
            usage("node-01", 23, 78),
            usage("node-02", 45, 65),
            usage("node-03", 67, 89),
            usage("node-04", 34, 45),
        ],
        job_activity: vec![
            job(1, "SQL Server Full Backup", "2h 15m", JobStatus::Success, "2 min ago"),
            job(2, "File Server Incremental", "Running 45m", JobStatus::Running, "In progress"),
            job(3, "VM Snapshot Backup", "1h 32m", JobStatus::Success, "25 min ago"),
            job(4, "Exchange Database Backup", "Failed at 23m", JobStatus::Failed, "1h ago"),
        ],
    }
}

#[allow(clippy::too_many_arguments)]
fn workflow(
    title: &str,
    status: WorkflowStatus,
    backup_type: &str,
    cluster: &str,
    success_rate: &str,
    schedule: &str,
    last_run: &str,
    duration: &str,
) -> NewWorkflow {
    NewWorkflow {
        title: s(title),
        status,
        backup_type: s(backup_type),
        cluster: s(cluster),
        success_rate: s(success_rate),
        schedule: s(schedule),
        last_run: s(last_run),
        duration: s(duration),
    }
}

fn seed_workflows() -> Vec<NewWorkflow> {
    use WorkflowStatus::*;
    vec![
        workflow(
            "Daily SQL Server Backup",
            Running,
            "Database Backup",
            "Production-East-01",
            "98.7%",
            "Daily at 2:00 AM",
            "2 min ago",
            "2h 15m",
        ),
        workflow(
            "File Server Incremental Sync",
            Success,
            "File Backup",
            "Production-West-02",
            "99.2%",
            "Every 4 hours",
            "1h 23m ago",
            "45m",
        ),
        workflow(
            "VM Infrastructure Snapshot",
            Failed,
            "VM Backup",
            "Production-East-01",
            "94.5%",
            "Daily at 11:00 PM",
            "3h 12m ago",
            "Failed at 1h 23m",
        ),
        workflow(
            "Exchange Email Archive",
            Scheduled,
            "Email Backup",
            "DR-Central-01",
            "97.8%",
            "Weekly on Sunday",
            "Yesterday",
            "3h 45m",
        ),
        workflow(
            "Development Code Repository",
            Success,
            "Code Backup",
            "Dev-Test-03",
            "99.9%",
            "Every 2 hours",
            "45 min ago",
            "12m",
        ),
    ]
}

fn seed_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: 1,
            title: s("High CPU Usage on Production-East-01"),
            severity: AlertSeverity::Warning,
            category: s("Performance"),
            source: s("Production-East-01 / Node-03"),
            time: s("2 min ago"),
            description: s("CPU utilization has exceeded 85% for the past 15 minutes"),
            acknowledged: false,
        },
        Alert {
            id: 2,
            title: s("Backup Job Failed"),
            severity: AlertSeverity::Critical,
            category: s("Backup"),
            source: s("Exchange Database Backup"),
            time: s("15 min ago"),
            description: s("Exchange backup failed due to insufficient storage space"),
            acknowledged: false,
        },
        Alert {
            id: 3,
            title: s("Storage Capacity Warning"),
            severity: AlertSeverity::Warning,
            category: s("Storage"),
            source: s("DR-Central-01"),
            time: s("1h ago"),
            description: s("Storage utilization is at 92% capacity"),
            acknowledged: true,
        },
    ]
}

fn card(title: &str, value: &str, change: &str, trend: Trend, chart: &[u8]) -> StatCard {
    StatCard {
        title: s(title),
        value: s(value),
        change: s(change),
        trend,
        chart: chart.to_vec(),
    }
}

fn seed_dashboard() -> DashboardFeed {
    DashboardFeed {
        stat_cards: vec![
            card("Active Clusters", "12", "+2 this week", Trend::Up, &[40, 50, 60, 80, 70, 90, 85]),
            card("Total Capacity", "847 TB", "12.3% used", Trend::Up, &[30, 40, 55, 60, 75, 65, 80]),
            card(
                "Backup Success Rate",
                "98.7%",
                "-0.3% vs last week",
                Trend::Down,
                &[80, 85, 90, 75, 88, 95, 92],
            ),
            card("Active Jobs", "247", "+15 today", Trend::Up, &[50, 60, 70, 65, 80, 75, 90]),
        ],
        recent_jobs: vec![
            RecentJob {
                title: s("SQL Server Backup"),
                time: s("2 min ago"),
                status: JobStatus::Success,
            },
            RecentJob {
                title: s("File Server Sync"),
                time: s("5 min ago"),
                status: JobStatus::Running,
            },
            RecentJob {
                title: s("VM Snapshot"),
                time: s("12 min ago"),
                status: JobStatus::Success,
            },
            RecentJob {
                title: s("Exchange Backup"),
                time: s("25 min ago"),
                status: JobStatus::Failed,
            },
        ],
    }
}

fn labeled(pairs: &[(&str, &str)]) -> Vec<LabeledValue> {
    pairs
        .iter()
        .map(|(value, label)| LabeledValue {
            label: s(label),
            value: s(value),
        })
        .collect()
}

fn series(title: &str, unit: &str, data: &[u8], values: &[(&str, &str)]) -> TrendSeries {
    TrendSeries {
        title: s(title),
        unit: s(unit),
        data: data.to_vec(),
        values: labeled(values),
    }
}

fn health_bar(name: &str, status: HealthStatus, cpu: u8, memory: u8, storage: u8) -> ClusterHealthBar {
    ClusterHealthBar {
        name: s(name),
        status,
        cpu_percent: cpu,
        memory_percent: memory,
        storage_percent: storage,
    }
}

fn seed_reports() -> ReportData {
    use HealthStatus::*;
    ReportData {
        stats: vec![
            card("Success Rate", "98.7%", "+0.5% vs last month", Trend::Up, &[]),
            card("Total Jobs", "2,847", "+12% vs last month", Trend::Up, &[]),
            card("Avg Storage", "73.2%", "+2.1% vs last month", Trend::Up, &[]),
            card("Connectivity", "99.1%", "stable", Trend::Stable, &[]),
        ],
        cpu_trend: series(
            "CPU Utilization Trends",
            "%",
            &[40, 55, 45, 60, 30, 40, 25, 35, 20, 30, 15, 25, 70, 60, 80, 50],
            &[("34", "Average"), ("67", "Peak"), ("12", "Minimum")],
        ),
        storage_trend: series(
            "Storage Capacity Trends",
            " TB",
            &[60, 70, 65, 80, 75, 85, 70, 90, 80, 85, 75, 95, 80, 88, 70, 92],
            &[("847", "Total TB"), ("620", "Used TB"), ("227", "Free TB")],
        ),
        cluster_health: vec![
            health_bar("Production-East-01", Healthy, 34, 67, 85),
            health_bar("Production-West-02", Healthy, 28, 54, 72),
            health_bar("DR-Central-01", Warning, 45, 78, 45),
            health_bar("Dev-Test-03", Healthy, 23, 41, 34),
        ],
        success_rate_trend: series(
            "Success Rate Trends",
            "%",
            &[98, 92, 95, 99, 88, 93, 97, 99, 94, 96, 98, 92, 95, 97, 99],
            &[("98.7", "This Month"), ("98.4", "Last Month"), ("97.9", "3 Months Ago")],
        ),
        job_volume_trend: series(
            "Job Volume Trends",
            "",
            &[60, 70, 65, 80, 75, 85, 70, 90, 80, 85, 75, 95, 80, 88, 70, 92],
            &[("2,847", "This Month"), ("2,534", "Last Month"), ("+12%", "Growth")],
        ),
        connectivity_trend: series(
            "Client Connectivity Trends",
            "%",
            &[30, 40, 55, 70, 60, 50, 75, 65, 80, 50, 25, 85, 90, 40, 70, 85, 50, 40],
            &[],
        ),
        connectivity_stats: labeled(&[
            ("99.1%", "Uptime"),
            ("234", "Connected"),
            ("3", "Unstable"),
            ("1", "Offline"),
        ]),
    }
}
