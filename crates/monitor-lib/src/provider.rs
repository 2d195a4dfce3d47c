//! Data provider abstraction
//!
//! Views never touch the catalog directly; they go through [`DataProvider`]
//! so that a real inventory backend can replace the in-memory seed data.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::MonitorError;
use crate::filter::{global_search, SearchResults};
use crate::models::{Alert, Cluster, ClusterDetail, DashboardFeed, ReportData, Workflow};

/// Source of clusters, workflows and alerts for the views
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn list_clusters(&self) -> Vec<Cluster>;

    /// Cluster with hardware inventory, or `None` for an unknown id
    async fn get_cluster(&self, id: &str) -> Option<ClusterDetail>;

    async fn list_workflows(&self) -> Vec<Workflow>;

    /// Workflow whose slug equals `slug`, or `None` when nothing matches
    async fn get_workflow_by_slug(&self, slug: &str) -> Option<Workflow>;

    async fn list_alerts(&self) -> Vec<Alert>;

    /// Persistently acknowledge an alert and return its new state
    async fn acknowledge_alert(&self, id: u32) -> Result<Alert, MonitorError>;

    async fn dashboard_feed(&self) -> DashboardFeed;

    async fn report_data(&self) -> ReportData;

    async fn search(&self, query: &str) -> SearchResults;
}

/// Provider serving a [`Catalog`] held in memory
///
/// Clones share the same catalog, so an acknowledgement made through one
/// handle is visible through every other.
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryProvider {
    /// Validate the catalog and wrap it
    pub fn new(catalog: Catalog) -> Result<Self, MonitorError> {
        let slugs = catalog.validate()?;
        debug!(workflows = slugs.len(), "Workflow slugs validated");

        Ok(Self {
            catalog: Arc::new(RwLock::new(catalog)),
        })
    }

    /// Provider over the bundled demo data
    pub fn seeded() -> Result<Self, MonitorError> {
        Self::new(Catalog::seed())
    }

    /// Number of unacknowledged alerts
    pub async fn active_alert_count(&self) -> usize {
        self.catalog
            .read()
            .await
            .alerts
            .iter()
            .filter(|a| !a.acknowledged)
            .count()
    }
}

#[async_trait]
impl DataProvider for InMemoryProvider {
    async fn list_clusters(&self) -> Vec<Cluster> {
        self.catalog.read().await.clusters.clone()
    }

    async fn get_cluster(&self, id: &str) -> Option<ClusterDetail> {
        self.catalog.read().await.cluster_detail(id)
    }

    async fn list_workflows(&self) -> Vec<Workflow> {
        self.catalog.read().await.workflows.clone()
    }

    async fn get_workflow_by_slug(&self, slug: &str) -> Option<Workflow> {
        self.catalog
            .read()
            .await
            .resolve_workflow(slug)
            .found()
            .cloned()
    }

    async fn list_alerts(&self) -> Vec<Alert> {
        self.catalog.read().await.alerts.clone()
    }

    async fn acknowledge_alert(&self, id: u32) -> Result<Alert, MonitorError> {
        let mut catalog = self.catalog.write().await;
        catalog.acknowledge(id).cloned()
    }

    async fn dashboard_feed(&self) -> DashboardFeed {
        self.catalog.read().await.dashboard.clone()
    }

    async fn report_data(&self) -> ReportData {
        self.catalog.read().await.reports.clone()
    }

    async fn search(&self, query: &str) -> SearchResults {
        global_search(query, &*self.catalog.read().await)
    }
}
