//! Core library for the backup infrastructure monitor
//!
//! This crate provides:
//! - The cluster, workflow and alert data model with its seed catalog
//! - Slug derivation and workflow lookup
//! - Search filtering and summary aggregation
//! - Tab state and the view models served by the API
//! - Health checks and observability

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod health;
pub mod models;
pub mod observability;
pub mod provider;
pub mod slug;
pub mod tabs;
pub mod views;

pub use error::MonitorError;
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{MonitorMetrics, StructuredLogger};
pub use provider::{DataProvider, InMemoryProvider};
pub use tabs::{AlertsTab, ClusterDetailTab, ReportsTab, Tab, TabInfo, TabState};
