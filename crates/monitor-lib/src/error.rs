//! Error types for the monitor library

use thiserror::Error;

use crate::slug::SlugConflict;

/// Errors raised while building the catalog or serving a view.
///
/// A workflow that cannot be resolved by slug is not an error; it is the
/// `NotFound` state of the workflow detail view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    #[error("No cluster exists with id '{0}'")]
    ClusterNotFound(String),

    #[error("No alert exists with id {0}")]
    AlertNotFound(u32),

    #[error("Unknown tab '{tab}' for {page} (expected one of: {expected})")]
    UnknownTab {
        page: &'static str,
        tab: String,
        expected: String,
    },

    #[error("{0}")]
    SlugConflict(SlugConflict),
}

impl MonitorError {
    /// Stable machine readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            MonitorError::ClusterNotFound(_) => "CLUSTER_NOT_FOUND",
            MonitorError::AlertNotFound(_) => "ALERT_NOT_FOUND",
            MonitorError::UnknownTab { .. } => "UNKNOWN_TAB",
            MonitorError::SlugConflict(_) => "SLUG_CONFLICT",
        }
    }
}
