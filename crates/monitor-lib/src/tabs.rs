//! Tab selection state for multi-view pages
//!
//! Each page owns a fixed, ordered set of tabs. Exactly one is active; the
//! first one is active until something explicitly selects another.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MonitorError;

/// A fixed set of named views on one page
pub trait Tab: Copy + Eq + fmt::Debug + 'static {
    /// Page the tabs belong to, used in error messages
    const PAGE: &'static str;

    /// Every tab in display order. Must not be empty.
    const ALL: &'static [Self];

    /// Human readable label, e.g. "Hardware Inventory"
    fn label(&self) -> &'static str;

    /// URL friendly key, e.g. "hardware-inventory"
    fn key(&self) -> String {
        crate::slug::slugify(self.label())
    }

    /// Parse a tab from either its label or its key, ignoring case
    fn parse(name: &str) -> Result<Self, MonitorError> {
        let wanted = crate::slug::slugify(name);
        Self::ALL
            .iter()
            .copied()
            .find(|tab| tab.key() == wanted)
            .ok_or_else(|| MonitorError::UnknownTab {
                page: Self::PAGE,
                tab: name.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|t| t.key())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Currently active tab of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabState<T: Tab> {
    active: T,
}

impl<T: Tab> Default for TabState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tab> TabState<T> {
    /// Start on the first enumerated tab
    pub fn new() -> Self {
        Self { active: T::ALL[0] }
    }

    /// Build the state for an optional `?tab=` selection
    pub fn from_selection(selection: Option<&str>) -> Result<Self, MonitorError> {
        let mut state = Self::new();
        if let Some(name) = selection.filter(|s| !s.trim().is_empty()) {
            state.select(T::parse(name)?);
        }
        Ok(state)
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn is_active(&self, tab: T) -> bool {
        self.active == tab
    }

    /// Make `tab` the active tab
    pub fn select(&mut self, tab: T) {
        self.active = tab;
    }

    /// Select by label or key
    pub fn select_by_name(&mut self, name: &str) -> Result<T, MonitorError> {
        let tab = T::parse(name)?;
        self.select(tab);
        Ok(tab)
    }

    /// Tab strip descriptors in display order
    pub fn strip(&self) -> Vec<TabInfo> {
        T::ALL
            .iter()
            .map(|tab| TabInfo {
                key: tab.key(),
                label: tab.label().to_string(),
                active: self.is_active(*tab),
            })
            .collect()
    }
}

/// One entry of a rendered tab strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub key: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertsTab {
    Active,
    History,
}

impl Tab for AlertsTab {
    const PAGE: &'static str = "alerts";
    const ALL: &'static [Self] = &[AlertsTab::Active, AlertsTab::History];

    fn label(&self) -> &'static str {
        match self {
            AlertsTab::Active => "Active",
            AlertsTab::History => "History",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterDetailTab {
    HardwareInventory,
    ComponentHealth,
    JobActivity,
}

impl Tab for ClusterDetailTab {
    const PAGE: &'static str = "cluster detail";
    const ALL: &'static [Self] = &[
        ClusterDetailTab::HardwareInventory,
        ClusterDetailTab::ComponentHealth,
        ClusterDetailTab::JobActivity,
    ];

    fn label(&self) -> &'static str {
        match self {
            ClusterDetailTab::HardwareInventory => "Hardware Inventory",
            ClusterDetailTab::ComponentHealth => "Component Health",
            ClusterDetailTab::JobActivity => "Job Activity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportsTab {
    HardwareHealth,
    BackupTrends,
    Connectivity,
}

impl Tab for ReportsTab {
    const PAGE: &'static str = "reports";
    const ALL: &'static [Self] = &[
        ReportsTab::HardwareHealth,
        ReportsTab::BackupTrends,
        ReportsTab::Connectivity,
    ];

    fn label(&self) -> &'static str {
        match self {
            ReportsTab::HardwareHealth => "Hardware Health",
            ReportsTab::BackupTrends => "Backup Trends",
            ReportsTab::Connectivity => "Connectivity",
        }
    }
}
