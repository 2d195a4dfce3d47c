//! Backup monitor service: view model API over the monitor catalog

pub mod api;
pub mod config;
