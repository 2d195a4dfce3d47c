pub mod alerts;
pub mod clusters;
pub mod dashboard;
pub mod reports;
pub mod search;
pub mod workflows;
