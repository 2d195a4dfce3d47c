//! Dashboard overview command

use anyhow::Result;
use colored::Colorize;
use monitor_lib::views::DashboardView;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{
    color_status, format_change, print_heading, print_json, print_rows, usage_bar, OutputFormat,
};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    title: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Change")]
    change: String,
}

#[derive(Tabled)]
struct ClusterHealthRow {
    #[tabled(rename = "Cluster")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Active Jobs")]
    active_jobs: u32,
    #[tabled(rename = "Storage")]
    storage: String,
}

#[derive(Tabled)]
struct RecentJobRow {
    #[tabled(rename = "Job")]
    title: String,
    #[tabled(rename = "When")]
    time: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Show the dashboard overview
pub async fn show(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let view = client.dashboard().await?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Table => render(&view),
    }

    Ok(())
}

fn render(view: &DashboardView) {
    print_heading("Infrastructure Overview");
    println!(
        "Clusters: {}   Workflows: {}   Active alerts: {}\n",
        view.navigation.clusters,
        view.navigation.workflows,
        if view.navigation.active_alerts > 0 {
            view.navigation.active_alerts.to_string().red().bold()
        } else {
            view.navigation.active_alerts.to_string().green()
        }
    );

    print_rows(
        view.stat_cards
            .iter()
            .map(|c| StatRow {
                title: c.title.clone(),
                value: c.value.bold().to_string(),
                change: format_change(&c.change, c.trend),
            })
            .collect(),
        "No statistics available",
    );

    println!("\n{}", "Cluster Health".bold());
    print_rows(
        view.cluster_health
            .iter()
            .map(|c| ClusterHealthRow {
                name: c.name.clone(),
                status: color_status(&c.status.to_string()),
                active_jobs: c.active_jobs,
                storage: usage_bar(c.storage_used),
            })
            .collect(),
        "No clusters found",
    );

    let status = &view.backup_status;
    println!("\n{}", "Backup Status".bold());
    println!(
        "{} running   {} success   {} failed   {} scheduled",
        status.running.to_string().blue(),
        status.success.to_string().green(),
        status.failed.to_string().red(),
        status.scheduled
    );

    println!("\n{}", "Recent Jobs".bold());
    print_rows(
        view.recent_jobs
            .iter()
            .map(|j| RecentJobRow {
                title: j.title.clone(),
                time: j.time.clone(),
                status: color_status(&j.status.to_string()),
            })
            .collect(),
        "No recent jobs",
    );
}
