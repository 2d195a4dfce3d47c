//! Cluster list and detail commands

use anyhow::Result;
use colored::Colorize;
use monitor_lib::views::{ClusterDetailContent, ClusterDetailView, ClustersView};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{
    color_status, print_heading, print_json, print_rows, print_tabs, usage_bar, OutputFormat,
};

#[derive(Tabled)]
struct ClusterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Nodes")]
    nodes: u32,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Storage Used")]
    storage: String,
    #[tabled(rename = "Jobs")]
    active_jobs: u32,
    #[tabled(rename = "Last Backup")]
    last_backup: String,
}

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Node")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "RAM")]
    ram: String,
    #[tabled(rename = "Storage")]
    storage: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct UsageRow {
    #[tabled(rename = "Node")]
    name: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
}

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "Job")]
    name: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Started")]
    time: String,
}

/// List clusters, optionally filtered by name or location
pub async fn list(client: &ApiClient, search: Option<String>, format: OutputFormat) -> Result<()> {
    let view = client.clusters(search.as_deref()).await?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Table => render_list(&view),
    }

    Ok(())
}

fn render_list(view: &ClustersView) {
    print_rows(
        view.clusters
            .iter()
            .map(|c| ClusterRow {
                id: c.id.clone(),
                name: c.name.clone(),
                location: c.location.clone(),
                status: color_status(&c.status.to_string()),
                nodes: c.nodes,
                capacity: format!("{} TB", c.capacity_tb),
                storage: usage_bar(c.storage_used),
                active_jobs: c.active_jobs,
                last_backup: c.last_backup.clone(),
            })
            .collect(),
        "No clusters match the search",
    );

    let summary = &view.summary;
    if summary.clusters > 0 {
        println!(
            "\nTotal: {} clusters ({} healthy, {} warning), {} TB at {:.1}% used, {} active jobs",
            summary.clusters,
            summary.healthy,
            summary.warning,
            summary.total_capacity_tb,
            summary.storage_used_percent,
            summary.active_jobs
        );
    }
}

/// Show one cluster with the selected detail tab
pub async fn show(
    client: &ApiClient,
    id: &str,
    tab: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let view = client.cluster(id, tab.as_deref()).await?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Table => render_detail(&view),
    }

    Ok(())
}

fn render_detail(view: &ClusterDetailView) {
    let cluster = &view.cluster;
    print_heading(&cluster.name);
    println!("Location:     {}", cluster.location);
    println!("Status:       {}", color_status(&cluster.status.to_string()));
    println!("Nodes:        {}", cluster.nodes);
    println!("Capacity:     {} TB", cluster.capacity_tb);
    println!("Storage:      {}", usage_bar(cluster.storage_used));
    println!("Uptime:       {}", cluster.uptime);
    println!("Last backup:  {}", cluster.last_backup.dimmed());
    println!();

    print_tabs(&view.tabs);

    match &view.content {
        ClusterDetailContent::HardwareInventory(nodes) => print_rows(
            nodes
                .iter()
                .map(|n| NodeRow {
                    name: n.name.clone(),
                    role: n.role.to_string(),
                    cpu: n.cpu.clone(),
                    ram: n.ram.clone(),
                    storage: n.storage.clone(),
                    status: color_status(&n.status.to_string()),
                })
                .collect(),
            "No hardware inventory for this cluster",
        ),
        ClusterDetailContent::ComponentHealth(usage) => print_rows(
            usage
                .iter()
                .map(|u| UsageRow {
                    name: u.name.clone(),
                    cpu: usage_bar(u.cpu_percent),
                    memory: usage_bar(u.memory_percent),
                })
                .collect(),
            "No component health data for this cluster",
        ),
        ClusterDetailContent::JobActivity { jobs, counts } => {
            print_rows(
                jobs.iter()
                    .map(|j| JobRow {
                        name: j.name.clone(),
                        duration: j.duration.clone(),
                        status: color_status(&j.status.to_string()),
                        time: j.time.clone(),
                    })
                    .collect(),
                "No recent jobs on this cluster",
            );
            if counts.total() > 0 {
                println!(
                    "\n{} success   {} running   {} failed",
                    counts.success.to_string().green(),
                    counts.running.to_string().blue(),
                    counts.failed.to_string().red()
                );
            }
        }
    }
}
