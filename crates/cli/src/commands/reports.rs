//! Reports command

use anyhow::Result;
use colored::Colorize;
use monitor_lib::views::{ReportContent, ReportsView};
use monitor_lib::{LabeledValue, TrendSeries};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{
    color_status, format_change, print_json, print_rows, print_tabs, usage_bar, OutputFormat,
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
struct ClusterBarRow {
    #[tabled(rename = "Cluster")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Storage")]
    storage: String,
}

/// Show the reports page on the selected tab
pub async fn show(client: &ApiClient, tab: Option<String>, format: OutputFormat) -> Result<()> {
    let view = client.reports(tab.as_deref()).await?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Table => render(&view),
    }

    Ok(())
}

fn print_series(series: &TrendSeries) {
    println!("\n{} ({})", series.title.bold(), series.unit);
    for point in &series.data {
        println!("  {}", usage_bar(*point));
    }
    print_values(&series.values);
}

fn print_values(values: &[LabeledValue]) {
    let line: Vec<String> = values
        .iter()
        .map(|v| format!("{}: {}", v.label.dimmed(), v.value))
        .collect();
    if !line.is_empty() {
        println!("  {}", line.join("   "));
    }
}

fn render(view: &ReportsView) {
    print_rows(
        view.stats
            .iter()
            .map(|c| StatRow {
                title: c.title.clone(),
                value: c.value.bold().to_string(),
                change: format_change(&c.change, c.trend),
            })
            .collect(),
        "No statistics available",
    );
    println!();
    print_tabs(&view.tabs);

    match &view.content {
        ReportContent::HardwareHealth {
            cpu,
            storage,
            clusters,
        } => {
            print_series(cpu);
            print_series(storage);
            println!();
            print_rows(
                clusters
                    .iter()
                    .map(|c| ClusterBarRow {
                        name: c.name.clone(),
                        status: color_status(&c.status.to_string()),
                        cpu: usage_bar(c.cpu_percent),
                        memory: usage_bar(c.memory_percent),
                        storage: usage_bar(c.storage_percent),
                    })
                    .collect(),
                "No cluster health data",
            );
        }
        ReportContent::BackupTrends {
            success_rate,
            job_volume,
        } => {
            print_series(success_rate);
            print_series(job_volume);
        }
        ReportContent::Connectivity { trend, stats } => {
            print_series(trend);
            println!();
            print_values(stats);
        }
    }
}
