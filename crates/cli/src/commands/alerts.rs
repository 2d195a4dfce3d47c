//! Alert commands

use anyhow::Result;
use colored::Colorize;
use monitor_lib::views::AlertsView;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{color_status, print_json, print_rows, print_success, print_tabs, OutputFormat};

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Severity")]
    badge: String,
    #[tabled(rename = "Alert")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "When")]
    time: String,
}

/// List alerts on the active or history tab
pub async fn list(client: &ApiClient, tab: Option<String>, format: OutputFormat) -> Result<()> {
    let view = client.alerts(tab.as_deref()).await?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Table => render(&view),
    }

    Ok(())
}

fn render(view: &AlertsView) {
    let summary = &view.summary;
    println!(
        "{} critical   {} warning   {} acknowledged   avg resolution {}\n",
        summary.critical.to_string().red().bold(),
        summary.warning.to_string().yellow().bold(),
        summary.acknowledged.to_string().green(),
        view.avg_resolution
    );

    print_tabs(&view.tabs);

    print_rows(
        view.alerts
            .iter()
            .map(|a| AlertRow {
                id: a.id,
                badge: color_status(&a.badge()),
                title: a.title.clone(),
                category: a.category.clone(),
                source: a.source.clone(),
                time: a.time.clone(),
            })
            .collect(),
        "No alerts on this tab",
    );

    for alert in &view.alerts {
        println!("{} {}", format!("#{}", alert.id).dimmed(), alert.description);
    }
}

/// Acknowledge an alert, moving it to the history tab
pub async fn acknowledge(client: &ApiClient, id: u32, format: OutputFormat) -> Result<()> {
    let alert = client.acknowledge_alert(id).await?;

    match format {
        OutputFormat::Json => print_json(&alert)?,
        OutputFormat::Table => {
            print_success(&format!("Acknowledged alert #{}: {}", alert.id, alert.title));
        }
    }

    Ok(())
}
