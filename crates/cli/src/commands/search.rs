//! Global search across clusters, workflows and alerts

use anyhow::Result;
use colored::Colorize;
use monitor_lib::filter::SearchResults;

use crate::client::ApiClient;
use crate::output::{color_status, print_info, print_json, print_warning, OutputFormat};

pub async fn run(client: &ApiClient, query: &str, format: OutputFormat) -> Result<()> {
    let results = client.search(query).await?;

    match format {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Table => render(&results),
    }

    Ok(())
}

fn render(results: &SearchResults) {
    if results.total() == 0 {
        print_warning("Nothing matches the search");
        return;
    }

    print_info(&format!("{} results for '{}'", results.total(), results.query));

    if !results.clusters.is_empty() {
        println!("\n{}", "Clusters".bold());
        for c in &results.clusters {
            println!("  {}  {} ({})", color_status(&c.status.to_string()), c.name, c.location.dimmed());
        }
    }

    if !results.workflows.is_empty() {
        println!("\n{}", "Workflows".bold());
        for w in &results.workflows {
            println!("  {}  {} {}", color_status(w.status.as_str()), w.title, w.slug.dimmed());
        }
    }

    if !results.alerts.is_empty() {
        println!("\n{}", "Alerts".bold());
        for a in &results.alerts {
            println!("  {}  #{} {} ({})", color_status(&a.badge()), a.id, a.title, a.source.dimmed());
        }
    }
}
