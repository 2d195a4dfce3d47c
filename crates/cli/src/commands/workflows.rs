//! Workflow list and detail commands

use anyhow::Result;
use colored::Colorize;
use monitor_lib::views::{StepStatus, WorkflowDetailView, WorkflowsView};
use monitor_lib::WorkflowStatus;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{color_status, print_heading, print_json, print_rows, print_warning, OutputFormat};

#[derive(Tabled)]
struct WorkflowRow {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Workflow")]
    title: String,
    #[tabled(rename = "Type")]
    backup_type: String,
    #[tabled(rename = "Cluster")]
    cluster: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Success")]
    success_rate: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Last Run")]
    last_run: String,
}

#[derive(Tabled)]
struct RunRow {
    #[tabled(rename = "Run")]
    time: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Duration")]
    duration: String,
}

/// List workflows, optionally filtered by title, type, cluster or status
pub async fn list(client: &ApiClient, search: Option<String>, format: OutputFormat) -> Result<()> {
    let view = client.workflows(search.as_deref()).await?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Table => render_list(&view),
    }

    Ok(())
}

fn render_list(view: &WorkflowsView) {
    print_rows(
        view.workflows
            .iter()
            .map(|w| WorkflowRow {
                slug: w.slug.clone(),
                title: w.title.clone(),
                backup_type: w.backup_type.clone(),
                cluster: w.cluster.clone(),
                status: color_status(w.status.as_str()),
                success_rate: w.success_rate.clone(),
                schedule: w.schedule.clone(),
                last_run: w.last_run.clone(),
            })
            .collect(),
        "No workflows match the search",
    );

    if view.counts.total() > 0 {
        let breakdown: Vec<String> = WorkflowStatus::ALL
            .iter()
            .filter(|s| view.counts.get(**s) > 0)
            .map(|s| format!("{} {}", view.counts.get(*s), s.as_str().to_lowercase()))
            .collect();
        println!("\nTotal: {} workflows ({})", view.counts.total(), breakdown.join(", "));
    }
}

/// Show a workflow by slug; an unknown slug prints the not-found state
pub async fn show(client: &ApiClient, slug: &str, format: OutputFormat) -> Result<()> {
    let view = client.workflow(slug).await?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Table => render_detail(&view),
    }

    Ok(())
}

fn step_marker(status: StepStatus) -> String {
    match status {
        StepStatus::Success => "●".green().to_string(),
        StepStatus::Running => "◐".blue().to_string(),
        StepStatus::Failed => "✗".red().to_string(),
        StepStatus::Pending => "○".dimmed().to_string(),
    }
}

fn render_detail(view: &WorkflowDetailView) {
    match view {
        WorkflowDetailView::NotFound { slug, message } => {
            print_warning(&format!("{}: '{}'", message, slug));
        }
        WorkflowDetailView::Found {
            workflow,
            recent_runs,
            steps,
            configuration,
        } => {
            print_heading(&workflow.title);
            println!("Status:        {}", color_status(workflow.status.as_str()));
            println!("Type:          {}", workflow.backup_type);
            println!("Cluster:       {}", workflow.cluster);
            println!("Schedule:      {}", workflow.schedule);
            println!("Success rate:  {}", workflow.success_rate);
            println!("Last run:      {} ({})", workflow.last_run, workflow.duration);
            println!();

            let pipeline: Vec<String> = steps
                .iter()
                .map(|s| format!("{} {}", step_marker(s.status), s.name))
                .collect();
            println!("{}", "Pipeline".bold());
            println!("{}\n", pipeline.join("  →  "));

            println!("{}", "Recent Runs".bold());
            print_rows(
                recent_runs
                    .iter()
                    .map(|r| RunRow {
                        time: r.time.clone(),
                        status: color_status(r.status.as_str()),
                        duration: r.duration.clone(),
                    })
                    .collect(),
                "No runs recorded",
            );

            println!("\n{}", "Configuration".bold());
            println!("Destination:   {}", configuration.destination);
            println!("Retention:     {}", configuration.retention_policy);
            println!("Encryption:    {}", configuration.encryption);
            println!("Exclusions:    {}", configuration.exclusions);
        }
    }
}
