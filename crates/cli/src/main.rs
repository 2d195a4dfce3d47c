//! Backup Monitor CLI
//!
//! A command-line client for the backup monitor: the dashboard overview,
//! clusters, workflows, alerts and reports, rendered as tables or JSON.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{alerts, clusters, dashboard, reports, search, workflows};

/// Backup Monitor CLI
#[derive(Parser)]
#[command(name = "bmon")]
#[command(author, version, about = "CLI for the Backup Infrastructure Monitor", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via BMON_API_URL env var)
    #[arg(long, env = "BMON_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short, global = true)]
    pub format: Option<output::OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the infrastructure overview
    Dashboard,

    /// Browse backup clusters
    #[command(subcommand)]
    Clusters(ClustersCommands),

    /// Browse backup workflows
    #[command(subcommand)]
    Workflows(WorkflowsCommands),

    /// List and acknowledge alerts
    #[command(subcommand)]
    Alerts(AlertsCommands),

    /// Show infrastructure reports
    Reports {
        /// Report tab (hardware-health, backup-trends, connectivity)
        #[arg(long, short)]
        tab: Option<String>,
    },

    /// Search clusters, workflows and alerts
    Search {
        /// Text to look for
        query: String,
    },
}

#[derive(Subcommand)]
pub enum ClustersCommands {
    /// List clusters
    List {
        /// Filter by name or location
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show a cluster's details
    Show {
        /// Cluster ID, e.g. production-east-01
        id: String,

        /// Detail tab (hardware-inventory, component-health, job-activity)
        #[arg(long, short)]
        tab: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum WorkflowsCommands {
    /// List workflows
    List {
        /// Filter by title, type, cluster or status
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show a workflow's details
    Show {
        /// Workflow slug, e.g. daily-sql-server-backup
        slug: String,
    },
}

#[derive(Subcommand)]
pub enum AlertsCommands {
    /// List alerts
    List {
        /// Alerts tab (active, history)
        #[arg(long, short)]
        tab: Option<String>,
    },

    /// Acknowledge an alert
    Ack {
        /// Alert ID
        id: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = config::Config::load()?;
    let format = settings.resolve_format(cli.format);
    let client = client::ApiClient::new(&settings.resolve_api_url(cli.api_url.as_deref()))?;

    match cli.command {
        Commands::Dashboard => dashboard::show(&client, format).await?,
        Commands::Clusters(clusters_cmd) => match clusters_cmd {
            ClustersCommands::List { search } => clusters::list(&client, search, format).await?,
            ClustersCommands::Show { id, tab } => clusters::show(&client, &id, tab, format).await?,
        },
        Commands::Workflows(workflows_cmd) => match workflows_cmd {
            WorkflowsCommands::List { search } => workflows::list(&client, search, format).await?,
            WorkflowsCommands::Show { slug } => workflows::show(&client, &slug, format).await?,
        },
        Commands::Alerts(alerts_cmd) => match alerts_cmd {
            AlertsCommands::List { tab } => alerts::list(&client, tab, format).await?,
            AlertsCommands::Ack { id } => alerts::acknowledge(&client, id, format).await?,
        },
        Commands::Reports { tab } => reports::show(&client, tab, format).await?,
        Commands::Search { query } => search::run(&client, &query, format).await?,
    }

    Ok(())
}
