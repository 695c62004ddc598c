mod compute;
mod fetch;
mod push;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "segex")]
#[command(about = "Campaign segment-exclusion pipeline for the Airtable campaign base")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the campaign window from Airtable into per-channel CSV tables
    Fetch {
        /// Directory for email_records.csv and push_records.csv
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Compute exclusion lists for one channel's table
    Compute {
        /// Channel the table belongs to (email or push)
        #[arg(long)]
        channel: String,
        /// Input CSV table
        #[arg(long)]
        input: PathBuf,
        /// Output CSV table with the exclusions column populated
        #[arg(long)]
        output: PathBuf,
    },
    /// Write computed exclusion lists from a table back to Airtable
    Push {
        /// Input CSV table with the exclusions column populated
        #[arg(long)]
        input: PathBuf,
    },
    /// Run the full pipeline in memory for both channels
    Run {
        /// Optional directory to snapshot each stage's tables into
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = segex_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Fetch { out_dir } => fetch::run_fetch(&config, &out_dir).await,
        Commands::Compute {
            channel,
            input,
            output,
        } => compute::run_compute(&config, &channel, &input, &output),
        Commands::Push { input } => push::run_push(&config, &input).await,
        Commands::Run { snapshot_dir } => {
            run::run_pipeline(&config, snapshot_dir.as_deref()).await
        }
    }
}
