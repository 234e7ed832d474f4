mod directory;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use gafeed_client::AnalyticsSession;
use tracing_subscriber::EnvFilter;

use crate::report::ReportArgs;

#[derive(Debug, Parser)]
#[command(name = "gafeed-cli")]
#[command(about = "Query analytics report and management feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every profile the token can read, with goals and account names
    Accounts {
        #[arg(long, value_enum, default_value_t = ListFormat::Yaml)]
        format: ListFormat,
    },
    /// List the segments available to the token
    Segments {
        #[arg(long, value_enum, default_value_t = ListFormat::Yaml)]
        format: ListFormat,
    },
    /// Fetch one page of report data
    Get(ReportArgs),
}

/// Output for the management listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ListFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = gafeed_core::load_client_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut session = AnalyticsSession::from_config(&config)?;

    let output = match cli.command {
        Commands::Accounts { format } => {
            directory::render_accounts(session.accounts().await?, format)?
        }
        Commands::Segments { format } => {
            directory::render_segments(session.segments().await?, format)?
        }
        Commands::Get(args) => report::run_get(&mut session, &args).await?,
    };
    print!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests;
