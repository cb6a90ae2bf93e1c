use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use sip::api::{GoalArgs, ProjectArgs, run_goal_command, run_http_server, run_project_command};

#[derive(Parser)]
#[command(
    name = "sip",
    about = "Systematic investment plan projector (step-up, lump sum, inflation)"
)]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API and the calculator page over HTTP
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },

    /// Project the future value of a plan
    Project(ProjectArgs),

    /// Solve the monthly contribution needed to reach a target corpus
    Goal(GoalArgs),
}

/// `--verbose` wins, then a parseable `RUST_LOG`, then `default_level`.
fn log_filter(verbose: bool, rust_log: Option<&str>, default_level: Level) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(default_level.into()))
}

fn init_tracing(verbose: bool, default_level: Level) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref(), default_level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // The server reports its listen address at info.
    let default_level = match cli.command {
        Commands::Serve { .. } => Level::INFO,
        _ => Level::WARN,
    };
    init_tracing(cli.verbose, default_level);

    match &cli.command {
        Commands::Serve { host, port } => run_http_server(*host, *port)
            .await
            .with_context(|| format!("HTTP server on {host}:{port} failed")),
        Commands::Project(args) => {
            let output = run_project_command(args).map_err(anyhow::Error::msg)?;
            println!("{output}");
            Ok(())
        }
        Commands::Goal(args) => {
            let output = run_goal_command(args).map_err(anyhow::Error::msg)?;
            println!("{output}");
            Ok(())
        }
    }
}
