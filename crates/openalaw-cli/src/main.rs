mod cli;
mod config;
mod run;

use crate::cli::ConfigCommand;
use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Entry point wiring the CLI to the orchestrator.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    match cli.command.unwrap_or(cli::Command::Demo) {
        cli::Command::Demo => run::demo(&config).await?,
        cli::Command::Task { task } => {
            run::task(task.join(" "), &config).await?;
        }
        cli::Command::Classify { task } => {
            run::classify(&task.join(" "), &config)?;
        }
        cli::Command::Queue { tasks } => {
            run::queue(tasks, &config).await?;
        }
        cli::Command::Status => run::status(&config).await?,
        cli::Command::Version => print_version(),
        cli::Command::Config(ConfigCommand::Init) => init_config()?,
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("openalaw {}", env!("CARGO_PKG_VERSION"));
}

fn init_config() -> Result<()> {
    let path = config::write_default_if_missing()?;
    println!("Config initialized at {}", path.display());
    Ok(())
}
