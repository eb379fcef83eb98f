use clap::{Parser, Subcommand};

/// CLI surface definition. Running without a subcommand executes the demo.
#[derive(Parser, Debug)]
#[command(
    name = "openalaw",
    about = "Keyword-routing automation agent for Android devices",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to the demo run when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize, process the example task and print status.
    Demo,
    /// Process a task through the agent and, if needed, the device bridge.
    Task {
        #[arg(required = true, trailing_var_arg = true)]
        task: Vec<String>,
    },
    /// Show how a task would be routed without initializing anything.
    Classify {
        #[arg(required = true, trailing_var_arg = true)]
        task: Vec<String>,
    },
    /// Enqueue tasks on the agent's scheduler and drain them.
    Queue {
        #[arg(required = true)]
        tasks: Vec<String>,
    },
    /// Initialize and print the status snapshot as JSON.
    Status,
    /// Print version and exit.
    Version,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}
