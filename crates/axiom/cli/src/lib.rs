//! Axiom CLI - terminal front-end for the protocol synthesis console
//!
//! The console authorizes a session and then accepts three kinds of work,
//! which may run at the same time:
//! - Protocol synthesis from a free-form prompt
//! - Multi-turn chat with the console assistant
//! - Single-shot fast queries

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use axiom_client::SynthesisClient;
use axiom_shell::{Shell, ShellConfig};
use commands::{console, oneshot};
pub use config::{AxiomConfig, LoggingConfig};
pub use error::{CliError, CliResult};
pub use output::print_error;

/// Axiom CLI application
#[derive(Parser)]
#[command(name = "axiom")]
#[command(about = "Axiom - protocol synthesis console", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "AXIOM_CONFIG")]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Console,

    /// Synthesize a single protocol and print it
    Generate {
        /// Concept to synthesize
        prompt: String,

        /// Skip the authorization and pipeline delays
        #[arg(long)]
        instant: bool,
    },

    /// Run a single fast query and print the answer
    Ask {
        /// Query text
        prompt: String,

        /// Skip the authorization and pipeline delays
        #[arg(long)]
        instant: bool,
    },

    /// Show the effective configuration
    Config,
}

/// Run using the current process arguments.
pub async fn run() -> CliResult<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let config = AxiomConfig::load(cli.config.as_deref())?;

    init_tracing(&config.logging, cli.verbose);
    tracing::debug!(config = ?cli.config, "configuration loaded");

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => {
            let shell = build_shell(&config, config.shell.clone())?;
            console::execute(shell, cli.output).await
        }
        Commands::Generate { prompt, instant } => {
            let shell = build_shell(&config, shell_config(&config, instant))?;
            oneshot::generate(shell, &prompt, cli.output).await
        }
        Commands::Ask { prompt, instant } => {
            let shell = build_shell(&config, shell_config(&config, instant))?;
            oneshot::ask(shell, &prompt, cli.output).await
        }
        Commands::Config => commands::config::show(&config, cli.output),
    }
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        logging.level.clone()
    };
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    // stdout carries command output, diagnostics go to stderr
    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn shell_config(config: &AxiomConfig, instant: bool) -> ShellConfig {
    if instant {
        ShellConfig {
            log_capacity: config.shell.log_capacity,
            ..ShellConfig::immediate()
        }
    } else {
        config.shell.clone()
    }
}

fn build_shell(config: &AxiomConfig, shell_config: ShellConfig) -> CliResult<Shell> {
    let client = SynthesisClient::from_env(config.api.clone())?;
    Ok(Shell::new(client, shell_config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn console_is_the_default_command() {
        let cli = Cli::parse_from(["axiom"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn instant_keeps_the_configured_log_capacity() {
        let mut config = AxiomConfig::default();
        config.shell.log_capacity = 7;
        let shell = shell_config(&config, true);
        assert_eq!(shell.log_capacity, 7);
        assert_eq!(shell.stage_delay_ms, 0);
        assert_eq!(shell_config(&config, false), config.shell);
    }
}
