//! OKTimer CLI - a countdown timer for the terminal
//!
//! Arm a duration, start the countdown, and get a desktop notification and
//! sound when it completes. Pause, resume, snooze, and session history
//! included.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use oktimer::cli::{Cli, Commands, Display, IpcClient};
use oktimer::daemon::service;
use oktimer::types::IpcResponse;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Start(args)) => {
            let response = ensure_success(IpcClient::new()?.start(&args).await?)?;
            Display::show_start_success(&response);
        }
        Some(Commands::Pause) => {
            let response = ensure_success(IpcClient::new()?.pause().await?)?;
            Display::show_pause_success(&response);
        }
        Some(Commands::Reset) => {
            let response = ensure_success(IpcClient::new()?.reset().await?)?;
            Display::show_reset_success(&response);
        }
        Some(Commands::Snooze) => {
            let response = ensure_success(IpcClient::new()?.snooze().await?)?;
            Display::show_snooze_success(&response);
        }
        Some(Commands::Dismiss) => {
            let response = ensure_success(IpcClient::new()?.dismiss().await?)?;
            Display::show_dismiss_success(&response);
        }
        Some(Commands::Set(args)) => {
            let response =
                ensure_success(IpcClient::new()?.set(args.minutes, args.seconds).await?)?;
            Display::show_set_success(&response);
        }
        Some(Commands::Preset { seconds }) => {
            let response = ensure_success(IpcClient::new()?.preset(seconds).await?)?;
            Display::show_set_success(&response);
        }
        Some(Commands::Status) => {
            let response = ensure_success(IpcClient::new()?.status().await?)?;
            Display::show_status(&response);
        }
        Some(Commands::History(args)) => {
            let client = IpcClient::new()?;
            if args.clear {
                let response = ensure_success(client.clear_history().await?)?;
                println!("* {}", response.message);
            } else {
                let response = ensure_success(client.history().await?)?;
                Display::show_history(&response, args.limit);
            }
        }
        Some(Commands::Config(args)) => {
            let response = ensure_success(IpcClient::new()?.config(&args).await?)?;
            Display::show_config(&response);
        }
        Some(Commands::Daemon) => {
            service::run().await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Turns an error-status response into a CLI error.
fn ensure_success(response: IpcResponse) -> Result<IpcResponse> {
    if response.status == "error" {
        anyhow::bail!(response.message);
    }
    Ok(response)
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
