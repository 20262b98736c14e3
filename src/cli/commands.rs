//! Command definitions for the OKTimer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// OKTimer CLI - countdown timer with desktop notifications
#[derive(Parser, Debug)]
#[command(
    name = "oktimer",
    version,
    about = "カウントダウンタイマーCLI",
    long_about = "ターミナルから操作するシンプルなカウントダウンタイマー。\n\
                  完了時にはデスクトップ通知とサウンドで知らせます。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the countdown (resumes when paused)
    Start(StartArgs),

    /// Pause the running countdown
    Pause,

    /// Reset to idle, abandoning the session in progress
    Reset,

    /// Re-arm a completed countdown with the snooze duration
    Snooze,

    /// Acknowledge a completed countdown
    Dismiss,

    /// Set the countdown duration (idle only)
    Set(SetArgs),

    /// Arm a preset duration in seconds, e.g. 60 / 300 / 600 (idle only)
    Preset {
        /// Duration in seconds
        #[arg(value_parser = clap::value_parser!(u64).range(1..=86400))]
        seconds: u64,
    },

    /// Show current countdown status
    Status,

    /// Show session history and statistics
    History(HistoryArgs),

    /// Read or update settings
    Config(ConfigArgs),

    /// Run as daemon (background service)
    #[command(hide = true)]
    Daemon,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Start Command Arguments
// ============================================================================

/// Arguments for the start command
#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// Minutes to arm before starting (idle only)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(0..=1440)
    )]
    pub minutes: Option<u32>,

    /// Seconds to arm before starting (idle only)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(0..=59)
    )]
    pub seconds: Option<u32>,
}

// ============================================================================
// Set Command Arguments
// ============================================================================

/// Arguments for the set command
#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Minutes component (0-1440)
    #[arg(value_parser = clap::value_parser!(u32).range(0..=1440))]
    pub minutes: u32,

    /// Seconds component (0-59)
    #[arg(value_parser = clap::value_parser!(u32).range(0..=59))]
    pub seconds: u32,
}

// ============================================================================
// History Command Arguments
// ============================================================================

/// Arguments for the history command
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Erase the entire history instead of showing it
    #[arg(long)]
    pub clear: bool,

    /// Number of records to show
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,
}

// ============================================================================
// Config Command Arguments
// ============================================================================

/// Arguments for the config command. With no flags, shows the current
/// settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Enable or disable start/completion sounds (on/off)
    #[arg(long, value_parser = parse_on_off)]
    pub sound: Option<bool>,

    /// Enable or disable the per-second tick sound (on/off)
    #[arg(long, value_parser = parse_on_off)]
    pub tick_sound: Option<bool>,

    /// Default countdown duration in seconds (1-86400)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=86400))]
    pub default_secs: Option<u64>,

    /// Snooze duration in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub snooze_secs: Option<u64>,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses an on/off toggle value.
fn parse_on_off(s: &str) -> Result<bool, String> {
    match s {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err("on または off を指定してください".to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
