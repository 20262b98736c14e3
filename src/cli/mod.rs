//! CLI components: command definitions, IPC client, and display utilities.

pub mod client;
pub mod commands;
pub mod display;

pub use client::IpcClient;
pub use commands::{Cli, Commands, ConfigArgs, HistoryArgs, SetArgs, StartArgs};
pub use display::Display;
