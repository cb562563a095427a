//! CLI argument parsing via clap.

use clap::{Parser, Subcommand, ValueEnum};
use sysglance::build_info::HELP_BUILD_METADATA;

/// Quick look at local battery, network and device status, plus a small
/// persisted task list.
#[derive(Debug, Parser)]
#[command(
    name = "sysglance",
    disable_version_flag = true,
    after_help = HELP_BUILD_METADATA
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: ./sysglance.toml or ~/.config/sysglance/sysglance.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Print version and build metadata.
    #[arg(short = 'V', long = "version")]
    pub version: bool,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Battery, device and Wi-Fi overview (default).
    Status,
    /// Battery level and charging state.
    Battery,
    /// Connected network and its password.
    Wifi {
        /// Show the password in clear text.
        #[arg(long)]
        reveal: bool,
    },
    /// Hostname and local IP address.
    Device {
        /// Show hostname and IP in clear text.
        #[arg(long)]
        reveal: bool,
    },
    /// Run a connectivity check.
    Check {
        #[command(subcommand)]
        target: CheckTarget,
    },
    /// Print a card's clipboard payload with unmasked values.
    Copy {
        #[arg(value_enum)]
        card: CopyCard,
    },
    /// Manage the task list.
    Tasks {
        #[command(subcommand)]
        action: Option<TaskCommand>,
    },
    /// Show where configuration was loaded from.
    Config {
        /// Print a documented starter config instead.
        #[arg(long)]
        template: bool,
    },
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CheckTarget {
    /// Internet reachability.
    Internet,
    /// DNS resolution of the host's default domain.
    Dns,
    /// DNS resolution of a specific domain.
    DnsDomain { domain: String },
    /// Default gateway reachability.
    Gateway,
    /// Public IP address lookup.
    PublicIp,
    /// Every check except the custom domain one.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyCard {
    Wifi,
    Device,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum TaskCommand {
    /// List tasks (default).
    List,
    /// Append a task, optionally with text.
    Add { text: Option<String> },
    /// Replace the text of task N.
    Edit {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
        text: String,
    },
    /// Mark task N done.
    Done {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
    },
    /// Mark task N not done.
    Undo {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
    },
    /// Delete task N.
    Remove {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
    },
}
