//! App Argument Options
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use color_eyre::eyre;

/// Command line interface for the Signal messenger
#[derive(Parser, Debug)]
#[command(name = "signal-cli", version)]
pub struct AppOpts {
    #[command(subcommand)]
    pub cmd: Commands,
    /// Choose to output in plain text or JSON
    #[arg(value_enum, long, short, global = true, default_value_t = OutputType::PlainText)]
    pub output: OutputType,
    /// Account data to read groups and recipients from
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,
    /// Overrides for the service configuration, in `KEY=value` form
    #[arg(long, global = true, value_name = "FILE")]
    pub properties: Option<PathBuf>,
    #[command(flatten)]
    pub log: LogOptions,
}

impl AppOpts {
    /// `--data` if given, otherwise `account.json` in the user's data directory
    pub fn data_file(&self) -> eyre::Result<PathBuf> {
        if let Some(ref data) = self.data {
            return Ok(data.clone());
        }
        let dirs = directories::BaseDirs::new()
            .ok_or_else(|| eyre::eyre!("no home directory to locate account data in"))?;
        Ok(dirs.data_dir().join("signal-cli").join("account.json"))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    ListGroups(ListGroupsOpts),
    ServiceConfig(ServiceConfigOpts),
}

/// List group information including names, ids, active status, blocked status and members
#[derive(Args, Debug, Clone, Default)]
pub struct ListGroupsOpts {
    /// List the members and group invite links of each group. If output=json, then this is always set
    #[arg(long, short)]
    pub detailed: bool,
}

/// Show the endpoints, trust anchors and capabilities the client would use
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceConfigOpts {}

#[derive(ValueEnum, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum OutputType {
    #[default]
    PlainText,
    Json,
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use OutputType::*;
        match self {
            PlainText => write!(f, "plain-text"),
            Json => write!(f, "json"),
        }
    }
}

/// specify the log output
#[derive(Args, Debug)]
pub struct LogOptions {
    /// Additionally write logs into a file with a structured, ndJSON format
    #[arg(long)]
    pub json_log: bool,
    /// Specify verbosity of logs, default WARN
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}
