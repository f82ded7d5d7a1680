//! Application functions

/// List the groups of the account
mod list_groups;
/// Show the resolved network configuration
mod service_config;

use color_eyre::eyre::{self, Result, WrapErr};
use signal_service::{create_default_service_configuration, Properties, ServiceConfig};
use thiserror::Error;

use crate::{
    args::{self, AppOpts},
    manager::{SnapshotError, SnapshotManager},
};

pub use list_groups::ListGroupsError;

pub struct ExitCodes;
impl ExitCodes {
    pub const USER_ERROR: u8 = 1;
    pub const UNEXPECTED_ERROR: u8 = 2;
    pub const IO_ERROR: u8 = 3;
}

/// A failed command, reported through the process exit code
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    ListGroups(#[from] ListGroupsError),
    #[error("unable to locate account data: {0}")]
    DataFile(eyre::Report),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("Failed to write json object: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Snapshot(_) | Self::DataFile(_) => ExitCodes::USER_ERROR,
            Self::ListGroups(e) => e.exit_code(),
            Self::Output(_) | Self::Json(_) => ExitCodes::IO_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct App {
    opts: AppOpts,
    service_config: ServiceConfig,
}

impl App {
    /// Builds the service configuration once, every command shares it.
    /// A configuration that cannot be built is fatal.
    pub fn new(opts: AppOpts) -> Result<Self> {
        let properties = Properties::load(opts.properties.as_deref())?;
        let service_config =
            create_default_service_configuration(&crate::user_agent(), properties)
                .wrap_err("invalid service configuration")?;
        debug!(
            output = %opts.output,
            capabilities = ?service_config.capabilities(),
            "created app"
        );
        Ok(Self {
            opts,
            service_config,
        })
    }

    pub fn run(self) -> Result<(), CommandError> {
        let App {
            opts,
            service_config,
        } = self;
        let mut stdout = std::io::stdout().lock();

        match opts.cmd {
            args::Commands::ListGroups(ref l) => {
                let data = opts.data_file().map_err(CommandError::DataFile)?;
                let manager = SnapshotManager::load(&data)?;
                list_groups::ListGroups::new(l.clone(), opts.output, &manager).run(&mut stdout)?
            }
            args::Commands::ServiceConfig(_) => {
                service_config::ShowServiceConfig::new(&service_config, opts.output)
                    .run(&mut stdout)?
            }
        }
        Ok(())
    }
}
