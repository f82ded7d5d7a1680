mod app;
mod args;
mod logger;
mod manager;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

#[macro_use]
extern crate tracing;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let opts = args::AppOpts::parse();
    let mut logger = logger::Logger::from(&opts.log);
    logger.init()?;

    let app = app::App::new(opts)?;
    match app.run() {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!("{e}");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

pub fn user_agent() -> String {
    format!("signal-cli/{}", env!("CARGO_PKG_VERSION"))
}
