//! Logger for the CLI
//!
//! Logs always go to stderr, stdout is reserved for command output.
use std::path::PathBuf;

use clap_verbosity_flag::{Verbosity, WarnLevel};
use color_eyre::eyre;
use owo_colors::OwoColorize;
use tracing::Dispatch;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    fmt::{format, format::Writer, time, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
    Layer,
};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::args::LogOptions;

const CRATES: [&str; 3] = ["signal_cli", "signal_service", "signal_cryptography"];

#[derive(Default)]
pub struct Logger {
    json: bool,
    verbosity: Verbosity<WarnLevel>,
    guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

impl<'a> From<&'a LogOptions> for Logger {
    fn from(options: &'a LogOptions) -> Self {
        Self {
            json: options.json_log,
            verbosity: options.verbose.clone(),
            guards: Vec::new(),
        }
    }
}

impl Logger {
    pub fn init(&mut self) -> eyre::Result<()> {
        let Logger {
            json,
            ref verbosity,
            ref mut guards,
        } = *self;

        let verbosity = verbosity.log_level_filter();
        // prefer `RUST_LOG` variable if set
        // otherwise passed-in level filter
        let app_filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::builder().parse_lossy(
                    CRATES
                        .iter()
                        .map(|c| format!("{c}={verbosity}"))
                        .collect::<Vec<_>>()
                        .join(","),
                )
            })
        };
        let file_filter = || {
            EnvFilter::builder().parse_lossy(
                CRATES
                    .iter()
                    .map(|c| format!("{c}=DEBUG"))
                    .collect::<Vec<_>>()
                    .join(","),
            )
        };

        let json_layer = if json {
            let path = log_file_name(chrono::Local::now());
            let file = std::fs::File::create_new(&path)?;
            let (appender, guard) = tracing_appender::non_blocking(file);
            guards.push(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_level(true)
                    .with_timer(time::ChronoLocal::new("%s".into()))
                    .with_writer(appender)
                    .with_filter(file_filter()),
            )
        } else {
            None
        };

        let subscriber = tracing_subscriber::registry()
            // default, always-on layer
            .with(human_layer(app_filter(), std::io::stderr))
            .with(json_layer);

        let _ = tracing::dispatcher::set_global_default(Dispatch::new(subscriber));
        Ok(())
    }
}

/// Sub-second precision keeps back to back runs from colliding
fn log_file_name(now: chrono::DateTime<chrono::Local>) -> PathBuf {
    PathBuf::from(format!(
        "./signal-cli_log-{}.json",
        now.format("%Y%m%dT%H%M%S%.6f")
    ))
}

fn human_layer<S, W>(filter: EnvFilter, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .map_event_format(|_| PrettyTarget)
        .fmt_fields(
            format::debug_fn(move |writer, field, value| {
                if field.name() == "message" {
                    write!(writer, "{:?}", value)
                } else {
                    write!(writer, " {}={:?}", field.bold(), value)
                }
            })
            .delimited(""),
        );

    layer.with_writer(writer).with_filter(filter)
}

pub struct PrettyTarget;
impl<S, N> FormatEvent<S, N> for PrettyTarget
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = event.metadata().level().as_str();
        if writer.has_ansi_escapes() {
            match level {
                "ERROR" => write!(&mut writer, "{} ", level.red().bold())?,
                "WARN" => write!(&mut writer, "{} ", level.yellow().bold())?,
                "INFO" => write!(&mut writer, "{} ", level.green().bold())?,
                "DEBUG" => write!(&mut writer, "{} ", level.blue().bold())?,
                "TRACE" => write!(&mut writer, "{} ", level.purple().bold())?,
                _ => (),
            }
        } else {
            write!(&mut writer, "{level} ")?;
        }
        write!(&mut writer, "{}: ", event.metadata().target())?;

        ctx.format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
