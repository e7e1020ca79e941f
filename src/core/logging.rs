use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Log files and the target prefixes routed into each. Everything else lands
/// in `system.log`.
const ROUTES: &[(&str, &[&str])] = &[("tasks", &["tasks"]), ("http", &["http", "tower_http"])];

/// Guards that must be kept alive to ensure logs are flushed
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create logs directory: {0}")]
    Directory(#[from] std::io::Error),
    #[error("Failed to set global tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Name of the log file a target is written to, or `None` for the system log.
pub fn route_for(target: &str) -> Option<&'static str> {
    ROUTES.iter().find_map(|(file, prefixes)| {
        prefixes
            .iter()
            .any(|prefix| target == *prefix || target.starts_with(&format!("{}::", prefix)))
            .then_some(*file)
    })
}

/// Multi-target writer that routes logs to different files based on target
struct TargetWriter {
    writers: HashMap<&'static str, NonBlocking>,
    system_writer: NonBlocking,
}

impl<'a> MakeWriter<'a> for TargetWriter {
    type Writer = Box<dyn std::io::Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        Box::new(self.system_writer.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        match route_for(meta.target()).and_then(|file| self.writers.get(file)) {
            Some(writer) => Box::new(writer.clone()),
            None => Box::new(self.system_writer.clone()),
        }
    }
}

/// Initialize the logging system with one daily-rolled file per route
pub fn init_logging(log_dir: &Path) -> Result<LoggingGuards, LoggingError> {
    crate::shared::paths::ensure_dir(log_dir)?;

    let mut guards = Vec::new();
    let mut writers = HashMap::new();

    for (file, _) in ROUTES {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{}.log", file));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        writers.insert(*file, non_blocking);
        guards.push(guard);
    }

    let system_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "system.log");
    let (system_writer, system_guard) = tracing_appender::non_blocking(system_appender);
    guards.push(system_guard);

    let writer = TargetWriter {
        writers,
        system_writer,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false),
    );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(target: "system", "Logging initialized at {:?}", log_dir);

    Ok(LoggingGuards { _guards: guards })
}
