use std::sync::Arc;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, multi-line
    Pretty,
    /// One line per event
    Compact,
}

/// Diagnostic logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set
    pub level: Level,
    pub format: LogFormat,
    pub show_target: bool,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            show_target: false,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Configuration for `--verbose` runs
    pub fn verbose() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Pretty,
            show_target: true,
            ansi: true,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()))
    }
}

/// Installs the global `tracing` subscriber. Diagnostics go to stderr so
/// they never mix with report text on stdout.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = config.env_filter();
    match config.format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(config.show_target)
                .with_ansi(config.ansi);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(config.show_target)
                .with_ansi(config.ansi);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    tracing::debug!(level = ?config.level, format = ?config.format, "Logging system initialized");
    Ok(())
}

/// Sink for human-readable progress messages.
///
/// Passed explicitly to every component that reports progress. The default
/// writes to stdout; a front end can hand in a closure to redirect output.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<dyn Fn(&str) + Send + Sync>,
}

impl Reporter {
    pub fn new(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Prints every message on its own line.
    pub fn console() -> Self {
        Self::new(|message| println!("{}", message))
    }

    /// Discards messages; they still reach `tracing` at debug level.
    pub fn silent() -> Self {
        Self::new(|_| {})
    }

    pub fn report(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::debug!(target: "gitreview::progress", "{}", message);
        (self.sink)(message);
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::console()
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}

/// Times an operation and logs its duration when finished.
pub struct OperationTimer {
    start: Instant,
    operation: String,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) {
        tracing::info!(
            operation = %self.operation,
            duration_ms = self.elapsed().as_millis() as u64,
            "Operation completed"
        );
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}
