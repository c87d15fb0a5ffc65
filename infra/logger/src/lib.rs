//! # Logger
//!
//! Installs the global `tracing` subscriber for the conference platform: a compact console
//! layer, an optional rolling file layer written through a non-blocking worker, and an
//! `EnvFilter` seeded from the configured level.
//!
//! * [`Logger::builder`] gives a typestate builder; file-only knobs such as
//!   [`LoggerBuilder::rotation`] exist only after [`LoggerBuilder::path`] was called.
//! * [`Logger::from_config`] maps the `[logging]` configuration section.
//! * `RUST_LOG` still applies when no explicit env filter is configured.
//!
//! ## Example
//!
//! ```rust
//! # use confhub_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("confhub")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use confhub_domain::config::LoggingConfig;
use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    config: LoggerConfig,
    name: N,
    file_state: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Sets the name used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { name: WithName(name.into()), config: self.config, file_state: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g. `confhub_listing=debug,info`).
    ///
    /// Replaces `RUST_LOG`. Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Emits JSON lines instead of the compact text format.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    /// Writes rolling log files into `path`.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.path = Some(path.into());
        LoggerBuilder { config, name: self.name, file_state: PhantomData }
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// The returned [`Logger`] owns the file writer's [`WorkerGuard`]; keep it alive for the
    /// lifetime of the program so buffered lines are flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set,
    /// [`LoggerError::Filter`] for a malformed env filter and
    /// [`LoggerError::InvalidConfiguration`] for a blank name, zero `max_files` or no output.
    pub fn init(self) -> Result<Logger, LoggerError> {
        install(self.config, &self.name.0)
    }
}

/// A handle to the initialized logging system.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use confhub_logger::{LevelFilter, Logger};
    ///
    /// let _logger = Logger::builder()
    ///     .name("confhub")
    ///     .level(LevelFilter::DEBUG)
    ///     .init()
    ///     .unwrap();
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName, file_state: PhantomData }
    }

    /// Installs the subscriber described by the `[logging]` configuration section.
    ///
    /// Console output is always on; a configured `directory` adds daily rolling files.
    ///
    /// # Errors
    /// Returns [`LoggerError::UnknownLevel`] or [`LoggerError::Filter`] for bad settings,
    /// [`LoggerError::Directory`] when the log directory cannot be created, and
    /// [`LoggerError::Subscriber`] when a subscriber is already installed.
    pub fn from_config(name: &str, logging: &LoggingConfig) -> Result<Self, LoggerError> {
        let config = LoggerConfig {
            path: logging.directory.clone(),
            level: parse_level(&logging.level)?,
            json: logging.json,
            env_filter: logging.env_filter.clone(),
            ..LoggerConfig::default()
        };

        install(config, name)
    }

    /// Returns the file writer's guard, if file logging is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn install(config: LoggerConfig, name: &str) -> Result<Logger, LoggerError> {
    validate_config(&config, name)?;

    let env_filter = build_env_filter(&config)?;
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.console {
        let console = layer().with_ansi(true);
        layers.push(if config.json { console.json().boxed() } else { console.compact().boxed() });
    }

    let guard = if let Some(path) = &config.path {
        fs::create_dir_all(path).context(path.display().to_string())?;

        let file_appender = RollingFileAppender::builder()
            .rotation(config.rotation.clone())
            .filename_prefix(name)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(config.max_files)
            .build(path)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let file_layer = layer().with_writer(non_blocking).with_ansi(false);
        layers.push(if config.json { file_layer.json().boxed() } else { file_layer.boxed() });

        Some(guard)
    } else {
        None
    };

    if layers.is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "No logging layers enabled. Enable console or file output.".into(),
            context: None,
        });
    }

    tracing_subscriber::registry().with(layers).with(env_filter).try_init()?;

    Ok(Logger { guard })
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggerError::UnknownLevel { level: level.to_owned(), context: None })
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    match &config.env_filter {
        Some(filter) => builder.parse(filter).context(format!("'{filter}'")),
        None => Ok(builder.from_env_lossy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_console_info() {
        let builder = Logger::builder().name("confhub").env_filter("confhub_catalog=debug");
        assert!(builder.config.console);
        assert!(!builder.config.json);
        assert_eq!(builder.config.level, LevelFilter::INFO);
        assert_eq!(builder.config.env_filter.as_deref(), Some("confhub_catalog=debug"));
        assert!(builder.config.path.is_none());
    }

    #[test]
    fn file_settings_follow_path() {
        let builder = Logger::builder()
            .name("confhub")
            .json(true)
            .path("logs")
            .max_files(3)
            .rotation(Rotation::HOURLY);

        assert!(builder.config.json);
        assert_eq!(builder.config.max_files, 3);
        assert_eq!(builder.config.path.as_deref(), Some(std::path::Path::new("logs")));
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" warn ").unwrap(), LevelFilter::WARN);
        assert!(matches!(parse_level("loud"), Err(LoggerError::UnknownLevel { .. })));
    }

    #[test]
    fn invalid_settings_are_rejected_before_install() {
        let blank = Logger::builder().name("  ").init();
        assert!(matches!(blank, Err(LoggerError::InvalidConfiguration { .. })));

        let silent = Logger::builder().name("confhub").console(false).init();
        assert!(matches!(silent, Err(LoggerError::InvalidConfiguration { .. })));

        let filter = Logger::builder().name("confhub").env_filter("confhub=loud").init();
        assert!(matches!(filter, Err(LoggerError::Filter { .. })));
    }
}
