use std::borrow::Cow;

/// Reasons the logging system could not be installed.
#[confhub_derive::confhub_error]
pub enum LoggerError {
    /// `[logging].level` is not one of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[error("Unknown log level '{level}'{}", format_context(.context))]
    UnknownLevel { level: String, context: Option<Cow<'static, str>> },

    #[error("Invalid log filter{}: {source}", format_context(.context))]
    Filter { source: tracing_subscriber::filter::ParseError, context: Option<Cow<'static, str>> },

    #[error("Log directory unavailable{}: {source}", format_context(.context))]
    Directory { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Log file appender failed{}: {source}", format_context(.context))]
    Appender { source: tracing_appender::rolling::InitError, context: Option<Cow<'static, str>> },

    /// Another subscriber owns the process, usually a second `init`.
    #[error("Logging already installed{}: {source}", format_context(.context))]
    Subscriber {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Invalid logger settings{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
