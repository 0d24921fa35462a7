//! Forwarding of `log` records to a logger supplied by the host.

use std::sync::{Arc, OnceLock};

/// Receives log messages emitted by `AccountKit`.
///
/// Implemented by the host application and exported via `UniFFI`, so that the
/// records produced while a flow runs end up in the app's own log pipeline.
/// Messages never contain passwords or confirmation codes.
///
/// # Examples
///
/// ```rust
/// use accountkit_core::logger::{Logger, LogLevel};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         eprintln!("[{level:?}] {message}");
///     }
/// }
/// ```
///
/// ## Swift
///
/// ```swift
/// final class AccountKitLogger: AccountKit.Logger {
///     func log(level: AccountKit.LogLevel, message: String) {
///         os_log("%{public}@", log: .accountKit, type: level.osLogType, message)
///     }
/// }
///
/// AccountKit.setLogger(logger: AccountKitLogger()) // once, at launch
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Logs a message at the specified log level.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a forwarded log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum LogLevel {
    /// Very low priority, extremely detailed messages.
    Trace,
    /// Lower priority debugging information.
    Debug,
    /// Progress of a flow (e.g. a request was sent).
    Info,
    /// Potentially harmful situations.
    Warn,
    /// A collaborator call failed.
    Error,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

/// Bridges the `log` facade to the foreign [`Logger`].
struct ForeignLogger;

impl log::Log for ForeignLogger {
    /// Debug and trace records are only forwarded when they come from `accountkit`.
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info || metadata.target().starts_with("accountkit")
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(record.level().into(), record.args().to_string());
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Sets the global logger.
///
/// Only the first call has an effect; later calls are reported and ignored.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        eprintln!("Logger already set");
        return;
    }

    if let Err(e) = init_logger() {
        eprintln!("Failed to set logger: {e}");
    }
}

fn init_logger() -> Result<(), log::SetLoggerError> {
    static LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;

    #[test]
    fn test_filters_chatty_dependencies() {
        let logger = ForeignLogger;
        let debug_from_dep = log::Metadata::builder()
            .level(log::Level::Debug)
            .target("reqwest::connect")
            .build();
        let debug_from_us = log::Metadata::builder()
            .level(log::Level::Debug)
            .target("accountkit_core::delete_account")
            .build();
        let warn_from_dep = log::Metadata::builder()
            .level(log::Level::Warn)
            .target("hyper_util")
            .build();

        assert!(!logger.enabled(&debug_from_dep));
        assert!(logger.enabled(&debug_from_us));
        assert!(logger.enabled(&warn_from_dep));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::from(log::Level::Error), LogLevel::Error);
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Trace);
    }
}
