//! Bridge from the `log` facade to a host-supplied logger.

use std::sync::{Arc, OnceLock};

/// Sink for the log records emitted by `WalletSeal`.
///
/// Hosts implement it to route records into their own logging (the browser
/// console, `os_log`, Logcat). Records never contain key material or
/// plaintext.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use walletseal_core::logger::{set_logger, LogLevel, Logger};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         eprintln!("[{level:?}] {message}");
///     }
/// }
///
/// set_logger(Arc::new(StderrLogger));
/// ```
#[cfg_attr(feature = "ffi", uniffi::export(with_foreign))]
pub trait Logger: Sync + Send {
    /// Logs a message at the specified log level.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum LogLevel {
    /// Very detailed tracing output.
    Trace,
    /// Debugging information, such as key fingerprints and payload sizes.
    Debug,
    /// Progress of the key derivation.
    Info,
    /// Potentially harmful situations.
    Warn,
    /// Failed operations, with their diagnostic trace.
    Error,
}

/// Forwards `log` records to the host-supplied [`Logger`].
struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let is_record_from_walletseal = record
            .module_path()
            .is_some_and(|module_path| module_path.starts_with("walletseal"));
        let is_debug_or_trace_level =
            record.level() == log::Level::Debug || record.level() == log::Level::Trace;

        // Debug and trace output of dependencies is noise for hosts.
        if is_debug_or_trace_level && !is_record_from_walletseal {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(log_level(record.level()), format!("{}", record.args()));
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

const fn log_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Trace => LogLevel::Trace,
    }
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Installs `logger` as the destination of all `WalletSeal` log records.
///
/// Only the first call has an effect. If another `log` implementation is
/// already installed in the process, records keep going there instead.
#[cfg_attr(feature = "ffi", uniffi::export)]
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
