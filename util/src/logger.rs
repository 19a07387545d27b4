//! Generic logger utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use fern;
use colored::{ColoredString, Colorize};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Targets which log once per control cycle. These are kept out of the
/// terminal below `INFO` but are still written in full to the log file.
const CYCLE_TARGETS: [&str; 2] = [
    "track_lib::track_ctrl::state",
    "track_lib::shared"
];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of `INFO` or more verbose, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
/// 
/// Records go to stdout and to the session's log file, each prefixed with the
/// number of seconds since the session epoch. Per-cycle tracker records are
/// limited to `INFO` on stdout.
/// 
/// # Notes
/// 
/// - `min_level` must be at least as verbose as `log::Level::Info`.
/// 
/// # Safety
/// 
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter, 
    session: &session::Session
) -> Result<(), LoggerInitError> {

    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level))
    }

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileInitError)?;

    let terminal = CYCLE_TARGETS.iter().fold(
        fern::Dispatch::new(), 
        |d, target| d.level_for(*target, LevelFilter::Info)
    ).chain(std::io::stdout());

    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!(
            "[{:10.6} {}] {}{}",
            session::get_elapsed_seconds(),
            level_to_str(record.level()),
            target_prefix(record),
            message
        )))
        .level(min_level)
        .chain(terminal)
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;
    
    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?}", min_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Debug and trace records are prefixed with their target module.
fn target_prefix(record: &log::Record) -> String {
    if record.level() > log::Level::Info {
        format!("{}: ", record.target())
    }
    else {
        String::new()
    }
}

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info  => "INF".normal(),
        log::Level::Warn  => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_rejects_quiet_min_level() {
        // The level is checked before the session or log file are touched
        let session = session::Session {
            session_root: PathBuf::from("/nonexistent/session"),
            log_file_path: PathBuf::from("/nonexistent/session/test.log")
        };

        for &level in &[LevelFilter::Warn, LevelFilter::Error, LevelFilter::Off] {
            match logger_init(level, &session) {
                Err(LoggerInitError::InvalidMinLogLevel(l)) => assert_eq!(l, level),
                r => panic!("Expected InvalidMinLogLevel for {:?}, got {:?}", level, r)
            }
        }
    }

    #[test]
    fn test_target_prefix() {
        let debug = log::Record::builder()
            .level(log::Level::Debug)
            .target("track_lib::track_ctrl::state")
            .build();
        let info = log::Record::builder()
            .level(log::Level::Info)
            .target("track_lib::track_ctrl::state")
            .build();

        assert_eq!(target_prefix(&debug), "track_lib::track_ctrl::state: ");
        assert_eq!(target_prefix(&info), "");
    }
}
