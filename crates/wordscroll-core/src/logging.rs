//! File-backed `tracing` setup.
//!
//! A full-screen TUI owns stdout, so diagnostics are written to a file
//! instead. [`init_file_logging`] installs a global `tracing-subscriber`
//! formatter; [`Program`](crate::Program) calls it when
//! [`ProgramOptions::log_file`](crate::ProgramOptions::log_file) is set.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::runtime::ProgramError;

/// Default filter directive when none is given.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Open `path` in append mode and route all `tracing` events at or above
/// `directive` (an `EnvFilter` directive such as `"debug"` or
/// `"wordscroll_widgets=debug,info"`) into it.
///
/// Fails if the file cannot be opened, the directive does not parse, or a
/// global subscriber is already installed.
pub fn init_file_logging(path: impl AsRef<Path>, directive: &str) -> Result<(), ProgramError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    let filter =
        EnvFilter::try_new(directive).map_err(|err| ProgramError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| ProgramError::Logging(err.to_string()))?;

    tracing::info!(path = %path.as_ref().display(), directive, "file logging enabled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = init_file_logging(dir.path().join("wordscroll.log"), "wordscroll_core=loudest").unwrap_err();
        assert!(matches!(err, ProgramError::Logging(_)));
    }

    #[test]
    fn unopenable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let err = init_file_logging(dir.path(), DEFAULT_DIRECTIVE).unwrap_err();
        assert!(matches!(err, ProgramError::Io(_)));
    }
}
