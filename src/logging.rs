//! Logging to a file.  The terminal belongs to the game while it runs, so log
//! messages are never written to stdout or stderr.
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::path::Path;
use thiserror::Error;

/// Return the level to log at
pub(crate) fn level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install a logger that appends messages at `level` and above to the file at
/// `path`, truncating it first.
pub(crate) fn init(path: &Path, level: LevelFilter) -> Result<(), LogError> {
    let file = fs_err::File::create(path)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file)?;
    log::debug!("logging to {}", path.display());
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to create log file")]
    Create(#[from] std::io::Error),
    #[error("failed to install logger")]
    Init(#[from] log::SetLoggerError),
}
