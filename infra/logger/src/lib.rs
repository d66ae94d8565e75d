//! # Logger
//!
//! Installs the global `tracing` subscriber of a command-line application.
//!
//! Console lines go to stderr, so command output on stdout is never interleaved
//! with logs. Files roll daily under a directory and are written by a background
//! thread owned by the returned [`Logger`]. Each output is compact text or JSON
//! lines ([`LogFormat`]) and records the call site's file and line.
//!
//! ## Example
//!
//! ```rust
//! use cmdkit_logger::{LevelFilter, LogFormat, Logger};
//!
//! let logger = Logger::builder("my-app")
//!     .level(LevelFilter::DEBUG)
//!     .console(Some(LogFormat::Json))
//!     .init()?;
//! assert!(!logger.writes_files());
//! # Ok::<(), cmdkit_logger::LoggerError>(())
//! ```

mod builder;
mod error;
mod format;

pub use crate::builder::LoggerBuilder;
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::format::LogFormat;
pub use tracing::level_filters::LevelFilter;

use tracing_appender::non_blocking::WorkerGuard;

/// Handle to the installed subscriber. Dropping it flushes and stops the file writer.
#[derive(Debug)]
#[must_use = "dropping the handle stops file logging"]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts describing a subscriber for the application `name`, also the log file prefix.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name.into())
    }

    /// `true` when file output is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}
