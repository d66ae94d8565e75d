//! Facade crate for building command-line applications.
//! Re-exports the dispatcher, the environment binder and the logger, and adds
//! [`CliApp`] to wire them together at startup.
//! Keep this crate thin: it composes the other crates and holds no dispatch or binding logic.
//!
//! ## Usage
//!
//! ```rust
//! use cmdkit::{CliApp, EnvConfig, NO_FLAGS};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, EnvConfig)]
//! #[env(crate = "cmdkit::env")]
//! struct Config {
//!     port: u16,
//! }
//!
//! let env = HashMap::from([("DEMO_PORT", "8080")]);
//! let mut app = CliApp::<Config>::from_source("demo", env)?;
//! assert_eq!(app.config().port, 8080);
//!
//! app.commands_mut().register_command("server", "Server control")?;
//! app.commands_mut().register_subcommand("server", "check", "Validate config", NO_FLAGS, |_| Ok(()))?;
//!
//! let mut out = Vec::new();
//! app.run_with_output(["demo", "server", "check"], &mut out)?;
//! # Ok::<(), cmdkit::AppError>(())
//! ```

mod app;
mod error;
mod settings;

pub use cmdkit_dispatch as dispatch;
pub use cmdkit_env as env;
pub use cmdkit_logger as logger;

pub use crate::app::CliApp;
pub use crate::error::{AppError, AppErrorExt};
pub use crate::settings::LogSettings;
pub use cmdkit_dispatch::{CommandSet, DispatchError, FlagValues, NO_FLAGS, Subcommand};
pub use cmdkit_env::{EnvConfig, EnvError};
pub use cmdkit_logger::{Logger, LoggerError};
