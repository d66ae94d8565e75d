//! # Command Dispatcher
//!
//! A two-level `<program> <command> <subcommand> [--flag value]...` dispatcher.
//!
//! ## Model
//!
//! * [`CommandSet`] owns named [`Command`]s; each command owns named [`Subcommand`]s.
//! * A subcommand declares its flags ([`FlagSpec`]: name and default) and a handler.
//! * Names are unique at each level and everything is enumerated in name order.
//!
//! ## Dispatch
//!
//! [`CommandSet::run`] checks for at least three tokens, resolves the command and
//! subcommand, then parses the remaining tokens with a parser built for that
//! subcommand alone. Flags declared by other subcommands are unknown there. The
//! handler receives [`FlagValues`] holding every declared flag, either as given
//! or defaulted. Values stay strings; handlers interpret them.
//!
//! Resolution failures write a message plus the usage text to the output and
//! return a typed [`DispatchError`]. The dispatcher never exits the process.
//!
//! ## Example
//!
//! ```rust
//! use cmdkit_dispatch::{CommandSet, Subcommand};
//!
//! let mut commands = CommandSet::new("app");
//! commands.register_command("db", "Database operations")?;
//! commands.add_subcommand(
//!     "db",
//!     Subcommand::new("migrate", "Apply pending migrations", |flags| {
//!         if flags.get_bool("dry-run") {
//!             return Ok(());
//!         }
//!         anyhow::bail!("refusing to touch the database in a doc test")
//!     })
//!     .flag("dry-run", "false"),
//! )?;
//!
//! commands.run(["app", "db", "migrate", "--dry-run", "true"])?;
//! # Ok::<(), cmdkit_dispatch::DispatchError>(())
//! ```

mod dispatcher;
mod error;
mod flags;
mod registry;

pub use crate::error::{DispatchError, DispatchErrorExt};
pub use crate::flags::{FlagSpec, FlagValues};
pub use crate::registry::{Command, CommandSet, Handler, NO_FLAGS, Subcommand};
