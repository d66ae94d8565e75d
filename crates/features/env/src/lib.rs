//! # Environment Binder
//!
//! Populates configuration structs from prefixed environment variables.
//!
//! A config type declares its bindable fields through a static schema, normally
//! generated with `#[derive(EnvConfig)]`. For every schema field the binder reads
//! `<PREFIX>_<FIELD>` (both uppercased) and coerces the value by the field's
//! semantic type:
//!
//! * **string** (`String`, `PathBuf`): assigned verbatim.
//! * **integer** (any primitive integer): base-10 parse, failing with
//!   [`EnvError::FieldParse`].
//! * **boolean**: `true` when the value is `"true"` in any ASCII case.
//! * `Option<T>` of the above becomes `Some(value)`.
//!
//! Unset variables are not an error; the field keeps whatever it held.
//!
//! ## Example
//!
//! ```rust
//! use cmdkit_env::{EnvBinder, EnvConfig};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Config {
//!     database_url: String,
//!     port: u16,
//!     debug_mode: bool,
//! }
//!
//! let env = HashMap::from([("APP_PORT", "8080"), ("APP_DEBUG_MODE", "TRUE")]);
//! let config: Config = EnvBinder::new("app").with_source(env).load()?;
//!
//! assert_eq!(config.port, 8080);
//! assert!(config.debug_mode);
//! assert!(config.database_url.is_empty());
//! # Ok::<(), cmdkit_env::EnvError>(())
//! ```

mod binder;
mod error;
pub mod schema;
mod source;

pub use crate::binder::{EnvBinder, env_var_name, load_env_with_prefix};
pub use crate::error::{EnvError, EnvErrorExt};
pub use crate::schema::{Assign, EnvConfig, EnvField, EnvValue, FieldKind};
pub use crate::source::{EnvSource, ProcessEnv};
pub use cmdkit_derive::EnvConfig;
