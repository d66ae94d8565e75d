#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates.
//!
//! * [`macro@cmdkit_error`] turns an enum into a `thiserror` error with context support.
//! * [`macro@EnvConfig`] derives the static field schema consumed by the environment binder.
//!
//! The examples below are `ignore`d because they reference crates that depend on this one.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, Error>` and to results carrying a wrapped source error.
/// * **Standard Conversions**: Implements `From<T>` for variants made only of a
///   `source` and a `context` field, enabling the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants wrapping another error (`source` field, or a field marked `#[source]`/`#[from]`)
///    must include a `context: Option<Cow<'static, str>>` field.
/// 3. Tuple and unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use cmdkit_derive::cmdkit_error;
/// use std::borrow::Cow;
///
/// #[cmdkit_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, StoreError> {
///     std::fs::read_to_string("store.db").context("Reading store")
/// }
/// ```
#[proc_macro_attribute]
pub fn cmdkit_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Derives `cmdkit_env::EnvConfig` for a struct with named fields.
///
/// Every field becomes one schema entry whose environment key is the field name
/// (raw identifiers are unescaped). Field types must implement `cmdkit_env::EnvValue`,
/// so unsupported types are rejected at compile time.
///
/// # Field attributes
///
/// * `#[env(skip)]` - the field is not settable from the environment.
/// * `#[env(rename = "KEY")]` - use `KEY` instead of the field name.
///
/// # Container attributes
///
/// * `#[env(crate = "cmdkit::env")]` - path of the binder crate when it is only
///   reachable through a re-export. Defaults to `::cmdkit_env`.
///
/// # Example
///
/// ```rust,ignore
/// use cmdkit_env::EnvConfig;
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Config {
///     #[env(rename = "databaseurl")]
///     database_url: String,
///     port: u16,
///     debug_mode: bool,
///     #[env(skip)]
///     loaded_at: Option<std::time::Instant>,
/// }
/// ```
#[proc_macro_derive(EnvConfig, attributes(env))]
pub fn env_config(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::env::expand(input).into()
}
