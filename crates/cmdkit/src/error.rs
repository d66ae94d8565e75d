use cmdkit_dispatch::DispatchError;
use cmdkit_env::EnvError;
use cmdkit_logger::LoggerError;
use std::borrow::Cow;

/// Errors surfaced by [`crate::CliApp`].
#[cmdkit_derive::cmdkit_error]
pub enum AppError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Env { source: EnvError, context: Option<Cow<'static, str>> },

    #[error("{source}")]
    Dispatch { source: DispatchError, context: Option<Cow<'static, str>> },

    #[error("Logger error{}: {source}", format_context(.context))]
    Logger { source: LoggerError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl AppError {
    /// `true` when the command line itself was malformed; see [`DispatchError::is_usage`].
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Dispatch { source, .. } if source.is_usage())
    }
}
