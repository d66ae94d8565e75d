use std::borrow::Cow;

/// Errors produced while registering or dispatching commands.
#[cmdkit_derive::cmdkit_error]
pub enum DispatchError {
    /// Fewer than `[program, command, subcommand]` tokens, or an argument that is not UTF-8.
    #[error("{message}{}", format_context(.context))]
    Usage { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("command '{name}' not found{}", format_context(.context))]
    CommandNotFound { name: String, context: Option<Cow<'static, str>> },

    #[error("subcommand '{name}' not found{}", format_context(.context))]
    SubcommandNotFound { name: String, command: String, context: Option<Cow<'static, str>> },

    #[error("command '{name}' is already registered{}", format_context(.context))]
    DuplicateCommand { name: String, context: Option<Cow<'static, str>> },

    #[error("invalid flag name '{name}'{}: {reason}", format_context(.context))]
    InvalidFlagName { name: String, reason: &'static str, context: Option<Cow<'static, str>> },

    /// The tokens after the subcommand do not match its declared flags.
    #[error("Invalid flags{}: {source}", format_context(.context))]
    InvalidFlags { source: clap::Error, context: Option<Cow<'static, str>> },

    /// The matched handler returned an error.
    #[error("Handler for '{command} {subcommand}' failed{}: {source}", format_context(.context))]
    Handler {
        command: String,
        subcommand: String,
        source: anyhow::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Failed to write usage{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

impl DispatchError {
    /// `true` when the invocation itself was malformed (bad tokens, unknown routing target, bad flags),
    /// as opposed to a registration, handler or output failure.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::Usage { .. }
                | Self::CommandNotFound { .. }
                | Self::SubcommandNotFound { .. }
                | Self::InvalidFlags { .. }
        )
    }
}
