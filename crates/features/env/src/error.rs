use std::borrow::Cow;

/// Errors raised while binding a configuration struct from the environment.
///
/// A config type that is not a struct, or a field whose type has no coercion
/// rule, never reaches this enum: both are rejected when `#[derive(EnvConfig)]`
/// expands.
#[cmdkit_derive::cmdkit_error]
pub enum EnvError {
    /// The variable is set but its value cannot be coerced to the field's integer type.
    /// The field keeps the value it had before binding.
    #[error("Invalid value '{value}' for field '{field}' ({var}){}: {source}", format_context(.context))]
    FieldParse {
        field: &'static str,
        var: String,
        value: String,
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    /// The variable is set but does not hold valid Unicode.
    #[error("Environment variable '{var}' for field '{field}' is not valid unicode{}", format_context(.context))]
    NotUnicode { field: &'static str, var: String, context: Option<Cow<'static, str>> },
}

impl EnvError {
    /// Name of the schema field that failed to bind.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::FieldParse { field, .. } | Self::NotUnicode { field, .. } => *field,
        }
    }

    /// Environment variable the failing value was read from.
    #[must_use]
    pub fn var(&self) -> &str {
        match self {
            Self::FieldParse { var, .. } | Self::NotUnicode { var, .. } => var,
        }
    }
}
