//! Static field schema: which fields a config exposes and how a raw value is coerced into each.

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Semantic type of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Assigned verbatim.
    String,
    /// Parsed as a base-10 integer of the field's width.
    Integer,
    /// `true` when the value equals `"true"` ignoring ASCII case, `false` otherwise.
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        })
    }
}

/// A field type that can be coerced from an environment variable value.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be bound from an environment variable",
    label = "unsupported field type",
    note = "supported types are `String`, `PathBuf`, `bool`, the integer types and `Option` of those",
    note = "mark the field with `#[env(skip)]` to leave it out of the schema"
)]
pub trait EnvValue: Sized {
    /// Semantic type reported for this field.
    const KIND: FieldKind;

    /// Coerces a raw environment value.
    ///
    /// # Errors
    /// Returns [`ParseIntError`] when an integer field receives a non-numeric or out-of-range value.
    fn parse_env(raw: &str) -> Result<Self, ParseIntError>;
}

impl EnvValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn parse_env(raw: &str) -> Result<Self, ParseIntError> {
        Ok(raw.to_owned())
    }
}

impl EnvValue for PathBuf {
    const KIND: FieldKind = FieldKind::String;

    fn parse_env(raw: &str) -> Result<Self, ParseIntError> {
        Ok(Self::from(raw))
    }
}

impl EnvValue for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn parse_env(raw: &str) -> Result<Self, ParseIntError> {
        Ok(raw.eq_ignore_ascii_case("true"))
    }
}

impl<T: EnvValue> EnvValue for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn parse_env(raw: &str) -> Result<Self, ParseIntError> {
        T::parse_env(raw).map(Some)
    }
}

macro_rules! integer_env_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn parse_env(raw: &str) -> Result<Self, ParseIntError> {
                    raw.parse()
                }
            }
        )*
    };
}

integer_env_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Writes a coerced value into its field.
pub type Assign<T> = fn(&mut T, &str) -> Result<(), ParseIntError>;

/// One bindable field of a config struct.
pub struct EnvField<T> {
    field: &'static str,
    key: &'static str,
    kind: FieldKind,
    assign: Assign<T>,
}

impl<T> EnvField<T> {
    /// Declares a field whose environment key is the field name itself.
    #[must_use]
    pub const fn new(field: &'static str, kind: FieldKind, assign: Assign<T>) -> Self {
        Self { field, key: field, kind, assign }
    }

    /// Overrides the key appended to the prefix when deriving the variable name.
    #[must_use]
    pub const fn with_key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Coerces `raw` and stores it. On failure the target is left untouched.
    ///
    /// # Errors
    /// Propagates the integer parse failure of the field's type.
    pub fn assign(&self, target: &mut T, raw: &str) -> Result<(), ParseIntError> {
        (self.assign)(target, raw)
    }
}

impl<T> fmt::Debug for EnvField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvField")
            .field("field", &self.field)
            .field("key", &self.key)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A configuration struct with a statically declared field schema.
///
/// Usually derived with `#[derive(EnvConfig)]`; a hand-written schema works the same way.
pub trait EnvConfig: Sized {
    /// Fields that can be set from the environment, in declaration order.
    fn schema() -> Vec<EnvField<Self>>;
}
