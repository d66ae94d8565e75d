use crate::error::DispatchError;
use clap::{Arg, ArgAction};
use std::collections::BTreeMap;

/// A flag accepted by a subcommand, with the value used when it is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    name: String,
    default: String,
}

impl FlagSpec {
    pub fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self { name: name.into(), default: default.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// Rejects names the parser cannot express as `--name`.
    pub(crate) fn validate(&self) -> Result<(), DispatchError> {
        let reason = if self.name.is_empty() {
            "name cannot be empty"
        } else if self.name.starts_with('-') {
            "name must not start with '-'"
        } else if self.name.contains('=') {
            "name must not contain '='"
        } else if self.name.chars().any(char::is_whitespace) {
            "name must not contain whitespace"
        } else {
            return Ok(());
        };

        Err(DispatchError::InvalidFlagName { name: self.name.clone(), reason, context: None })
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for FlagSpec {
    fn from((name, default): (K, V)) -> Self {
        Self::new(name, default)
    }
}

/// Resolved flag values handed to a handler: every declared flag, set or defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues(BTreeMap<String, String>);

impl FlagValues {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// `true` when the flag's value is `"true"` in any ASCII case.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlagValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parses `tokens` against exactly `specs`, using a parser built for this call only.
///
/// Accepts `--name value` and `--name=value`; a repeated flag keeps its last value.
pub(crate) fn parse_flags<'a>(
    subcommand: &str,
    specs: impl IntoIterator<Item = &'a FlagSpec>,
    tokens: &[String],
) -> Result<FlagValues, clap::Error> {
    let specs: Vec<&FlagSpec> = specs.into_iter().collect();

    let parser = specs.iter().fold(
        clap::Command::new(subcommand.to_owned())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true),
        |parser, spec| {
            parser.arg(
                Arg::new(spec.name.clone())
                    .long(spec.name.clone())
                    .value_name("VALUE")
                    .allow_hyphen_values(true)
                    .action(ArgAction::Set),
            )
        },
    );

    let matches = parser.try_get_matches_from(tokens)?;

    Ok(specs
        .iter()
        .map(|spec| {
            let value = matches
                .get_one::<String>(&spec.name)
                .map_or_else(|| spec.default.clone(), Clone::clone);
            (spec.name.clone(), value)
        })
        .collect())
}
