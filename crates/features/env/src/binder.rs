use crate::error::EnvError;
use crate::schema::EnvConfig;
use crate::source::{EnvSource, ProcessEnv};
use tracing::{debug, trace};

/// Binds [`EnvConfig`] structs from variables named `<PREFIX>_<KEY>`.
///
/// The binder is fail-fast: the first field that cannot be coerced stops the pass.
/// Fields bound before the failure keep their new values; the failing field and
/// everything after it are left as they were.
#[derive(Debug, Clone)]
pub struct EnvBinder<S = ProcessEnv> {
    prefix: String,
    source: S,
}

impl EnvBinder {
    /// Creates a binder reading the process environment.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), source: ProcessEnv }
    }
}

impl<S> EnvBinder<S> {
    /// Replaces the variable source, e.g. with a map in tests.
    pub fn with_source<N: EnvSource>(self, source: N) -> EnvBinder<N> {
        EnvBinder { prefix: self.prefix, source }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Variable name used for a schema key under this binder's prefix.
    #[must_use]
    pub fn var_name(&self, key: &str) -> String {
        env_var_name(&self.prefix, key)
    }
}

impl<S: EnvSource> EnvBinder<S> {
    /// Populates `config` from the source. Unset variables leave their field untouched.
    ///
    /// # Errors
    /// * [`EnvError::FieldParse`] when an integer field receives a value it cannot hold.
    /// * [`EnvError::NotUnicode`] when a variable is set to non-Unicode data.
    pub fn bind<T: EnvConfig>(&self, config: &mut T) -> Result<(), EnvError> {
        for field in T::schema() {
            let var = self.var_name(field.key());

            let Some(raw) = self.source.lookup(&var) else {
                debug!(
                    %var,
                    field = field.field(),
                    "Environment variable not set, keeping current value"
                );
                continue;
            };

            let value = raw.into_string().map_err(|_| EnvError::NotUnicode {
                field: field.field(),
                var: var.clone(),
                context: None,
            })?;

            field.assign(config, &value).map_err(|source| EnvError::FieldParse {
                field: field.field(),
                var: var.clone(),
                value,
                source,
                context: None,
            })?;

            trace!(
                %var,
                field = field.field(),
                kind = %field.kind(),
                "Bound field from environment"
            );
        }

        Ok(())
    }

    /// Builds a config from its [`Default`] and binds it.
    ///
    /// # Errors
    /// Same as [`EnvBinder::bind`].
    pub fn load<T: EnvConfig + Default>(&self) -> Result<T, EnvError> {
        let mut config = T::default();
        self.bind(&mut config)?;
        Ok(config)
    }
}

/// Builds the variable name for `key`: `uppercase(prefix) + "_" + uppercase(key)`.
///
/// An empty prefix yields the bare uppercased key.
#[must_use]
pub fn env_var_name(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_uppercase()
    } else {
        format!("{}_{}", prefix.to_uppercase(), key.to_uppercase())
    }
}

/// Populates `config` from the process environment using `prefix`.
///
/// # Errors
/// See [`EnvBinder::bind`].
///
/// # Example
/// ```rust
/// use cmdkit_env::{EnvConfig, load_env_with_prefix};
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Config {
///     port: u16,
/// }
///
/// let mut config = Config { port: 4000 };
/// load_env_with_prefix("cmdkit_doc_example", &mut config)?;
/// assert_eq!(config.port, 4000);
/// # Ok::<(), cmdkit_env::EnvError>(())
/// ```
pub fn load_env_with_prefix<T: EnvConfig>(prefix: &str, config: &mut T) -> Result<(), EnvError> {
    EnvBinder::new(prefix).bind(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnvField, EnvValue, FieldKind};
    use std::collections::HashMap;

    #[derive(Debug, Default, PartialEq)]
    struct Manual {
        name: String,
        retries: u8,
    }

    impl EnvConfig for Manual {
        fn schema() -> Vec<EnvField<Self>> {
            vec![
                EnvField::new("name", String::KIND, |t: &mut Self, raw| {
                    t.name = String::parse_env(raw)?;
                    Ok(())
                }),
                EnvField::new("retries", FieldKind::Integer, |t: &mut Self, raw| {
                    t.retries = u8::parse_env(raw)?;
                    Ok(())
                })
                .with_key("max_retries"),
            ]
        }
    }

    #[test]
    fn var_names_are_uppercased() {
        assert_eq!(env_var_name("app", "databaseUrl"), "APP_DATABASEURL");
        assert_eq!(env_var_name("app_name", "test"), "APP_NAME_TEST");
        assert_eq!(env_var_name("", "port"), "PORT");
    }

    #[test]
    fn hand_written_schema_uses_custom_key() {
        let env = HashMap::from([("SVC_NAME", "api"), ("SVC_MAX_RETRIES", "3")]);
        let config: Manual = EnvBinder::new("svc").with_source(&env).load().unwrap();
        assert_eq!(config, Manual { name: "api".to_owned(), retries: 3 });
    }

    #[test]
    fn fail_fast_keeps_earlier_fields() {
        let env = HashMap::from([("SVC_NAME", "api"), ("SVC_MAX_RETRIES", "300")]);
        let mut config = Manual { name: "old".to_owned(), retries: 1 };

        let err = EnvBinder::new("svc").with_source(env).bind(&mut config).unwrap_err();

        assert!(matches!(err, EnvError::FieldParse { field: "retries", .. }));
        assert_eq!(err.var(), "SVC_MAX_RETRIES");
        assert_eq!(config, Manual { name: "api".to_owned(), retries: 1 });
    }
}
