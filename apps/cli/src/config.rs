use cmdkit::EnvConfig;

/// Settings read from `CMDKIT_*`.
#[derive(Debug, Clone, PartialEq, Eq, EnvConfig)]
#[env(crate = "cmdkit::env")]
pub(crate) struct AppConfig {
    pub(crate) database_url: String,
    pub(crate) port: u16,
    pub(crate) debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { database_url: "sqlite://cmdkit.db".to_owned(), port: 8080, debug_mode: false }
    }
}
