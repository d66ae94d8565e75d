use cmdkit_env::EnvConfig;
use std::path::PathBuf;

/// Logging options read from `<APP>_LOG_*`.
#[derive(Debug, Clone, PartialEq, Eq, EnvConfig)]
pub struct LogSettings {
    /// A level (`info`, `debug`, ...) or a full filter such as `my_app=debug,cmdkit_env=trace`.
    pub level: String,
    /// Emit one JSON object per line instead of compact text.
    pub json: bool,
    /// Directory for rolling log files; file output is off when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, dir: None }
    }
}
