use crate::Logger;
use crate::error::{LoggerError, LoggerErrorExt};
use crate::format::{LogFormat, output_layer};
use std::io;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Daily files kept in the log directory before the oldest is removed.
const MAX_LOG_FILES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileOutput {
    dir: PathBuf,
    format: LogFormat,
}

/// Describes the subscriber to install; nothing global happens until [`LoggerBuilder::init`].
#[derive(Debug)]
#[must_use = "call `init` to install the subscriber"]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    directives: Option<String>,
    console: Option<LogFormat>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            level: LevelFilter::INFO,
            directives: None,
            console: Some(LogFormat::Compact),
            file: None,
        }
    }

    /// Default level; `RUST_LOG` refines it unless directives are set.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Complete filter such as `my_app=debug,cmdkit_env=trace`, replacing level and `RUST_LOG`.
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Console output on stderr in `format`, or none.
    pub const fn console(mut self, format: Option<LogFormat>) -> Self {
        self.console = format;
        self
    }

    /// Daily rolling files `<name>.<date>.log` under `dir`.
    pub fn file(mut self, dir: impl Into<PathBuf>, format: LogFormat) -> Self {
        self.file = Some(FileOutput { dir: dir.into(), format });
        self
    }

    /// Installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the background file writer; keep it alive until shutdown.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, no outputs or unparsable directives.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] when a global subscriber is already installed.
    ///
    /// Configuration errors are reported before anything is installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let filter = self.filter()?;
        if self.console.is_none() && self.file.is_none() {
            return Err(invalid("at least one of console or file output is required"));
        }

        let mut layers = Vec::with_capacity(2);
        if let Some(format) = self.console {
            layers.push(output_layer(io::stderr, format, true));
        }

        let guard = match &self.file {
            Some(output) => {
                let (writer, guard) = self.file_writer(output)?;
                layers.push(output_layer(writer, output.format, false));
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        Ok(Logger { guard })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(invalid("logger name is empty"));
        }

        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => builder
                .parse(directives)
                .map_err(|err| invalid(format!("cannot parse filter '{directives}': {err}"))),
        }
    }

    fn file_writer(&self, output: &FileOutput) -> Result<(NonBlocking, WorkerGuard), LoggerError> {
        std::fs::create_dir_all(&output.dir)
            .context(format!("creating {}", output.dir.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(&self.name)
            .filename_suffix("log")
            .max_log_files(MAX_LOG_FILES)
            .build(&output.dir)?;

        Ok(tracing_appender::non_blocking(appender))
    }
}

fn invalid(message: impl Into<std::borrow::Cow<'static, str>>) -> LoggerError {
    LoggerError::InvalidConfiguration { message: message.into(), context: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_compact_console_at_info() {
        let builder = Logger::builder("svc");
        assert_eq!(builder.level, LevelFilter::INFO);
        assert_eq!(builder.console, Some(LogFormat::Compact));
        assert!(builder.directives.is_none());
        assert!(builder.file.is_none());
    }

    #[test]
    fn file_output_keeps_its_own_format() {
        let builder = Logger::builder("svc")
            .console(Some(LogFormat::Compact))
            .file("/tmp/svc-logs", LogFormat::Json);

        assert_eq!(
            builder.file,
            Some(FileOutput { dir: PathBuf::from("/tmp/svc-logs"), format: LogFormat::Json })
        );
        assert_eq!(builder.console, Some(LogFormat::Compact));
    }

    #[test]
    fn rejects_empty_name() {
        let err = Logger::builder(" ").init().unwrap_err();
        assert_eq!(err.to_string(), "Invalid logger configuration: logger name is empty");
    }

    #[test]
    fn rejects_missing_outputs() {
        let err = Logger::builder("svc").console(None).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn rejects_unparsable_directives() {
        let err = Logger::builder("svc").directives("svc=loud").init().unwrap_err();
        assert!(err.to_string().contains("cannot parse filter 'svc=loud'"));
    }

    #[test]
    fn unusable_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let builder = Logger::builder("svc").file(blocker.join("logs"), LogFormat::Compact);
        let output = builder.file.clone().unwrap();
        let err = builder.file_writer(&output).unwrap_err();

        assert!(matches!(err, LoggerError::Io { context: Some(_), .. }));
    }
}
