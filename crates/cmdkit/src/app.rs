use crate::error::{AppError, AppErrorExt};
use crate::settings::LogSettings;
use cmdkit_dispatch::CommandSet;
use cmdkit_env::{EnvBinder, EnvConfig, EnvSource, ProcessEnv};
use cmdkit_logger::{LevelFilter, LogFormat, Logger};
use std::io::Write;
use tracing::{debug, info};

/// Startup wiring for a command-line application.
///
/// Construction binds the application config `C` from `<NAME>_*` and the
/// [`LogSettings`] from `<NAME>_LOG_*`, where `<NAME>` is the application name
/// uppercased with `-` replaced by `_`. Commands are then registered through
/// [`CliApp::commands_mut`] and the command line is dispatched with [`CliApp::run`].
#[derive(Debug)]
pub struct CliApp<C> {
    name: String,
    config: C,
    log: LogSettings,
    commands: CommandSet,
}

impl<C: EnvConfig + Default> CliApp<C> {
    /// Binds configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`AppError::Env`] if a variable is set but cannot be coerced.
    pub fn new(name: impl Into<String>) -> Result<Self, AppError> {
        Self::from_source(name, ProcessEnv)
    }

    /// Binds configuration from `source` instead of the process environment.
    ///
    /// # Errors
    /// Returns [`AppError::Env`] if a variable is set but cannot be coerced.
    pub fn from_source<S: EnvSource>(name: impl Into<String>, source: S) -> Result<Self, AppError> {
        let name = name.into();
        let prefix = env_prefix(&name);

        let config: C = EnvBinder::new(prefix.as_str())
            .with_source(&source)
            .load()
            .context("Loading application config")?;
        let log: LogSettings = EnvBinder::new(format!("{prefix}_log"))
            .with_source(&source)
            .load()
            .context("Loading log settings")?;

        debug!(app = %name, %prefix, "Configuration bound");
        Ok(Self { commands: CommandSet::new(name.clone()), name, config, log })
    }
}

impl<C> CliApp<C> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    #[must_use]
    pub const fn log_settings(&self) -> &LogSettings {
        &self.log
    }

    #[must_use]
    pub const fn commands(&self) -> &CommandSet {
        &self.commands
    }

    pub const fn commands_mut(&mut self) -> &mut CommandSet {
        &mut self.commands
    }

    /// Installs the global subscriber described by the bound [`LogSettings`].
    ///
    /// A `level` that parses as a single level keeps `RUST_LOG` in effect;
    /// anything else is used as the complete filter.
    ///
    /// # Errors
    /// Returns [`AppError::Logger`] if a subscriber is already installed or the settings are invalid.
    pub fn init_logging(&self) -> Result<Logger, AppError> {
        let format = LogFormat::from_json_flag(self.log.json);
        let builder = Logger::builder(self.name.clone()).console(Some(format));

        let builder = match self.log.level.parse::<LevelFilter>() {
            Ok(level) => builder.level(level),
            Err(_) => builder.directives(self.log.level.clone()),
        };
        let builder = match &self.log.dir {
            Some(dir) => builder.file(dir, format),
            None => builder,
        };

        let logger = builder.init().context("Initializing logging")?;

        info!(app = %self.name, level = %self.log.level, "Logging initialized");
        Ok(logger)
    }

    /// Dispatches `argv` (`[program, command, subcommand, ...flags]`), writing usage text to stdout.
    ///
    /// # Errors
    /// Returns [`AppError::Dispatch`]; use [`AppError::is_usage`] to tell bad input from handler failures.
    pub fn run<I, T>(&self, argv: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.commands.run(argv).map_err(AppError::from)
    }

    /// Dispatches the arguments of the current process.
    ///
    /// # Errors
    /// Same as [`CliApp::run`].
    pub fn run_env(&self) -> Result<(), AppError> {
        self.commands.run_env().map_err(AppError::from)
    }

    /// Same as [`CliApp::run`], writing usage text to `out`.
    ///
    /// # Errors
    /// Same as [`CliApp::run`].
    pub fn run_with_output<I, T, W>(&self, argv: I, out: &mut W) -> Result<(), AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        W: Write + ?Sized,
    {
        self.commands.run_with_output(argv, out).map_err(AppError::from)
    }
}

/// Environment prefix for an application name: `-` becomes `_`; case is left to the binder.
fn env_prefix(name: &str) -> String {
    name.replace('-', "_")
}
