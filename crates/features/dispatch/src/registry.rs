//! Command registry: named commands, each owning named subcommands.

use crate::error::DispatchError;
use crate::flags::{FlagSpec, FlagValues};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Handler invoked with the resolved flag values of its subcommand.
pub type Handler = Box<dyn Fn(&FlagValues) -> anyhow::Result<()> + Send + Sync>;

/// Convenience for subcommands that declare no flags.
pub const NO_FLAGS: [(&str, &str); 0] = [];

/// A leaf executable unit: name, description, declared flags and handler.
pub struct Subcommand {
    name: String,
    description: String,
    flags: BTreeMap<String, FlagSpec>,
    handler: Handler,
}

impl Subcommand {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&FlagValues) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            flags: BTreeMap::new(),
            handler: Box::new(handler),
        }
    }

    /// Declares a flag; declaring the same name again replaces its default.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        let spec = FlagSpec::new(name, default);
        self.flags.insert(spec.name().to_owned(), spec);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared flags, sorted by name.
    pub fn flags(&self) -> impl Iterator<Item = &FlagSpec> {
        self.flags.values()
    }

    #[must_use]
    pub fn flag_default(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(FlagSpec::default_value)
    }

    pub(crate) fn invoke(&self, values: &FlagValues) -> anyhow::Result<()> {
        (self.handler)(values)
    }

    fn validate(&self) -> Result<(), DispatchError> {
        self.flags.values().try_for_each(FlagSpec::validate)
    }
}

impl fmt::Debug for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subcommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// A named group of subcommands.
#[derive(Debug)]
pub struct Command {
    name: String,
    description: String,
    subcommands: BTreeMap<String, Subcommand>,
}

impl Command {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands.get(name)
    }

    /// Subcommands sorted by name.
    pub fn subcommands(&self) -> impl Iterator<Item = &Subcommand> {
        self.subcommands.values()
    }
}

/// Top-level registry of commands.
///
/// Built once during startup through `&mut self` registration calls, then
/// dispatched through `&self` (see [`CommandSet::run`]).
#[derive(Debug)]
pub struct CommandSet {
    name: String,
    commands: BTreeMap<String, Command>,
}

impl CommandSet {
    /// Creates an empty registry. `name` is shown in the usage line.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), commands: BTreeMap::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Commands sorted by name.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Adds a top-level command with no subcommands.
    ///
    /// # Errors
    /// Returns [`DispatchError::DuplicateCommand`] if `name` is already registered;
    /// the existing command and its subcommands are kept.
    pub fn register_command(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), DispatchError> {
        let name = name.into();
        if self.commands.contains_key(&name) {
            warn!(command = %name, "Command already registered");
            return Err(DispatchError::DuplicateCommand { name, context: None });
        }

        debug!(command = %name, "Registered command");
        self.commands.insert(
            name.clone(),
            Command { name, description: description.into(), subcommands: BTreeMap::new() },
        );
        Ok(())
    }

    /// Adds a subcommand under `command`, declaring each `(flag, default)` pair.
    ///
    /// A subcommand with the same name replaces the previous one.
    ///
    /// # Errors
    /// * [`DispatchError::CommandNotFound`] if `command` is not registered.
    /// * [`DispatchError::InvalidFlagName`] if a flag name cannot be used as `--name`.
    ///
    /// # Example
    /// ```rust
    /// use cmdkit_dispatch::CommandSet;
    ///
    /// let mut commands = CommandSet::new("app");
    /// commands.register_command("db", "Database operations")?;
    /// commands.register_subcommand("db", "migrate", "Apply migrations", [("dry-run", "false")], |flags| {
    ///     assert_eq!(flags.get("dry-run"), Some("true"));
    ///     Ok(())
    /// })?;
    ///
    /// commands.run(["app", "db", "migrate", "--dry-run", "true"])?;
    /// # Ok::<(), cmdkit_dispatch::DispatchError>(())
    /// ```
    pub fn register_subcommand<I, K, V, F>(
        &mut self,
        command: &str,
        name: impl Into<String>,
        description: impl Into<String>,
        flags: I,
        handler: F,
    ) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        F: Fn(&FlagValues) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let subcommand = flags
            .into_iter()
            .fold(Subcommand::new(name, description, handler), |sub, (flag, default)| {
                sub.flag(flag, default)
            });
        self.add_subcommand(command, subcommand)
    }

    /// Adds a pre-built [`Subcommand`] under `command`.
    ///
    /// # Errors
    /// Same as [`CommandSet::register_subcommand`].
    pub fn add_subcommand(
        &mut self,
        command: &str,
        subcommand: Subcommand,
    ) -> Result<(), DispatchError> {
        let Some(parent) = self.commands.get_mut(command) else {
            warn!(
                %command,
                subcommand = %subcommand.name,
                "Command not found, subcommand not registered"
            );
            return Err(DispatchError::CommandNotFound {
                name: command.to_owned(),
                context: Some("registering subcommand".into()),
            });
        };
        subcommand.validate()?;

        let name = subcommand.name.clone();
        if parent.subcommands.insert(name.clone(), subcommand).is_some() {
            warn!(%command, subcommand = %name, "Replaced existing subcommand");
        } else {
            debug!(%command, subcommand = %name, "Registered subcommand");
        }
        Ok(())
    }

    /// Renders every command and, indented beneath it, its subcommands and their flags.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut out = String::from("Available commands:\n");
        for command in self.commands.values() {
            let _ = writeln!(out, "  {}: {}", command.name, command.description);
            for sub in command.subcommands.values() {
                let _ = writeln!(out, "    - {}: {}", sub.name, sub.description);
                for flag in sub.flags.values() {
                    let _ = writeln!(
                        out,
                        "        --{} (default: {:?})",
                        flag.name(),
                        flag.default_value()
                    );
                }
            }
        }
        out
    }

    /// Writes [`CommandSet::usage`] to stdout.
    ///
    /// # Errors
    /// Returns [`DispatchError::Io`] if stdout cannot be written.
    pub fn print_usage(&self) -> Result<(), DispatchError> {
        self.write_usage(&mut io::stdout())
    }

    pub(crate) fn write_usage<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), DispatchError> {
        out.write_all(self.usage().as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
