use crate::error::DispatchError;
use crate::flags::parse_flags;
use crate::registry::CommandSet;
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, warn};

const MISSING_ROUTE: &str = "missing command or subcommand";

impl CommandSet {
    /// Resolves `argv` (`[program, command, subcommand, ...flags]`) and invokes the matched handler.
    ///
    /// Usage and error text for malformed invocations is written to stdout.
    ///
    /// # Errors
    /// See [`CommandSet::run_with_output`].
    pub fn run<I, T>(&self, argv: I) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.run_with_output(argv, &mut io::stdout())
    }

    /// Runs with the arguments of the current process.
    ///
    /// # Errors
    /// [`DispatchError::Usage`] if an argument is not valid UTF-8, otherwise
    /// see [`CommandSet::run_with_output`].
    pub fn run_env(&self) -> Result<(), DispatchError> {
        self.run_os_with_output(std::env::args_os(), &mut io::stdout())
    }

    /// Same as [`CommandSet::run_with_output`] for raw OS arguments.
    ///
    /// Arguments are never converted lossily: a non-UTF-8 token is reported like
    /// any other malformed invocation and no handler runs.
    ///
    /// # Errors
    /// [`DispatchError::Usage`] if an argument is not valid UTF-8, otherwise
    /// see [`CommandSet::run_with_output`].
    pub fn run_os_with_output<I, W>(&self, argv: I, out: &mut W) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = OsString>,
        W: Write + ?Sized,
    {
        let mut args = Vec::new();
        for (position, arg) in argv.into_iter().enumerate() {
            match arg.into_string() {
                Ok(arg) => args.push(arg),
                Err(raw) => {
                    self.report(out, format_args!("Error: Argument {position} is not valid UTF-8"));
                    let message =
                        format!("argument {position} is not valid UTF-8: {}", raw.display());
                    return Err(DispatchError::Usage { message: message.into(), context: None });
                },
            }
        }
        self.run_with_output(args, out)
    }

    /// Same as [`CommandSet::run`], writing usage and error text to `out`.
    ///
    /// At most one handler is invoked, and only when routing and flag parsing succeed.
    ///
    /// # Errors
    /// * [`DispatchError::Usage`] when fewer than three tokens are given.
    /// * [`DispatchError::CommandNotFound`] / [`DispatchError::SubcommandNotFound`] for unknown routes.
    /// * [`DispatchError::InvalidFlags`] when the remaining tokens do not fit the subcommand's flags.
    /// * [`DispatchError::Handler`] when the handler itself fails.
    pub fn run_with_output<I, T, W>(&self, argv: I, out: &mut W) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        W: Write + ?Sized,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();

        let [_, command_name, subcommand_name, tokens @ ..] = argv.as_slice() else {
            self.report(
                out,
                format_args!("Usage: {} <command> <subcommand> [--flags]", self.name()),
            );
            return Err(DispatchError::Usage { message: MISSING_ROUTE.into(), context: None });
        };

        let Some(command) = self.command(command_name) else {
            self.report(out, format_args!("Error: Command '{command_name}' not found"));
            return Err(DispatchError::CommandNotFound {
                name: command_name.clone(),
                context: None,
            });
        };

        let Some(subcommand) = command.subcommand(subcommand_name) else {
            self.report(
                out,
                format_args!(
                    "Error: Subcommand '{subcommand_name}' not found in command '{command_name}'"
                ),
            );
            return Err(DispatchError::SubcommandNotFound {
                name: subcommand_name.clone(),
                command: command_name.clone(),
                context: None,
            });
        };

        let values = match parse_flags(subcommand.name(), subcommand.flags(), tokens) {
            Ok(values) => values,
            Err(source) => {
                emit(out, format_args!("{}", source.render()));
                return Err(DispatchError::InvalidFlags {
                    source,
                    context: Some(format!("{command_name} {subcommand_name}").into()),
                });
            },
        };

        debug!(
            command = %command_name,
            subcommand = %subcommand_name,
            flags = ?values,
            "Dispatching"
        );

        subcommand.invoke(&values).map_err(|source| DispatchError::Handler {
            command: command_name.clone(),
            subcommand: subcommand_name.clone(),
            source,
            context: None,
        })
    }

    /// Writes a one-line message followed by the usage text.
    fn report<W: Write + ?Sized>(&self, out: &mut W, message: fmt::Arguments<'_>) {
        emit(out, message);
        if let Err(err) = self.write_usage(out) {
            warn!(error = %err, "Failed to write usage");
        }
    }
}

/// Writes a line of side-channel output; a broken sink never masks the dispatch result.
fn emit<W: Write + ?Sized>(out: &mut W, message: fmt::Arguments<'_>) {
    if let Err(err) = writeln!(out, "{message}") {
        warn!(error = %err, "Failed to write dispatcher output");
    }
}

#[cfg(test)]
mod tests {
    use crate::{CommandSet, DispatchError, NO_FLAGS};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_set() -> (CommandSet, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut commands = CommandSet::new("app_name");
        commands.register_command("test", "A test command").unwrap();
        let counter = Arc::clone(&calls);
        commands
            .register_subcommand("test", "run", "A test subcommand", NO_FLAGS, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();
        (commands, calls)
    }

    #[test]
    fn too_few_tokens_print_usage_line() {
        let (commands, calls) = counting_set();
        let mut out = Vec::new();

        let err = commands.run_with_output(["app_name", "test"], &mut out).unwrap_err();

        assert!(matches!(err, DispatchError::Usage { .. }));
        assert_eq!(err.to_string(), "missing command or subcommand");
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Usage: app_name <command> <subcommand> [--flags]\n"));
        assert!(out.contains("Available commands:"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_subcommand_names_its_command() {
        let (commands, calls) = counting_set();
        let mut out = Vec::new();

        let err = commands.run_with_output(["app_name", "test", "invalid"], &mut out).unwrap_err();

        assert_eq!(err.to_string(), "subcommand 'invalid' not found");
        assert!(err.is_usage());
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Error: Subcommand 'invalid' not found in command 'test'"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn repeated_runs_dispatch_each_time() {
        let (commands, calls) = counting_set();
        let mut out = Vec::new();

        commands.run_with_output(["app_name", "test", "run"], &mut out).unwrap();
        commands.run_with_output(["app_name", "test", "run"], &mut out).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_argument_is_a_usage_error() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let (commands, calls) = counting_set();
        let argv = [
            OsString::from("app_name"),
            OsString::from("test"),
            OsString::from_vec(vec![b'r', 0xff, b'n']),
        ];
        let mut out = Vec::new();

        let err = commands.run_os_with_output(argv, &mut out).unwrap_err();

        assert!(matches!(err, DispatchError::Usage { .. }));
        assert!(err.to_string().starts_with("argument 2 is not valid UTF-8"));
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Error: Argument 2 is not valid UTF-8\n"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn utf8_os_arguments_dispatch() {
        let (commands, calls) = counting_set();
        let argv = ["app_name", "test", "run"].map(std::ffi::OsString::from);

        commands.run_os_with_output(argv, &mut Vec::new()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn broken_output_does_not_mask_routing_error() {
        struct Broken;
        impl std::io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let (commands, _) = counting_set();
        let err = commands.run_with_output(["app_name", "nope", "x"], &mut Broken).unwrap_err();
        assert!(matches!(err, DispatchError::CommandNotFound { .. }));
    }
}
