use cmdkit::{AppError, CliApp, EnvConfig, EnvError, FlagValues, LogSettings, NO_FLAGS};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, PartialEq, Eq, EnvConfig)]
#[env(crate = "cmdkit::env")]
struct Config {
    database_url: String,
    port: u16,
    debug_mode: bool,
}

#[test]
fn binds_config_and_log_settings_from_one_source() {
    let env = HashMap::from([
        ("MY_APP_PORT", "8080"),
        ("MY_APP_DATABASE_URL", "postgres://localhost/app"),
        ("MY_APP_LOG_LEVEL", "debug"),
        ("MY_APP_LOG_JSON", "True"),
        ("MY_APP_LOG_DIR", "/var/log/my-app"),
    ]);

    let app = CliApp::<Config>::from_source("my-app", env).unwrap();

    assert_eq!(app.name(), "my-app");
    assert_eq!(
        *app.config(),
        Config {
            database_url: "postgres://localhost/app".to_owned(),
            port: 8080,
            debug_mode: false,
        }
    );
    assert_eq!(
        *app.log_settings(),
        LogSettings {
            level: "debug".to_owned(),
            json: true,
            dir: Some(PathBuf::from("/var/log/my-app")),
        }
    );
    assert_eq!(app.commands().name(), "my-app");
}

#[test]
fn empty_environment_keeps_defaults() {
    let app = CliApp::<Config>::from_source("app", HashMap::<String, String>::new()).unwrap();
    assert_eq!(*app.config(), Config::default());
    assert_eq!(*app.log_settings(), LogSettings::default());
}

#[test]
fn invalid_value_is_a_configuration_error() {
    let env = HashMap::from([("APP_PORT", "abc")]);

    let err = CliApp::<Config>::from_source("app", env).unwrap_err();

    assert!(!err.is_usage());
    let AppError::Env { source, context } = &err else { panic!("unexpected error: {err:?}") };
    assert!(matches!(source, EnvError::FieldParse { field: "port", .. }));
    assert_eq!(context.as_deref(), Some("Loading application config"));
    assert!(err.to_string().starts_with("Configuration error (Loading application config): "));
}

#[test]
fn dispatch_errors_keep_their_classification() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut app = CliApp::<Config>::from_source("app", HashMap::<String, String>::new()).unwrap();
    app.commands_mut().register_command("db", "Database operations").unwrap();
    let seen = Arc::clone(&calls);
    app.commands_mut()
        .register_subcommand(
            "db",
            "migrate",
            "Apply migrations",
            [("dry-run", "false")],
            move |flags: &FlagValues| {
                seen.lock().unwrap().push(flags.get_bool("dry-run"));
                Ok(())
            },
        )
        .unwrap();
    app.commands_mut()
        .register_subcommand("db", "drop", "Drop everything", NO_FLAGS, |_| {
            anyhow::bail!("refused")
        })
        .unwrap();

    let mut out = Vec::new();
    app.run_with_output(["app", "db", "migrate", "--dry-run", "true"], &mut out).unwrap();
    assert_eq!(*calls.lock().unwrap(), vec![true]);

    let usage = app.run_with_output(["app", "db"], &mut out).unwrap_err();
    assert!(usage.is_usage());
    assert_eq!(usage.to_string(), "missing command or subcommand");

    let handler = app.run_with_output(["app", "db", "drop"], &mut out).unwrap_err();
    assert!(!handler.is_usage());
    assert_eq!(handler.to_string(), "Handler for 'db drop' failed: refused");
}
