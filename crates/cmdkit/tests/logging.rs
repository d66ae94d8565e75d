use cmdkit::{AppError, CliApp, EnvConfig};
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[derive(Debug, Default, EnvConfig)]
#[env(crate = "cmdkit::env")]
struct Config {
    #[env(skip)]
    _unused: (),
}

#[test]
fn log_settings_drive_the_subscriber() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let dir = log_dir.to_string_lossy().into_owned();
    let env = HashMap::from([
        ("LOGGED_LOG_LEVEL", "logged=info".to_owned()),
        ("LOGGED_LOG_JSON", "true".to_owned()),
        ("LOGGED_LOG_DIR", dir),
    ]);

    let app = CliApp::<Config>::from_source("logged", env)?;
    let logger = app.init_logging()?;
    assert!(logger.writes_files());

    tracing::info!(target: "logged", answer = 42, "from the app");

    let err = app.init_logging().unwrap_err();
    assert!(matches!(err, AppError::Logger { .. }));

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let contents = fs::read_dir(&log_dir)?
        .flatten()
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|entry| fs::read_to_string(entry.path()))
        .collect::<Result<String, _>>()?;
    assert!(contents.contains(r#""answer":42"#));

    Ok(())
}
