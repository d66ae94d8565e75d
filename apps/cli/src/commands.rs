use crate::config::AppConfig;
use crate::ENV_PREFIX;
use anyhow::bail;
use cmdkit::env::env_var_name;
use cmdkit::{CommandSet, DispatchError, FlagValues, NO_FLAGS, Subcommand};
use std::sync::Arc;
use tracing::info;

/// Registers the `db` and `config` command groups.
///
/// # Errors
/// Propagates registration failures from the command set.
pub(crate) fn register(commands: &mut CommandSet, config: &AppConfig) -> Result<(), DispatchError> {
    let config = Arc::new(config.clone());

    commands.register_command("db", "Database maintenance")?;
    commands.register_command("config", "Inspect the bound configuration")?;

    let cfg = Arc::clone(&config);
    commands.add_subcommand(
        "db",
        Subcommand::new("migrate", "Apply pending migrations", move |flags| migrate(&cfg, flags))
            .flag("dry-run", "false")
            .flag("steps", "all"),
    )?;

    let cfg = Arc::clone(&config);
    commands.register_subcommand("db", "status", "Show the database target", NO_FLAGS, move |_| {
        println!("database: {}", cfg.database_url);
        println!("port: {}", cfg.port);
        Ok(())
    })?;

    commands.register_subcommand(
        "config",
        "show",
        "Print the configuration",
        [("format", "text")],
        move |flags| show(&config, flags),
    )?;

    Ok(())
}

fn migrate(config: &AppConfig, flags: &FlagValues) -> anyhow::Result<()> {
    let steps = match flags.get("steps").unwrap_or("all") {
        "all" => None,
        raw => match raw.parse::<u32>() {
            Ok(steps) => Some(steps),
            Err(err) => bail!("invalid --steps value '{raw}': {err}"),
        },
    };
    let scope =
        steps.map_or_else(|| "all pending migrations".to_owned(), |n| format!("{n} migration(s)"));

    if flags.get_bool("dry-run") {
        println!("Dry run: would apply {scope} to {}", config.database_url);
        return Ok(());
    }

    info!(database = %config.database_url, ?steps, "Applying migrations");
    println!("Applied {scope} to {}", config.database_url);
    Ok(())
}

fn show(config: &AppConfig, flags: &FlagValues) -> anyhow::Result<()> {
    let entries = [
        ("database_url", config.database_url.clone()),
        ("port", config.port.to_string()),
        ("debug_mode", config.debug_mode.to_string()),
    ];

    match flags.get("format").unwrap_or("text") {
        "text" => entries.iter().for_each(|(key, value)| println!("{key} = {value}")),
        "env" => entries
            .iter()
            .for_each(|(key, value)| println!("{}={value}", env_var_name(ENV_PREFIX, key))),
        other => bail!("unknown format '{other}', expected 'text' or 'env'"),
    }
    Ok(())
}
