//! Config command - inspect and edit the supmatch configuration file.
//!
//! Every subcommand works on the file given with the global `-c/--config`
//! flag, falling back to `<config dir>/supmatch/config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use supmatch_core::models::SupmatchConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one setting (e.g., "search.workers")
    Get { key: String },

    /// Change one setting; the value is read as JSON, else as a string
    Set { key: String, value: String },

    /// Print the configuration file location
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file(config_path);
    match args.command {
        ConfigCommand::Show => show(config_path, &path),
        ConfigCommand::Init { force } => init(&path, force),
        ConfigCommand::Get { key } => get(config_path, &key),
        ConfigCommand::Set { key, value } => set(config_path, &path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

/// The explicit config file, else the per-user default location.
fn config_file(config_path: Option<&str>) -> PathBuf {
    match config_path {
        Some(path) => PathBuf::from(path),
        None => dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("supmatch")
            .join("config.json"),
    }
}

/// Load the config file given on the command line, else the default file if
/// present, else built-in defaults.
///
/// An explicit path must exist.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SupmatchConfig> {
    if let Some(path) = config_path {
        return Ok(SupmatchConfig::from_file(Path::new(path))?);
    }

    let default_path = config_file(None);
    if default_path.exists() {
        Ok(SupmatchConfig::from_file(&default_path)?)
    } else {
        Ok(SupmatchConfig::default())
    }
}

/// Like [`load_config`], but a missing explicit file yields defaults so it can be created.
fn load_or_default(config_path: Option<&str>, path: &Path) -> anyhow::Result<SupmatchConfig> {
    if path.exists() {
        load_config(config_path)
    } else {
        Ok(SupmatchConfig::default())
    }
}

/// `search.workers` -> `/search/workers`
fn pointer(key: &str) -> String {
    key.split('.').fold(String::new(), |mut acc, part| {
        acc.push('/');
        acc.push_str(part);
        acc
    })
}

fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    json.pointer(&pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))
}

/// Replace the value at `key`, which must already exist.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let slot = json
        .pointer_mut(&pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
    if slot.is_object() {
        anyhow::bail!("{} is a section, set one of its keys instead", key);
    }
    *slot = value;
    Ok(())
}

fn show(config_path: Option<&str>, path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            path.display()
        );
    }
    let config = load_or_default(config_path, path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    SupmatchConfig::default().save(path)?;
    println!("{} Created {}", style("✓").green(), path.display());
    Ok(())
}

fn get(config_path: Option<&str>, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_config(config_path)?)?;
    println!("{}", serde_json::to_string_pretty(lookup(&json, key)?)?);
    Ok(())
}

fn set(config_path: Option<&str>, path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let value: Value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let mut json = serde_json::to_value(load_or_default(config_path, path)?)?;
    assign(&mut json, key, value.clone())?;

    let config: SupmatchConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!("{} Set {} = {}", style("✓").green(), key, value);
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());
    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'supmatch config init' to create it.");
    }
    Ok(())
}
