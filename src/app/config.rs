use crate::app::cli::Cli;
use crate::app::models::{InputSource, RuntimeConfig};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    root: Option<PathBuf>,
    default_file_content: Option<String>,
    force: Option<bool>,
    dry_run: Option<bool>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("tree_scaffold")
        .join("presets.toml"))
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content).context("Failed to parse presets.toml")?;
    Ok(parsed.presets)
}

fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let config_path = presets_path()?;

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content)
}

fn input_source(cli: &Cli) -> Result<InputSource> {
    if let Some(text) = &cli.text {
        Ok(InputSource::Text(text.clone()))
    } else if let Some(path) = &cli.from_file {
        Ok(InputSource::File(path.clone()))
    } else if cli.stdin {
        Ok(InputSource::Stdin)
    } else {
        bail!("Provide --stdin, --text, or --from-file")
    }
}

/// CLI value > preset value > built-in default. Switches are OR-ed.
fn merge(cli: Cli, preset: PresetConfig) -> Result<RuntimeConfig> {
    let source = input_source(&cli)?;

    Ok(RuntimeConfig {
        source,
        base_dir: cli
            .root
            .or(preset.root)
            .unwrap_or_else(|| PathBuf::from(".")),
        dry_run: cli.dry_run || preset.dry_run.unwrap_or(false),
        force: cli.force || preset.force.unwrap_or(false),
        default_file_content: cli
            .default_file_content
            .or(preset.default_file_content)
            .unwrap_or_default(),
    })
}

/// An auto-detected preset silently switching on overwrites deserves a warning.
fn enables_force_implicitly(cli: &Cli, preset: &PresetConfig) -> bool {
    cli.preset.is_none() && !cli.force && preset.force.unwrap_or(false)
}

pub fn resolve_config(cli: Cli, project_name: Option<&str>) -> Result<RuntimeConfig> {
    let presets = load_presets_file()?;

    // Determine preset to use: CLI flag > Auto-detect > None
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();
    if let Some(key) = preset_key.filter(|k| presets.contains_key(*k)) {
        log::info!("Using preset '{}'", key);
        if enables_force_implicitly(&cli, &preset) {
            log::warn!(
                "Preset '{}' was picked from the directory name and enables force; existing files will be overwritten",
                key
            );
        }
    }

    merge(cli, preset)
}
