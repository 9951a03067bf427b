use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$GH_PROJECTS_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/gh-projects/config.toml`
/// 4. `~/.config/gh-projects/config.toml`
///
/// Falls back to defaults when no file exists. An explicit path that cannot
/// be read is an error.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit_path {
        return read_config(path);
    }

    match find_global_config() {
        Some(path) => read_config(&path),
        None => Ok(AppConfig::default()),
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML from {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn find_global_config() -> Option<PathBuf> {
    // $GH_PROJECTS_CONFIG
    if let Ok(path) = std::env::var("GH_PROJECTS_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/gh-projects/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("gh-projects/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/gh-projects/config.toml
    if let Some(home) = home_dir() {
        let p = home.join(".config/gh-projects/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
