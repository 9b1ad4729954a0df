use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub workers: Option<usize>,
    #[serde(alias = "neighbour_scope")]
    pub neighbours: Option<String>,
    pub card_line: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .find_map(env::var_os)
        .map(PathBuf::from)
}

pub fn default_config_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".countrycards").join("config.yml"))
}

/// Resolves a leading `~` (alone or followed by a separator) to the home
/// directory. Other paths are returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            rest.trim_start_matches(['/', '\\'])
        }
        _ => return PathBuf::from(path),
    };
    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().into_owned()
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, String> {
    serde_yaml::from_str::<ConfigFile>(contents).map_err(|e| e.to_string())
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound && allow_missing => {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(ConfigFile::default());
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => return Err(format!("failed to read config '{}': {e}", path.display())),
    };
    log::info!("loaded config from {}", path.display());
    parse_config(&contents).map_err(|e| format!("failed to parse config '{}': {e}", path.display()))
}

pub fn default_config_yaml() -> String {
    r#"# countrycards config
#
# Location (default):
#   ~/.countrycards/config.yml

# API
base_url: https://restcountries.com
timeout: 10

# Runtime
workers: 2

# Views
# Neighbour strip on the detail view: subregion or region
neighbours: subregion
# Line shown on each listing card: datetime or region
card_line: datetime

# Output (optional)
# output: ./countries.html
# output_format: html

# Output styling
no_color: false
"#
    .to_string()
}

/// Writes the commented default config unless a file is already there.
/// Returns whether a file was created.
pub fn ensure_default_config_file(path: &Path) -> Result<bool, String> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create '{}': {e}", parent.display()))?;
    }
    fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(true)
}
