//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.gourmet/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::hotpepper::DEFAULT_BASE_URL;
use crate::core::search::DEFAULT_KEYWORD;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GourmetConfig {
    #[serde(default)]
    pub hotpepper: HotPepperConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HotPepperConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    pub default_keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub favorites_file: Option<String>,
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub keyword: Option<String>,
    pub favorites_path: Option<PathBuf>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub base_url: String,
    /// Term searched when the entered text is empty.
    pub default_keyword: String,
    /// Text for the startup search. Empty means "use the default keyword".
    pub initial_keyword: String,
    pub favorites_path: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No usable API key anywhere in the hierarchy. Fatal.
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingApiKey => write!(
                f,
                "no API key configured: set HOTPEPPER_API_KEY or [hotpepper] api_key in ~/.gourmet/config.toml"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.gourmet`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gourmet"))
}

/// Returns the path to `~/.gourmet/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.gourmet/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GourmetConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GourmetConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GourmetConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GourmetConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<GourmetConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Gourmet Configuration
# All settings are optional except the API key.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [hotpepper]
# api_key = "your-key"               # Or set HOTPEPPER_API_KEY env var
# base_url = "https://webservice.recruit.co.jp/hotpepper/gourmet/v1/"

# [search]
# default_keyword = "ランチ"          # Searched when the search box is empty

# [storage]
# favorites_file = "favorites.json"  # Relative paths resolve against ~/.gourmet/
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config against the process environment.
pub fn resolve(config: &GourmetConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `env` looks up an environment variable by name.
pub fn resolve_with(
    config: &GourmetConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // API key: env → config. Blank counts as missing.
    let api_key = env("HOTPEPPER_API_KEY")
        .or_else(|| config.hotpepper.api_key.clone())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    // Base URL: env → config → default
    let base_url = env("HOTPEPPER_BASE_URL")
        .or_else(|| config.hotpepper.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let default_keyword = config
        .search
        .default_keyword
        .clone()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| DEFAULT_KEYWORD.to_string());

    // Startup search: CLI → env → empty (falls back to default keyword)
    let initial_keyword = cli
        .keyword
        .clone()
        .or_else(|| env("GOURMET_KEYWORD"))
        .unwrap_or_default();

    // Favorites file: CLI → config (relative to ~/.gourmet) → default
    let favorites_path = cli
        .favorites_path
        .clone()
        .or_else(|| config.storage.favorites_file.as_ref().map(|f| relative_to_config_dir(f)))
        .unwrap_or_else(|| relative_to_config_dir("favorites.json"));

    let resolved = ResolvedConfig {
        api_key,
        base_url,
        default_keyword,
        initial_keyword,
        favorites_path,
    };
    debug!(
        "Resolved config: base_url={}, default_keyword={:?}, favorites={}",
        resolved.base_url,
        resolved.default_keyword,
        resolved.favorites_path.display()
    );
    Ok(resolved)
}

fn relative_to_config_dir(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn config_with_key(key: &str) -> GourmetConfig {
        GourmetConfig {
            hotpepper: HotPepperConfig {
                api_key: Some(key.to_string()),
                base_url: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let result = resolve_with(&GourmetConfig::default(), &CliOverrides::default(), env_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let result = resolve_with(&config_with_key("   "), &CliOverrides::default(), env_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_resolve_uses_defaults_when_sparse() {
        let resolved =
            resolve_with(&config_with_key("abc"), &CliOverrides::default(), env_from(&[])).unwrap();
        assert_eq!(resolved.api_key, "abc");
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.default_keyword, DEFAULT_KEYWORD);
        assert_eq!(resolved.initial_keyword, "");
        assert!(resolved.favorites_path.ends_with("favorites.json"));
    }

    #[test]
    fn test_env_wins_over_config() {
        let env = env_from(&[
            ("HOTPEPPER_API_KEY", "from-env"),
            ("HOTPEPPER_BASE_URL", "http://localhost:9999/"),
            ("GOURMET_KEYWORD", "焼肉"),
        ]);
        let resolved = resolve_with(&config_with_key("from-file"), &CliOverrides::default(), env).unwrap();
        assert_eq!(resolved.api_key, "from-env");
        assert_eq!(resolved.base_url, "http://localhost:9999/");
        assert_eq!(resolved.initial_keyword, "焼肉");
    }

    #[test]
    fn test_cli_wins_over_env() {
        let cli = CliOverrides {
            keyword: Some("ramen".to_string()),
            favorites_path: Some(PathBuf::from("/tmp/favs.json")),
        };
        let env = env_from(&[("GOURMET_KEYWORD", "sushi")]);
        let resolved = resolve_with(&config_with_key("k"), &cli, env).unwrap();
        assert_eq!(resolved.initial_keyword, "ramen");
        assert_eq!(resolved.favorites_path, PathBuf::from("/tmp/favs.json"));
    }

    #[test]
    fn test_absolute_favorites_file_kept() {
        let mut config = config_with_key("k");
        config.storage.favorites_file = Some("/var/data/favs.json".to_string());
        let resolved = resolve_with(&config, &CliOverrides::default(), env_from(&[])).unwrap();
        assert_eq!(resolved.favorites_path, PathBuf::from("/var/data/favs.json"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[hotpepper]
api_key = "secret"
base_url = "http://proxy.local/gourmet/v1/"

[search]
default_keyword = "居酒屋"

[storage]
favorites_file = "my-favs.json"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.hotpepper.api_key.as_deref(), Some("secret"));
        assert_eq!(config.search.default_keyword.as_deref(), Some("居酒屋"));
        assert_eq!(config.storage.favorites_file.as_deref(), Some("my-favs.json"));

        let resolved = resolve_with(&config, &CliOverrides::default(), env_from(&[])).unwrap();
        assert_eq!(resolved.default_keyword, "居酒屋");
        assert_eq!(resolved.base_url, "http://proxy.local/gourmet/v1/");
        assert!(resolved.favorites_path.ends_with("my-favs.json"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config = parse_config("[search]\ndefault_keyword = \"cafe\"\n").unwrap();
        assert!(config.hotpepper.api_key.is_none());
        assert!(config.storage.favorites_file.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(parse_config("[search\n"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_default_template_parses_to_empty_config() {
        let config = parse_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(config.hotpepper.api_key.is_none());
        assert!(config.search.default_keyword.is_none());
    }
}
