//! Configuration management
//!
//! Values come from built-in defaults, then `config.json` in the config
//! directory, then environment variables (including `.env`). The resulting
//! [`Config`] is passed explicitly to every command.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_API_URI: &str = "https://api.ukfast.io/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 90;
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key sent in the Authorization header
    pub api_key: Option<String>,

    /// Base URI of the API
    pub api_uri: String,

    /// HTTP timeout in seconds
    pub timeout_seconds: u64,

    /// Page size used for list requests
    pub per_page: u32,

    /// Upper bound on pages fetched by a single list; `None` is unbounded
    pub max_pages: Option<u32>,

    /// Output format
    pub output_format: OutputFormat,

    /// File the values were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Pretty,
    Compact,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            "compact" => Ok(OutputFormat::Compact),
            other => Err(anyhow!(
                "Unknown output format '{}'. Use table, json, pretty or compact",
                other
            )),
        }
    }
}

/// On-disk configuration; every field is optional
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    api_uri: Option<String>,
    api_timeout_seconds: Option<u64>,
    per_page: Option<u32>,
    max_pages: Option<u32>,
    output_format: Option<OutputFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_uri: DEFAULT_API_URI.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            per_page: DEFAULT_PER_PAGE,
            max_pages: None,
            output_format: OutputFormat::default(),
            source: None,
        }
    }
}

impl Config {
    /// Load configuration and require an API key
    pub fn load() -> Result<Self> {
        let config = Self::load_optional()?;

        if config.api_key.is_none() {
            return Err(anyhow!(
                "Authentication required. Set ANS_API_KEY or api_key in {}",
                Self::config_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.json".to_string())
            ));
        }

        Ok(config)
    }

    /// Load configuration without requiring authentication
    pub fn load_optional() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = Self::config_file_path() {
            if path.exists() {
                match Self::read_file(&path) {
                    Ok(file) => {
                        config.apply_file(file);
                        config.source = Some(path);
                    }
                    Err(e) => tracing::warn!("Ignoring config file {:?}: {:#}", path, e),
                }
            }
        }

        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        Ok(file)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if file.api_key.is_some() {
            self.api_key = file.api_key;
        }
        if let Some(uri) = file.api_uri {
            self.api_uri = uri;
        }
        if let Some(t) = file.api_timeout_seconds {
            self.timeout_seconds = t;
        }
        if let Some(p) = file.per_page {
            self.per_page = p;
        }
        if let Some(m) = file.max_pages {
            self.max_pages = page_limit(m);
        }
        if let Some(f) = file.output_format {
            self.output_format = f;
        }
    }

    fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var("ANS_API_KEY").filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(uri) = var("ANS_API_URI") {
            self.api_uri = uri;
        }
        if let Some(t) = var("ANS_API_TIMEOUT_SECONDS") {
            self.timeout_seconds = t
                .parse()
                .with_context(|| format!("Invalid ANS_API_TIMEOUT_SECONDS: {}", t))?;
        }
        if let Some(p) = var("ANS_PER_PAGE") {
            self.per_page = p
                .parse()
                .with_context(|| format!("Invalid ANS_PER_PAGE: {}", p))?;
        }
        if let Some(m) = var("ANS_MAX_PAGES") {
            let limit = m
                .parse()
                .with_context(|| format!("Invalid ANS_MAX_PAGES: {}", m))?;
            self.max_pages = page_limit(limit);
        }
        if let Some(f) = var("ANS_OUTPUT_FORMAT") {
            self.output_format = f.parse()?;
        }
        Ok(())
    }

    /// Get the authentication headers for API requests
    pub fn auth_headers(&self) -> Vec<(&'static str, String)> {
        match self.api_key {
            Some(ref key) => vec![("Authorization", key.clone())],
            None => vec![],
        }
    }

    /// Get config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Cannot determine config directory"))?
            .join("ans");

        Ok(dir)
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }
}

/// A page limit of 0 means no limit
fn page_limit(limit: u32) -> Option<u32> {
    Some(limit).filter(|l| *l > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_uri, DEFAULT_API_URI);
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.max_pages, None);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.auth_headers().is_empty());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"api_key": "from-file", "per_page": 20, "output_format": "json"}}"#
        )
        .unwrap();

        let mut config = Config::default();
        config.apply_file(Config::read_file(file.path()).unwrap());
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.per_page, 20);
        assert_eq!(config.output_format, OutputFormat::Json);

        config
            .apply_env(env_from(&[
                ("ANS_API_KEY", "from-env"),
                ("ANS_OUTPUT_FORMAT", "compact"),
                ("ANS_MAX_PAGES", "5"),
            ]))
            .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.per_page, 20);
        assert_eq!(config.max_pages, Some(5));
        assert_eq!(config.output_format, OutputFormat::Compact);
        assert_eq!(
            config.auth_headers(),
            vec![("Authorization", "from-env".to_string())]
        );
    }

    #[test]
    fn test_zero_max_pages_is_unbounded() {
        let mut config = Config::default();
        config.apply_env(env_from(&[("ANS_MAX_PAGES", "3")])).unwrap();
        assert_eq!(config.max_pages, Some(3));

        config.apply_env(env_from(&[("ANS_MAX_PAGES", "0")])).unwrap();
        assert_eq!(config.max_pages, None);

        config.apply_file(ConfigFile {
            max_pages: Some(0),
            ..Default::default()
        });
        assert_eq!(config.max_pages, None);
    }

    #[test]
    fn test_empty_env_key_is_ignored() {
        let mut config = Config::default();
        config.apply_env(env_from(&[("ANS_API_KEY", "")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = Config::default();
        assert!(config
            .apply_env(env_from(&[("ANS_PER_PAGE", "many")]))
            .is_err());
        assert!(config
            .apply_env(env_from(&[("ANS_OUTPUT_FORMAT", "xml")]))
            .is_err());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Config::read_file(file.path()).is_err());
    }
}
