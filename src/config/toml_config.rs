use crate::core::cache::{
    max_age_from_days, DEFAULT_CACHE_PATH, DEFAULT_MAX_AGE_DAYS, DEFAULT_SOURCE_URL,
    DEFAULT_WELL_KNOWN_PATHS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ServicesError};
use crate::utils::validation::{
    validate_path, validate_paths, validate_positive_number, validate_url, Validate,
};
use chrono::TimeDelta;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u64,
    #[serde(default = "default_well_known_paths")]
    pub well_known_paths: Vec<PathBuf>,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_max_age_days() -> u64 {
    DEFAULT_MAX_AGE_DAYS
}

fn default_well_known_paths() -> Vec<PathBuf> {
    DEFAULT_WELL_KNOWN_PATHS.iter().map(PathBuf::from).collect()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            max_age_days: default_max_age_days(),
            well_known_paths: default_well_known_paths(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ServicesError::OpenError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServicesError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServicesError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_url(&self) -> &str {
        &self.source.url
    }

    fn well_known_paths(&self) -> &[PathBuf] {
        &self.cache.well_known_paths
    }

    fn cache_path(&self) -> &Path {
        &self.cache.path
    }

    fn max_age(&self) -> TimeDelta {
        max_age_from_days(self.cache.max_age_days)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.url", &self.source.url)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        validate_path("cache.path", &self.cache.path)?;
        validate_paths("cache.well_known_paths", &self.cache.well_known_paths)?;
        validate_positive_number("cache.max_age_days", self.cache.max_age_days, 1)?;
        Ok(())
    }
}
