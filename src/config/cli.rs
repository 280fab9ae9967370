use crate::core::cache::{
    max_age_from_days, DEFAULT_CACHE_PATH, DEFAULT_MAX_AGE_DAYS, DEFAULT_SOURCE_URL,
    DEFAULT_WELL_KNOWN_PATHS,
};
use crate::core::query::{Query, QueryOrder};
use crate::core::render::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_paths, validate_positive_number, validate_url, Validate,
};
use chrono::TimeDelta;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "nmap-services")]
#[command(about = "List network services from the nmap-services file, most frequent first")]
pub struct CliConfig {
    /// Only show services of this protocol (exact match, e.g. tcp, udp, sctp)
    #[arg(short, long)]
    pub protocol: Option<String>,

    /// Number of most frequent services to show; negative values show none
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// Apply the protocol filter before or after selecting the top services
    #[arg(long, value_enum, default_value_t = QueryOrder::FilterFirst)]
    pub order: QueryOrder,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Omit the header row
    #[arg(long)]
    pub no_header: bool,

    /// Read source and cache settings from a TOML file instead of the flags below
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// System locations checked before the cache, in order
    #[arg(long = "well-known-path", value_delimiter = ',', default_values = DEFAULT_WELL_KNOWN_PATHS)]
    pub well_known_paths: Vec<PathBuf>,

    /// Skip the system locations and always use the cache
    #[arg(long)]
    pub no_system_paths: bool,

    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    pub cache_path: PathBuf,

    /// Re-download the cached copy once it is older than this
    #[arg(long, default_value_t = DEFAULT_MAX_AGE_DAYS)]
    pub max_age_days: u64,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn query(&self) -> Query {
        Query {
            protocol: self.protocol.clone(),
            top: self.top,
            order: self.order,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn source_url(&self) -> &str {
        &self.source_url
    }

    fn well_known_paths(&self) -> &[PathBuf] {
        if self.no_system_paths {
            &[]
        } else {
            &self.well_known_paths
        }
    }

    fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn max_age(&self) -> TimeDelta {
        max_age_from_days(self.max_age_days)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source_url", &self.source_url)?;
        validate_paths("well_known_path", &self.well_known_paths)?;
        validate_path("cache_path", &self.cache_path)?;
        validate_positive_number("max_age_days", self.max_age_days, 1)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
