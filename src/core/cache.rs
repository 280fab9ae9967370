use crate::core::{Clock, ConfigProvider, Fetcher, FileStore};
use crate::utils::error::Result;
use chrono::TimeDelta;
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/nmap/nmap/master/nmap-services";
pub const DEFAULT_WELL_KNOWN_PATHS: [&str; 2] = [
    "/usr/share/nmap/nmap-services",
    "/usr/local/share/nmap/nmap-services",
];
pub const DEFAULT_CACHE_PATH: &str = "/var/tmp/nmap-services";
pub const DEFAULT_MAX_AGE_DAYS: u64 = 7;

/// Where the cache provider looks for the services file and when a
/// downloaded copy counts as stale.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    pub source_url: String,
    pub well_known_paths: Vec<PathBuf>,
    pub cache_path: PathBuf,
    pub max_age: TimeDelta,
}

impl CacheSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            source_url: config.source_url().to_string(),
            well_known_paths: config.well_known_paths().to_vec(),
            cache_path: config.cache_path().to_path_buf(),
            max_age: config.max_age(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            well_known_paths: DEFAULT_WELL_KNOWN_PATHS.iter().map(PathBuf::from).collect(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            max_age: max_age_from_days(DEFAULT_MAX_AGE_DAYS),
        }
    }
}

/// Saturates instead of overflowing for absurd day counts.
pub fn max_age_from_days(days: u64) -> TimeDelta {
    i64::try_from(days)
        .ok()
        .and_then(TimeDelta::try_days)
        .unwrap_or(TimeDelta::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A system install of the file.
    WellKnown,
    /// The cached copy, young enough to reuse.
    CacheFresh,
    /// No cached copy existed; it was downloaded.
    Downloaded,
    /// The cached copy was stale and has been replaced.
    Refreshed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: PathBuf,
    pub origin: Origin,
}

pub struct CacheProvider<F: Fetcher, S: FileStore, C: Clock> {
    settings: CacheSettings,
    fetcher: F,
    store: S,
    clock: C,
}

impl<F: Fetcher, S: FileStore, C: Clock> CacheProvider<F, S, C> {
    pub fn new(settings: CacheSettings, fetcher: F, store: S, clock: C) -> Self {
        Self {
            settings,
            fetcher,
            store,
            clock,
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Path to a readable local copy of the services file.
    pub async fn resolve(&self) -> Result<PathBuf> {
        Ok(self.resolve_source().await?.path)
    }

    /// Like [`resolve`](Self::resolve), also reporting where the file came from.
    ///
    /// A readable well-known path short-circuits everything else. Otherwise the
    /// cache file is downloaded when missing and re-downloaded when older than
    /// the staleness threshold. A failed download is an error even if a stale
    /// copy is still on disk.
    pub async fn resolve_source(&self) -> Result<Resolution> {
        for path in &self.settings.well_known_paths {
            if self.store.is_readable(path).await {
                tracing::debug!("Using system services file {}", path.display());
                return Ok(Resolution {
                    path: path.clone(),
                    origin: Origin::WellKnown,
                });
            }
        }

        let cache_path = &self.settings.cache_path;
        let origin = match self.store.modified(cache_path).await? {
            None => {
                tracing::info!(
                    "No services file found, downloading to {}",
                    cache_path.display()
                );
                self.download_to(cache_path).await?;
                Origin::Downloaded
            }
            Some(modified) => {
                let age = self.clock.now() - modified;
                if age > self.settings.max_age {
                    tracing::info!(
                        "Cached services file is {} hours old, refreshing",
                        age.num_hours()
                    );
                    self.download_to(cache_path).await?;
                    Origin::Refreshed
                } else {
                    tracing::debug!("Reusing cached services file {}", cache_path.display());
                    Origin::CacheFresh
                }
            }
        };

        Ok(Resolution {
            path: cache_path.clone(),
            origin,
        })
    }

    async fn download_to(&self, path: &Path) -> Result<()> {
        let body = self.fetcher.fetch(&self.settings.source_url).await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), self.settings.source_url);
        self.store.write_file(path, &body).await
    }
}
