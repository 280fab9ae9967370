use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Downloads the raw services file.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the response body. Transport failures and non-2xx statuses
    /// are reported as `ServicesError::FetchError`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub trait FileStore: Send + Sync {
    fn is_readable(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;

    /// Modification time, or `None` when the file does not exist.
    fn modified(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Option<DateTime<Utc>>>> + Send;

    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Replaces the file contents so readers never observe a partial write.
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn well_known_paths(&self) -> &[PathBuf];
    fn cache_path(&self) -> &Path;
    fn max_age(&self) -> TimeDelta;
    fn request_timeout(&self) -> Option<Duration>;
}
