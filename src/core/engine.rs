use crate::adapters::{HttpFetcher, LocalFileStore, SystemClock};
use crate::core::cache::{CacheProvider, CacheSettings, Resolution};
use crate::core::catalog::parse_bytes;
use crate::core::{Catalog, Clock, ConfigProvider, Fetcher, FileStore};
use crate::utils::error::Result;

/// Loads a fresh catalog on every call: resolve a local file, read it, parse it.
pub struct CatalogEngine<F: Fetcher, S: FileStore, C: Clock> {
    provider: CacheProvider<F, S, C>,
}

impl<F: Fetcher, S: FileStore, C: Clock> CatalogEngine<F, S, C> {
    pub fn new(provider: CacheProvider<F, S, C>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &CacheProvider<F, S, C> {
        &self.provider
    }

    pub async fn load(&self) -> Result<Catalog> {
        Ok(self.load_with_source().await?.0)
    }

    pub async fn load_with_source(&self) -> Result<(Catalog, Resolution)> {
        let resolution = self.provider.resolve_source().await?;
        tracing::debug!(
            "Loading services from {} ({:?})",
            resolution.path.display(),
            resolution.origin
        );

        let data = self.provider.store().read_file(&resolution.path).await?;
        let catalog = parse_bytes(&data)?;
        tracing::info!(
            "Loaded {} services from {}",
            catalog.len(),
            resolution.path.display()
        );

        Ok((catalog, resolution))
    }
}

impl CatalogEngine<HttpFetcher, LocalFileStore, SystemClock> {
    /// An engine backed by HTTP, the local filesystem and the system clock.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let fetcher = HttpFetcher::with_timeout(config.request_timeout())?;
        Ok(Self::new(CacheProvider::new(
            CacheSettings::from_provider(config),
            fetcher,
            LocalFileStore::new(),
            SystemClock,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::tests::{now, settings, FixedClock, MemoryStore, MockFetcher};
    use crate::core::cache::Origin;
    use crate::utils::error::ServicesError;
    use chrono::TimeDelta;

    fn engine(
        fetcher: &MockFetcher,
        store: &MemoryStore,
    ) -> CatalogEngine<MockFetcher, MemoryStore, FixedClock> {
        CatalogEngine::new(CacheProvider::new(
            settings(),
            fetcher.clone(),
            store.clone(),
            FixedClock(now()),
        ))
    }

    #[tokio::test]
    async fn test_load_downloads_and_parses() {
        let fetcher = MockFetcher::default();
        let store = MemoryStore::default();

        let (catalog, resolution) = engine(&fetcher, &store).load_with_source().await.unwrap();

        assert_eq!(resolution.origin, Origin::Downloaded);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.as_slice()[0].name, "http");
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_load_prefers_system_file() {
        let fetcher = MockFetcher::default();
        let store = MemoryStore::default().with_file(
            "/usr/share/nmap/nmap-services",
            b"ssh 22/tcp 0.182286\ndomain 53/udp 0.213496\n",
            now(),
        );

        let catalog = engine(&fetcher, &store).load().await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.udp().len(), 1);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_load_is_repeatable() {
        let fetcher = MockFetcher::default();
        let store = MemoryStore::default().with_file(
            "/var/tmp/nmap-services",
            b"ssh 22/tcp 0.182286\nhttp 80/tcp 0.484143\n",
            now() - TimeDelta::days(1),
        );
        let engine = engine(&fetcher, &store);

        let first = engine.load().await.unwrap();
        let second = engine.load().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_load_malformed_file_returns_parse_error() {
        let fetcher = MockFetcher::default();
        let store = MemoryStore::default().with_file(
            "/var/tmp/nmap-services",
            b"ssh 22/tcp 0.18\nbroken 23/tcp nope\n",
            now(),
        );

        let result = engine(&fetcher, &store).load().await;
        assert!(matches!(
            result,
            Err(ServicesError::ParseError { line: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_load_propagates_fetch_error() {
        let fetcher = MockFetcher::failing(404);
        let store = MemoryStore::default();

        let result = engine(&fetcher, &store).load().await;
        assert!(matches!(result, Err(ServicesError::FetchError { .. })));
    }
}
