//! The nmap-services port catalog: each service's name, port/protocol, how
//! often it is seen open, and an optional comment.
//!
//! A local copy of the file is found in a system install location or kept in
//! a cache that is re-downloaded once it is a week old.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpFetcher, LocalFileStore, SystemClock};
pub use core::cache::{CacheProvider, CacheSettings, Origin, Resolution};
pub use core::engine::CatalogEngine;
pub use core::query::{Query, QueryOrder};
pub use core::render::OutputFormat;
pub use domain::model::{Catalog, ServiceRecord};
pub use utils::error::{Result, ServicesError};

/// Loads the catalog using the default locations and source URL.
pub async fn get() -> Result<Catalog> {
    let engine = CatalogEngine::new(CacheProvider::new(
        CacheSettings::default(),
        HttpFetcher::new(),
        LocalFileStore::new(),
        SystemClock,
    ));
    engine.load().await
}
