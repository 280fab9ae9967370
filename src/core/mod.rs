pub mod cache;
pub mod catalog;
pub mod engine;
pub mod query;
pub mod render;

pub use crate::domain::model::{Catalog, ServiceRecord};
pub use crate::domain::ports::{Clock, ConfigProvider, Fetcher, FileStore};
pub use crate::utils::error::Result;
