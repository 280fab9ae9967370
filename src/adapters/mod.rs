// Adapters layer: concrete implementations of the domain ports.

pub mod clock;
pub mod http;
pub mod storage;

pub use clock::SystemClock;
pub use http::HttpFetcher;
pub use storage::LocalFileStore;
