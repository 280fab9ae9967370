use crate::core::FileStore;
use crate::utils::error::{Result, ServicesError};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for LocalFileStore {
    async fn is_readable(&self, path: &Path) -> bool {
        fs::File::open(path)
            .and_then(|file| file.metadata())
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn modified(&self, path: &Path) -> Result<Option<DateTime<Utc>>> {
        let open_error = |source| ServicesError::OpenError {
            path: path.to_path_buf(),
            source,
        };

        match fs::metadata(path) {
            Ok(meta) => {
                let modified = meta.modified().map_err(open_error)?;
                Ok(Some(DateTime::<Utc>::from(modified)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(open_error(e)),
        }
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|source| ServicesError::OpenError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes to a temporary file next to `path`, then renames it into place.
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let store_error = |source| ServicesError::StoreError {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(store_error)?;

        let mut temp = NamedTempFile::new_in(parent).map_err(store_error)?;
        temp.write_all(data).map_err(store_error)?;
        temp.flush().map_err(store_error)?;
        temp.persist(path).map_err(|e| store_error(e.error))?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}
