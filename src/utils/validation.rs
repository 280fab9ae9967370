use crate::utils::error::{Result, ServicesError};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ServicesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ServicesError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ServicesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let shown = path.to_string_lossy();

    if shown.is_empty() {
        return Err(ServicesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: shown.into_owned(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if shown.contains('\0') {
        return Err(ServicesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: shown.into_owned(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_paths(field_name: &str, paths: &[impl AsRef<Path>]) -> Result<()> {
    for path in paths {
        validate_path(field_name, path.as_ref())?;
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ServicesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source_url", "https://example.com/nmap-services").is_ok());
        assert!(validate_url("source_url", "http://example.com").is_ok());
        assert!(validate_url("source_url", "").is_err());
        assert!(validate_url("source_url", "invalid-url").is_err());
        assert!(validate_url("source_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("cache_path", Path::new("/var/tmp/nmap-services")).is_ok());
        assert!(validate_path("cache_path", Path::new("")).is_err());

        let paths = vec![PathBuf::from("/usr/share/nmap/nmap-services"), PathBuf::new()];
        assert!(validate_paths("well_known_paths", &paths).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_age_days", 7, 1).is_ok());
        assert!(validate_positive_number("max_age_days", 0, 1).is_err());
    }
}
