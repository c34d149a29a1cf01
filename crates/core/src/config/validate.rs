use std::collections::HashSet;
use url::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - At least one indexer is configured
/// - Indexer ids are unique
/// - Site links are absolute http(s) URLs
/// - HTTP timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.http.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "http.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.indexers.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one indexer must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for indexer in &config.indexers {
        let id = indexer.id();
        if id.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} indexer has an empty id",
                indexer.kind()
            )));
        }
        if !seen.insert(id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate indexer id: {}",
                id
            )));
        }

        let link = indexer.site_link();
        match Url::parse(&link) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "indexer {}: site_link must be an absolute http(s) URL, got {:?}",
                    id, link
                )));
            }
        }
    }

    Ok(())
}
