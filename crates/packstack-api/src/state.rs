//! # Application State
//!
//! Shared state for the Axum application, passed to handlers via the
//! `State` extractor. Holds the pack source and the view cache; pack data
//! itself is never stored here.

use std::path::PathBuf;

use crate::cache::ViewCache;
use crate::source::PackSource;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind.
    pub port: u16,
    /// Serve packs from `{data_dir}/{id}.json` instead of the pack API.
    pub data_dir: Option<PathBuf>,
    /// Memoize built views.
    pub cache_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            data_dir: None,
            cache_enabled: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `PACKSTACK_DATA_DIR` (default: unset, use the pack API)
    /// - `PACKSTACK_CACHE` (`0` or `false` disables the view cache)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: std::env::var_os("PACKSTACK_DATA_DIR").map(PathBuf::from),
            cache_enabled: std::env::var("PACKSTACK_CACHE")
                .map(|v| !matches!(v.trim(), "0" | "false"))
                .unwrap_or(defaults.cache_enabled),
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub source: PackSource,
    pub cache: ViewCache,
}

impl AppState {
    /// Build state from configuration and a pack source.
    pub fn new(config: &AppConfig, source: PackSource) -> Self {
        Self {
            source,
            cache: ViewCache::new(config.cache_enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packstack_core::{PackData, UnitSystem};

    fn data() -> PackData {
        PackData::from_json(r#"{"pack": {"id": 1, "title": "T"}, "categories": []}"#).unwrap()
    }

    #[test]
    fn cache_flag_reaches_view_cache() {
        let source = PackSource::Directory(PathBuf::from("packs"));

        let disabled = AppConfig {
            cache_enabled: false,
            ..AppConfig::default()
        };
        let state = AppState::new(&disabled, source.clone());
        state.cache.get_or_build(&data(), UnitSystem::Metric, false).unwrap();
        assert!(state.cache.is_empty());

        let state = AppState::new(&AppConfig::default(), source);
        state.cache.get_or_build(&data(), UnitSystem::Metric, false).unwrap();
        assert_eq!(state.cache.len(), 1);
    }
}
