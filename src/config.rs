use std::{env, fmt::Display, str::FromStr};

use tracing::info;

pub const DEFAULT_API_BASE: &str = "https://fakestoreapi.com";

/// Default page sizes per view: the main catalog grid reveals eight at a
/// time, the favorites list six.
pub const CATALOG_PAGE_SIZE: usize = 8;
pub const FAVORITES_PAGE_SIZE: usize = 6;

pub struct Config {
    pub api_base: String,
    pub storage_dir: String,
    pub catalog_page_size: usize,
    pub favorites_page_size: usize,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_base: try_load("EXPLORER_API_BASE", DEFAULT_API_BASE),
            storage_dir: try_load("EXPLORER_STORAGE_DIR", "."),
            catalog_page_size: try_load("EXPLORER_PAGE_SIZE", "8"),
            favorites_page_size: try_load("EXPLORER_FAVORITES_PAGE_SIZE", "6"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            storage_dir: ".".to_string(),
            catalog_page_size: CATALOG_PAGE_SIZE,
            favorites_page_size: FAVORITES_PAGE_SIZE,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            tracing::warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
