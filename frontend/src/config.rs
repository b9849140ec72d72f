use std::num::NonZeroUsize;

/// Backend REST root, fixed at compile time.
pub const API_BASE_URL: &str = match option_env!("MONEYBANK_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

const IMAGE_BASE_URL: Option<&str> = option_env!("MONEYBANK_IMAGE_URL");

const LOG_LEVEL: &str = match option_env!("MONEYBANK_LOG") {
    Some(level) => level,
    None => "info",
};

pub const IMAGE_CACHE_CAPACITY: usize = 32;
pub const TOAST_TIMEOUT_MS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub image_base_url: String,
    pub log_level: log::Level,
    pub image_cache_capacity: NonZeroUsize,
    pub toast_timeout_ms: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = API_BASE_URL.trim_end_matches('/').to_string();
        let image_base_url = match IMAGE_BASE_URL {
            Some(url) => with_trailing_slash(url),
            None => format!("{}/images/", api_base_url),
        };
        let log_level = LOG_LEVEL.parse().unwrap_or(log::Level::Info);

        Self {
            api_base_url,
            image_base_url,
            log_level,
            image_cache_capacity: NonZeroUsize::new(IMAGE_CACHE_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
            toast_timeout_ms: TOAST_TIMEOUT_MS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
