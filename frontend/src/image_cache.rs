use std::num::NonZeroUsize;

use gloo_net::http::Request;
use lru::LruCache;
use wasm_bindgen::JsValue;

use crate::error::ApiError;

/// Gives back whatever a cached URL holds on to.
pub trait ReleaseUrl {
    fn release(&self, url: &str);
}

/// Revokes `blob:` object URLs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectUrlReleaser;

impl ReleaseUrl for ObjectUrlReleaser {
    fn release(&self, url: &str) {
        if let Err(err) = web_sys::Url::revoke_object_url(url) {
            log::warn!("could not revoke {}: {:?}", url, err);
        }
    }
}

/// Bounded map from image key to object URL. Every URL that leaves the cache
/// (evicted, replaced, cleared or dropped) is released exactly once.
pub struct ImageCache<R: ReleaseUrl = ObjectUrlReleaser> {
    entries: LruCache<String, String>,
    releaser: R,
}

impl<R: ReleaseUrl> ImageCache<R> {
    pub fn new(capacity: NonZeroUsize, releaser: R) -> Self {
        Self {
            entries: LruCache::new(capacity),
            releaser,
        }
    }

    /// Marks the entry as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, url: String) {
        let key = key.into();
        if let Some((old_key, old_url)) = self.entries.push(key, url) {
            let still_cached = self.entries.peek(&old_key) == Some(&old_url);
            if !still_cached {
                log::debug!("image cache released {}", old_key);
                self.releaser.release(&old_url);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        while let Some((_, url)) = self.entries.pop_lru() {
            self.releaser.release(&url);
        }
    }
}

impl<R: ReleaseUrl> Drop for ImageCache<R> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Downloads an image and wraps it in an object URL.
pub async fn fetch_object_url(url: &str) -> Result<String, ApiError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(ApiError::Transport(format!("HTTP {}", response.status())));
    }
    let bytes = response.binary().await?;
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(js_error)?;
    web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)
}

fn js_error(err: JsValue) -> ApiError {
    ApiError::Transport(format!("{:?}", err))
}
