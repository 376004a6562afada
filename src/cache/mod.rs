//! Key-based cache of server data.
//!
//! Keys are API paths (`/api/analytics/category-stats/3`). Invalidation works
//! on whole path segments, so invalidating `/api/analytics/category-stats`
//! drops every per-category entry but leaves `/api/analytics/category-statsx`
//! alone.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, PoisonError, RwLock},
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::api::ApiResult;

/// Handle every component gets injected for reading and invalidating cached
/// server data.
pub trait CacheHandle: Send + Sync {
    fn get_value(&self, key: &str) -> Option<Value>;
    fn set_value(&self, key: &str, value: Value);
    /// Removes every entry whose key equals `prefix` or continues it with a
    /// new path segment or query string.
    fn invalidate(&self, prefix: &str);
}

impl<'c> dyn CacheHandle + 'c {
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, "cached value has unexpected shape: {e}");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => self.set_value(key, v),
            Err(e) => tracing::warn!(key, "unable to cache value: {e}"),
        }
    }

    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// result. Errors are not cached.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        if let Some(hit) = self.get::<T>(key) {
            tracing::trace!(key, "cache hit");
            return Ok(hit);
        }

        tracing::trace!(key, "cache miss");
        let fresh = fetch().await?;
        self.set(key, &fresh);
        Ok(fresh)
    }
}

pub fn key_matches(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => prefix.ends_with('/') || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

impl CacheHandle for QueryCache {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_value(&self, key: &str, value: Value) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn invalidate(&self, prefix: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|key, _| !key_matches(key, prefix));
        tracing::debug!(prefix, dropped = before - entries.len(), "cache invalidated");
    }
}
