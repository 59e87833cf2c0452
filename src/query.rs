//! Keyed async query cache.
//!
//! Each [`KeyedQuery`] tracks one active key and the fetch state of every key
//! it has seen. A result is only accepted for the key that is active when it
//! arrives; anything older is dropped, so a slow response can never overwrite
//! the state of a newer request.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Success(T),
    Error(FetchError),
}

/// Key of one catalog page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub page: u32,
    pub limit: u32,
}

impl ListKey {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[derive(Debug)]
pub struct KeyedQuery<K, T> {
    active: Option<K>,
    entries: HashMap<K, FetchState<T>>,
}

impl<K, T> Default for KeyedQuery<K, T> {
    fn default() -> Self {
        Self {
            active: None,
            entries: HashMap::new(),
        }
    }
}

impl<K, T> KeyedQuery<K, T>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` active. Returns the key when a fetch has to be issued for
    /// it, which is whenever the active key changes. Re-setting the same key
    /// is a no-op, so a failed key stays failed until [`retry`]. A cached
    /// value keeps showing while its refresh is in flight. `None` disables
    /// the query.
    ///
    /// [`retry`]: KeyedQuery::retry
    pub fn set_key(&mut self, key: Option<K>) -> Option<K> {
        if self.active == key {
            return None;
        }
        self.active = key.clone();
        let key = key?;

        if !matches!(self.entries.get(&key), Some(FetchState::Success(_))) {
            self.entries.insert(key.clone(), FetchState::Loading);
        }
        Some(key)
    }

    /// Store the outcome of a fetch. Returns false if `key` is no longer the
    /// active key and the result was discarded.
    pub fn resolve(&mut self, key: K, result: Result<T, FetchError>) -> bool {
        if self.active.as_ref() != Some(&key) {
            tracing::debug!("discarding stale result for {:?}", key);
            // A superseded in-flight entry must not block a later re-fetch.
            if matches!(self.entries.get(&key), Some(FetchState::Loading)) {
                self.entries.remove(&key);
            }
            return false;
        }

        let state = match result {
            Ok(value) => FetchState::Success(value),
            Err(e) => FetchState::Error(e),
        };
        self.entries.insert(key, state);
        true
    }

    /// Re-issue the active key regardless of its cached state.
    pub fn retry(&mut self) -> Option<K> {
        let key = self.active.clone()?;
        self.entries.insert(key.clone(), FetchState::Loading);
        Some(key)
    }

    pub fn state(&self) -> Option<&FetchState<T>> {
        self.entries.get(self.active.as_ref()?)
    }

    pub fn data(&self) -> Option<&T> {
        match self.state()? {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self.state()? {
            FetchState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state(), Some(FetchState::Loading))
    }
}
