//! Copy-on-write record collection
//!
//! A collection is an `Arc<Vec<T>>` behind a lock. Mutations never touch the
//! current vector: they build a new one and swap the `Arc`, so a snapshot
//! handed out earlier keeps seeing a complete, consistent list.

use std::sync::{Arc, RwLock};

use crate::error::{SpendbookError, SpendbookResult};

pub struct Collection<T> {
    items: RwLock<Arc<Vec<T>>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Arc::new(Vec::new())),
        }
    }
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents; cheap, never blocks on anything but the swap
    pub fn snapshot(&self) -> SpendbookResult<Arc<Vec<T>>> {
        let items = self
            .items
            .read()
            .map_err(|e| SpendbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(Arc::clone(&items))
    }

    /// Swap in a new list wholesale, returning the previous one
    pub fn replace(&self, next: Vec<T>) -> SpendbookResult<Arc<Vec<T>>> {
        let mut items = self
            .items
            .write()
            .map_err(|e| SpendbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(std::mem::replace(&mut *items, Arc::new(next)))
    }

    /// Derive a new list from the current one
    ///
    /// `derive` returns `None` when nothing should change; the stored list is
    /// then left alone and `None` is returned. Otherwise the new list is
    /// swapped in and returned.
    pub fn update<F>(&self, derive: F) -> SpendbookResult<Option<Arc<Vec<T>>>>
    where
        F: FnOnce(&[T]) -> Option<Vec<T>>,
    {
        let mut items = self
            .items
            .write()
            .map_err(|e| SpendbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match derive(items.as_slice()) {
            Some(next) => {
                let next = Arc::new(next);
                *items = Arc::clone(&next);
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }
}
