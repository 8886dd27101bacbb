//! Shared key/value store decoupling event sources from the tree.
//!
//! The blackboard lets asynchronous inputs (button presses, sensor
//! thresholds) interrupt an in-progress branch without explicit callbacks:
//! adapters write named variables from any thread, and condition leaves
//! read them on the next tick. Any node may read or write any key: the
//! coupling is by name, not by tree structure.
//!
//! Keys are declared at tree-build time through the typed [`Key`] handle,
//! so every read and write site agrees on the value type at compile time.
//! "Key not set" remains a runtime outcome and maps to a plain `Failure`
//! in condition leaves.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::BlackboardError;

type Store = HashMap<String, Box<dyn Any + Send + Sync>>;

/// Typed handle to one blackboard variable.
///
/// Cloning is cheap (the name is reference-counted), so the same key can be
/// handed to the writer adapter and to every condition that reads it.
pub struct Key<T> {
    name: Arc<str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

/// Process-wide shared store; cloning yields another handle to the same
/// underlying map.
///
/// Writers may be on any thread (tick thread or async adapters); each read
/// observes a consistent value, so two behaviors sharing a key see the same
/// value within one tick.
#[derive(Clone, Default)]
pub struct Blackboard {
    inner: Arc<RwLock<Store>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a value, replacing any previous value under the same key.
    pub fn set<T: Any + Send + Sync>(&self, key: &Key<T>, value: T) {
        let mut store = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        store.insert(key.name().to_owned(), Box::new(value));
    }

    /// Reads a value, returning `None` when the key is absent or was
    /// written with a different type.
    pub fn get<T: Any + Send + Sync + Clone>(&self, key: &Key<T>) -> Option<T> {
        let store = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        store.get(key.name())?.downcast_ref::<T>().cloned()
    }

    /// Reads a value, distinguishing an unset key from a type mismatch.
    pub fn read<T: Any + Send + Sync + Clone>(&self, key: &Key<T>) -> Result<T, BlackboardError> {
        let store = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let value = store
            .get(key.name())
            .ok_or_else(|| BlackboardError::NotSet(key.name().to_owned()))?;
        value
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| BlackboardError::WrongType(key.name().to_owned()))
    }

    /// Returns `true` if a value exists under this key.
    pub fn contains<T>(&self, key: &Key<T>) -> bool {
        let store = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        store.contains_key(key.name())
    }

    /// Removes a key, consuming a one-shot event flag.
    ///
    /// Returns `true` if a value was present.
    pub fn clear<T>(&self, key: &Key<T>) -> bool {
        let mut store = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        store.remove(key.name()).is_some()
    }
}
