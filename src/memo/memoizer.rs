//! Memoizer Module
//!
//! Wraps a computation so repeated calls with equal inputs reuse a cached result.

use std::marker::PhantomData;

use tracing::trace;

use crate::cache::{Cache, SharedCache};
use crate::error::Result;
use crate::memo::{MemoInput, MemoKey};

// == Call Source ==
/// Where a memoized result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSource {
    /// Served from the backing cache without running the computation
    Cached,
    /// Computed on this call and stored
    Computed,
}

/// A memoized result together with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Memoized<Out> {
    pub value: Out,
    pub source: CallSource,
}

impl<Out> Memoized<Out> {
    pub fn from_cache(&self) -> bool {
        self.source == CallSource::Cached
    }
}

// == Memoizer ==
/// Memoizes `compute` over an injected, shared backing cache.
///
/// The computation must be referentially transparent: for equal inputs it
/// must return equal outputs. This is not checked.
///
/// The cache lock is held only for the lookup and for the store, never while
/// `compute` runs. Two concurrent misses on the same key may therefore both
/// compute, and the later store wins.
///
/// `name` is part of every derived key, so memoizers for different
/// computations can share one cache.
pub struct Memoizer<In, Out, C, F> {
    name: String,
    cache: SharedCache<C>,
    compute: F,
    _marker: PhantomData<fn(In) -> Out>,
}

impl<In, Out, C, F> Memoizer<In, Out, C, F>
where
    In: MemoInput,
    Out: Clone,
    C: Cache<MemoKey, Out>,
    F: Fn(In) -> Out,
{
    // == Constructor ==
    pub fn new(name: impl Into<String>, cache: SharedCache<C>, compute: F) -> Self {
        Self {
            name: name.into(),
            cache,
            compute,
            _marker: PhantomData,
        }
    }

    // == Call ==
    /// Returns the cached result for `inputs`, computing and storing it on a miss.
    ///
    /// # Errors
    /// Returns `CacheError::KeyDerivation` if `inputs` cannot be encoded. The
    /// cache and the computation are not touched in that case.
    pub fn call(&self, inputs: In) -> Result<Out> {
        self.call_traced(inputs).map(|memoized| memoized.value)
    }

    /// Like [`Memoizer::call`], also reporting whether the cache served the call.
    ///
    /// # Errors
    /// Returns `CacheError::KeyDerivation` if `inputs` cannot be encoded.
    pub fn call_traced(&self, inputs: In) -> Result<Memoized<Out>> {
        let key = MemoKey::derive(&self.name, &inputs)?;

        let cached = self.cache.lock().get(&key);
        if let Some(value) = cached {
            trace!(key = %key, "memo hit");
            return Ok(Memoized {
                value,
                source: CallSource::Cached,
            });
        }

        trace!(key = %key, "memo miss");
        let value = (self.compute)(inputs);
        self.cache.lock().put(key, value.clone());

        Ok(Memoized {
            value,
            source: CallSource::Computed,
        })
    }

    /// The backing cache.
    pub fn cache(&self) -> &SharedCache<C> {
        &self.cache
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
