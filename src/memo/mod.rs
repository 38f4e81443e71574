//! Memo Module
//!
//! Memoization over the cache contract, with structural key derivation.

mod key;
mod memoizer;

pub use key::{KeyPart, MemoArgs, MemoInput, MemoKey};
pub use memoizer::{CallSource, Memoized, Memoizer};
