//! Background Tasks Module
//!
//! Tasks a caller may spawn explicitly; caches never start them on their own.
//!
//! # Tasks
//! - TTL Sweep: Removes expired entries from a shared TTL cache at a fixed interval

mod sweeper;

pub use sweeper::spawn_sweep_task;
