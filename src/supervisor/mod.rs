// src/supervisor/mod.rs

//! Helper binary lifecycle supervision.
//!
//! This module owns the real lifecycle semantics of the crate:
//!
//! - [`manager`] holds the `Supervisor`: construction-time validation and
//!   cache directory resolution, the strictly ordered best-effort launch
//!   loop, the process handle list, and forceful cleanup.
//! - [`waiter`] holds the per-process exit observer task that keeps the
//!   launch path non-blocking.

pub mod manager;
pub mod waiter;

pub use manager::{Mode, ProcessHandle, Supervisor, embedded_cache_dir};
