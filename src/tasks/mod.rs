//! Background Tasks Module
//!
//! # Tasks
//! - Cache cleanup: purges expired request cache entries at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
