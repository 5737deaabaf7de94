//! Built-in handlers attached by the manager.

mod base;

pub use base::{base_handler, log_update};
