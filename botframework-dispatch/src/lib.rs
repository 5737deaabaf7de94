//! # botframework-dispatch
//!
//! [`Application`] keeps the dispatch table: handlers in priority groups, processed in ascending
//! group order. Within a group the first handler whose check passes handles the update; a handler
//! returning Stop ends processing. Bot data can be persisted through a [`Persistence`] backend.

mod application;
mod persistence;

pub use application::{Application, DEFAULT_GROUP};
pub use persistence::{FilePersistence, Persistence};
