//! Handler registration and activation.

mod application_manager;
mod registry;

pub use application_manager::{ApplicationManager, ManagerError, BASE_HANDLER_GROUP};
pub use registry::{CommandRegistry, RegisteredHandler};
