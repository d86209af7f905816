//! Client-side core for the identity service: the HTTP API client, the
//! observable stores built on it, and the actions front ends invoke.

pub mod actions;
pub mod api;
pub mod async_op;
pub mod config;
pub mod error;
pub mod store;

pub use actions::{handle_create, handle_delete, ActionOutcome, DeleteConfirmation};
pub use api::{HttpIdentityClient, IdentityApi};
pub use async_op::{with_async_operation, AsyncOperationConfig};
pub use config::{load_settings, ClientSettings};
pub use error::{error_message, message_from_payload, ClientError};
pub use store::{AppState, AppStore, UserState, UserStore};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
