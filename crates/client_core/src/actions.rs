//! Create/delete handlers used by the front ends. They turn store failures
//! into an [`ActionOutcome`] the caller can render.

use shared::{
    domain::{CreateUserRequest, UserId},
    validation::validate_create_user_request,
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{error_message, ClientError},
    store::UserStore,
};

pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this user?";
pub const DELETION_CANCELLED: &str = "Deletion cancelled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed(String),
    /// The user backed out, or the owning view went away mid-request.
    Cancelled,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Failed(message) => Some(message),
            Self::Cancelled => Some(DELETION_CANCELLED),
        }
    }
}

impl From<Result<(), ClientError>> for ActionOutcome {
    fn from(result: Result<(), ClientError>) -> Self {
        match result {
            Ok(()) => Self::Succeeded,
            Err(ClientError::Cancelled) => Self::Cancelled,
            Err(err) => Self::Failed(error_message(&err)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

impl From<bool> for DeleteConfirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Validates the request locally, then creates it through the store.
/// Invalid input never reaches the network.
pub async fn handle_create(store: &UserStore, request: CreateUserRequest) -> ActionOutcome {
    if let Err(err) = validate_create_user_request(&request) {
        return ActionOutcome::Failed(err.message);
    }
    store.create_user(request).await.into()
}

pub async fn handle_delete(
    store: &UserStore,
    id: UserId,
    confirmation: DeleteConfirmation,
    cancel: Option<&CancellationToken>,
) -> ActionOutcome {
    if confirmation == DeleteConfirmation::Declined {
        return ActionOutcome::Cancelled;
    }
    let result = match cancel {
        Some(cancel) => store.delete_user_cancellable(id, cancel).await,
        None => store.delete_user(id).await,
    };
    result.into()
}

#[cfg(test)]
#[path = "tests/actions_tests.rs"]
mod tests;
