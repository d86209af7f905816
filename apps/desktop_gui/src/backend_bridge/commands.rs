//! Backend commands queued from UI to backend worker.

use shared::domain::{CreateUserRequest, UserId};
use tokio_util::sync::CancellationToken;

pub enum BackendCommand {
    FetchRandomNumber,
    ClearAppError,
    FetchUsers,
    CreateUser {
        request: CreateUserRequest,
    },
    /// Only sent once the user has confirmed. `cancel` belongs to the Users
    /// page that issued it and fires when that page is left.
    DeleteUser {
        id: UserId,
        cancel: CancellationToken,
    },
    ClearUserError,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchRandomNumber => "fetch_random_number",
            Self::ClearAppError => "clear_app_error",
            Self::FetchUsers => "fetch_users",
            Self::CreateUser { .. } => "create_user",
            Self::DeleteUser { .. } => "delete_user",
            Self::ClearUserError => "clear_user_error",
        }
    }
}
