//! Backend-to-UI events and error modeling for the desktop controller.

use client_core::{ActionOutcome, AppState, ClientError, UserState};
use shared::domain::UserId;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    UsersChanged(UserState),
    AppChanged(AppState),
    UserCreateFinished(ActionOutcome),
    UserDeleteFinished { id: UserId, outcome: ActionOutcome },
}

/// Failures that reach the banner directly. Request failures travel inside
/// store state instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Configuration => "Configuration",
            Self::Unknown => "Unexpected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadUsers,
    CreateUser,
    DeleteUser,
    RandomNumber,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Config(_) => UiErrorCategory::Configuration,
            _ => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: client_core::error_message(err),
        }
    }

    /// Errors whose shape is not known, such as a panicked backend task.
    pub fn unexpected(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Banner text, e.g. `Transport: Failed to fetch users: connection refused`.
    pub fn banner_text(&self) -> String {
        format!("{}: {}", self.category.label(), self.message)
    }
}
