//! State containers for the random-number widget and the user list.
//!
//! Each store owns a `watch` channel holding its current state. Actions run
//! through [`with_async_operation`] and mutate the state synchronously, so
//! subscribers observe every loading/error/data transition.

use std::sync::Arc;

use shared::domain::{CreateUserRequest, User, UserId};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    api::IdentityApi,
    async_op::{with_async_operation, AsyncOperationConfig},
    error::ClientError,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub random_number: Option<f64>,
    pub random_number_loading: bool,
    pub error: Option<String>,
}

pub struct AppStore {
    api: Arc<dyn IdentityApi>,
    state: watch::Sender<AppState>,
}

impl AppStore {
    pub fn new(api: Arc<dyn IdentityApi>) -> Self {
        Self {
            api,
            state: watch::Sender::new(AppState::default()),
        }
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub async fn fetch_random_number(&self) {
        let state = &self.state;
        let config = AsyncOperationConfig::new(
            move |loading| state.send_modify(|s| s.random_number_loading = loading),
            move |error| state.send_modify(|s| s.error = error),
        )
        .on_data(move |number| state.send_modify(|s| s.random_number = Some(number)));

        let api = &self.api;
        if let Err(err) = with_async_operation(|| api.get_random_number(), config).await {
            debug!(%err, "random number fetch failed");
        }
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Cached user list. Create and delete patch the local list from the server's
/// answer instead of refetching.
pub struct UserStore {
    api: Arc<dyn IdentityApi>,
    state: watch::Sender<UserState>,
}

impl UserStore {
    pub fn new(api: Arc<dyn IdentityApi>) -> Self {
        Self {
            api,
            state: watch::Sender::new(UserState::default()),
        }
    }

    pub fn snapshot(&self) -> UserState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.state.subscribe()
    }

    fn config<T>(&self) -> AsyncOperationConfig<'_, T> {
        let state = &self.state;
        AsyncOperationConfig::new(
            move |loading| state.send_modify(|s| s.loading = loading),
            move |error| state.send_modify(|s| s.error = error),
        )
    }

    /// Replaces the cached list. Failures are recorded in `error` only.
    pub async fn fetch_users(&self) {
        let state = &self.state;
        let config = self
            .config()
            .on_data(move |users: Vec<User>| state.send_modify(|s| s.users = users));

        let api = &self.api;
        if let Err(err) = with_async_operation(|| api.get_users(), config).await {
            debug!(%err, "user fetch failed");
        }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<(), ClientError> {
        let state = &self.state;
        let config = self
            .config()
            .on_data(move |user: User| {
                info!(user_id = %user.id, "user created");
                state.send_modify(|s| s.users.push(user));
            })
            .rethrow();

        let api = &self.api;
        with_async_operation(|| async move { api.create_user(&request).await }, config).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<(), ClientError> {
        self.delete_user_cancellable(id, &CancellationToken::new())
            .await
    }

    /// Deletes `id`, giving up as soon as `cancel` fires. A cancelled delete
    /// leaves the local list untouched even if the server later completes it.
    pub async fn delete_user_cancellable(
        &self,
        id: UserId,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        let state = &self.state;
        let config = self
            .config()
            .on_data(move |()| {
                info!(user_id = %id, "user deleted");
                state.send_modify(|s| s.users.retain(|user| user.id != id));
            })
            .rethrow();

        let api = &self.api;
        with_async_operation(
            || async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(ClientError::Cancelled),
                    result = api.delete_user(id) => result,
                }
            },
            config,
        )
        .await
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
