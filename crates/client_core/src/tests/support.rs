//! Test doubles shared by the store and action suites.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::domain::{CreateUserRequest, User, UserId};
use tokio::sync::Notify;

use crate::{api::IdentityApi, error::ClientError};

pub(crate) fn user(id: i64, name: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        email: format!("{}@x.com", name.to_ascii_lowercase()),
    }
}

pub(crate) fn http_error(status: StatusCode, message: &str) -> ClientError {
    ClientError::Http {
        status,
        message: message.to_string(),
    }
}

#[derive(Default)]
pub(crate) struct FakeIdentityApi {
    pub(crate) random_number: Mutex<Option<f64>>,
    pub(crate) users: Mutex<Vec<User>>,
    pub(crate) fail_with: Mutex<Option<(StatusCode, String)>>,
    pub(crate) next_id: AtomicUsize,
    pub(crate) delete_calls: AtomicUsize,
    pub(crate) hold_deletes: Option<Arc<Notify>>,
}

impl FakeIdentityApi {
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            next_id: AtomicUsize::new(100),
            ..Self::default()
        }
    }

    pub(crate) fn failing(self, status: StatusCode, message: &str) -> Self {
        *self.fail_with.lock().expect("fail lock") = Some((status, message.to_string()));
        self
    }

    pub(crate) fn holding_deletes(mut self, gate: Arc<Notify>) -> Self {
        self.hold_deletes = Some(gate);
        self
    }

    fn check_failure(&self) -> Result<(), ClientError> {
        match self.fail_with.lock().expect("fail lock").as_ref() {
            Some((status, message)) => Err(http_error(*status, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityApi for FakeIdentityApi {
    async fn get_random_number(&self) -> Result<f64, ClientError> {
        self.check_failure()?;
        self.random_number
            .lock()
            .expect("random lock")
            .ok_or(ClientError::Unknown(None))
    }

    async fn get_users(&self) -> Result<Vec<User>, ClientError> {
        self.check_failure()?;
        Ok(self.users.lock().expect("users lock").clone())
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ClientError> {
        self.check_failure()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let created = User {
            id: UserId(id),
            name: request.name.clone(),
            email: request.email.clone(),
        };
        self.users
            .lock()
            .expect("users lock")
            .push(created.clone());
        Ok(created)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ClientError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.hold_deletes {
            gate.notified().await;
        }
        self.check_failure()?;
        self.users
            .lock()
            .expect("users lock")
            .retain(|user| user.id != id);
        Ok(())
    }
}
