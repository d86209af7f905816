//! HTTP access to the identity backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{CreateUserRequest, User, UserId},
    protocol::{ApiErrorResponse, RandomNumberResponse},
};
use tracing::{debug, warn};

use crate::{config::normalize_base_url, error::ClientError};

const FETCH_RANDOM_NUMBER_FAILED: &str = "Failed to fetch random number";
const FETCH_USERS_FAILED: &str = "Failed to fetch users";
const CREATE_USER_FAILED: &str = "Failed to create user";
const DELETE_USER_FAILED: &str = "Failed to delete user";

/// Operations the stores need from the backend. Implemented over HTTP by
/// [`HttpIdentityClient`]; tests substitute their own.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn get_random_number(&self) -> Result<f64, ClientError>;
    async fn get_users(&self) -> Result<Vec<User>, ClientError>;
    async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ClientError>;
    async fn delete_user(&self, id: UserId) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpIdentityClient {
    http: Client,
    base_url: String,
}

impl HttpIdentityClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn transport(context: &'static str) -> impl FnOnce(reqwest::Error) -> ClientError {
    move |source| ClientError::Transport { context, source }
}

/// Maps a non-2xx response to the operation's generic failure message.
fn ensure_success(response: Response, context: &'static str) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(%status, url = %response.url(), "{context}");
    Err(ClientError::Http {
        status,
        message: context.to_string(),
    })
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    context: &'static str,
) -> Result<T, ClientError> {
    let body = response.text().await.map_err(transport(context))?;
    serde_json::from_str(&body).map_err(|source| ClientError::Decode { context, source })
}

#[async_trait]
impl IdentityApi for HttpIdentityClient {
    async fn get_random_number(&self) -> Result<f64, ClientError> {
        let url = self.url("/random");
        debug!(%url, "fetching random number");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport(FETCH_RANDOM_NUMBER_FAILED))?;
        let response = ensure_success(response, FETCH_RANDOM_NUMBER_FAILED)?;
        let body: RandomNumberResponse = read_json(response, FETCH_RANDOM_NUMBER_FAILED).await?;
        Ok(body.number)
    }

    async fn get_users(&self) -> Result<Vec<User>, ClientError> {
        let url = self.url("/api/users");
        debug!(%url, "fetching users");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport(FETCH_USERS_FAILED))?;
        let response = ensure_success(response, FETCH_USERS_FAILED)?;

        let body = response
            .text()
            .await
            .map_err(transport(FETCH_USERS_FAILED))?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let users: Option<Vec<User>> =
            serde_json::from_str(&body).map_err(|source| ClientError::Decode {
                context: FETCH_USERS_FAILED,
                source,
            })?;
        Ok(users.unwrap_or_default())
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ClientError> {
        let url = self.url("/api/users/create");
        debug!(%url, name = %request.name, "creating user");
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport(CREATE_USER_FAILED))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ApiErrorResponse::from_body(&body)
                .and_then(ApiErrorResponse::into_message)
                .unwrap_or_else(|| CREATE_USER_FAILED.to_string());
            warn!(%status, %message, "create user rejected");
            return Err(ClientError::Http { status, message });
        }

        read_json(response, CREATE_USER_FAILED).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ClientError> {
        let url = self.url(&format!("/api/users/{id}"));
        debug!(%url, "deleting user");
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(transport(DELETE_USER_FAILED))?;
        ensure_success(response, DELETE_USER_FAILED)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
