//! Async repository over the user API.
//!
//! `UserRepository` is the seam the controller depends on. The HTTP
//! implementation pairs a `UserClient` (request building, response parsing)
//! with a shared `reqwest::Client` that performs the round-trip.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::client::UserClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Address, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Returns the server's representation of the inserted user.
    async fn insert_user(&self, user: User) -> Result<User, ApiError>;

    async fn remove_user(&self, id: &str) -> Result<(), ApiError>;

    /// Fails with `ApiError::NotFound` when no user has this id.
    async fn get_user_by_id(&self, id: &str) -> Result<User, ApiError>;

    /// Fixed address lookup. Not tied to any user.
    async fn get_address(&self) -> Result<Address, ApiError>;
}

/// `UserRepository` backed by HTTP.
///
/// The `reqwest::Client` is meant to be built once per process and handed to
/// every repository; cloning it shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpUserRepository {
    http: reqwest::Client,
    client: UserClient,
}

impl HttpUserRepository {
    pub fn new(http: reqwest::Client, client: UserClient) -> Self {
        Self { http, client }
    }

    /// Execute a plain-data request. Any status comes back as data; only
    /// failures to get a response at all become `ApiError::Transport`.
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = req.method.as_str(), path = %req.path, "sending request");

        let mut builder = self.http.request(req.method.into(), &req.path);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        debug!(status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self.execute(self.client.build_list_users()).await?;
        self.client.parse_list_users(response)
    }

    #[instrument(skip(self, user), fields(id = %user.id))]
    async fn insert_user(&self, user: User) -> Result<User, ApiError> {
        let req = self.client.build_insert_user(&user)?;
        let response = self.execute(req).await?;
        self.client.parse_insert_user(response)
    }

    #[instrument(skip(self))]
    async fn remove_user(&self, id: &str) -> Result<(), ApiError> {
        let response = self.execute(self.client.build_remove_user(id)).await?;
        self.client.parse_remove_user(response)
    }

    #[instrument(skip(self))]
    async fn get_user_by_id(&self, id: &str) -> Result<User, ApiError> {
        let response = self.execute(self.client.build_get_user(id)).await?;
        self.client.parse_get_user(response)
    }

    #[instrument(skip(self))]
    async fn get_address(&self) -> Result<Address, ApiError> {
        let response = self.execute(self.client.build_get_address()).await?;
        self.client.parse_get_address(response)
    }
}
