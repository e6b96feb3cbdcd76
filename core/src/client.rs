//! Stateless HTTP request builder and response parser for the user API.
//!
//! # Design
//! `UserClient` holds only the parsed base URL and carries no mutable state
//! between calls. Each remote operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The repository executes the round-trip in between.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Address, User};

const USERS: &str = "usuarios";

/// The address lookup is a fixed, unparameterized path.
const ADDRESS_LOOKUP: [&str; 3] = ["58013240", "json", ""];

/// Synchronous, stateless client for the user API.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: Url,
}

impl UserClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join `segments` onto the base path. Each segment is percent-encoded,
    /// so an id containing `/` stays a single segment.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }

    pub fn build_list_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&[USERS]),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_address(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&ADDRESS_LOOKUP),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_insert_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(user).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint(&[USERS]),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_remove_user(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.endpoint(&[USERS, id]),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_user(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&[USERS, id]),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_address(&self, response: HttpResponse) -> Result<Address, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_insert_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Success carries no guaranteed body, so it is never read.
    pub fn parse_remove_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}
