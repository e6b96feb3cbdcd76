//! Client core for the user-management service.
//!
//! # Overview
//! Three layers, each usable on its own:
//! - `UserClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `UserRepository` is the async contract over the remote API;
//!   `HttpUserRepository` fulfils it with a shared `reqwest::Client`.
//! - `UserListController` holds the screen state (user list, form fields,
//!   error message) and drives the repository.
//!
//! # Design
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//! - Passwords are sent in plaintext, as the remote service expects. They
//!   are redacted from `Debug` output and never logged.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod repository;
pub mod types;

pub use client::UserClient;
pub use controller::{next_id, ScreenState, UserListController, ERROR_DISPLAY, NOT_FOUND_MESSAGE};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use repository::{HttpUserRepository, UserRepository};
pub use types::{Address, User};
