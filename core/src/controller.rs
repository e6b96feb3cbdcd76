//! Screen logic for the user list.
//!
//! # Design
//! `UserListController` owns the list of users, the three form fields and a
//! transient error message. Every operation is an independent
//! request/refresh cycle: read the fields, call the repository, write the
//! result back. The state lock is never held across a repository call, so
//! concurrent operations interleave and whichever finishes last decides the
//! final `users` (last write wins; there is no debouncing or cancellation).
//!
//! After any mutation the list is re-fetched in full, never patched locally.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::repository::UserRepository;
use crate::types::User;

/// Shown when a by-id search fails, whatever the cause.
pub const NOT_FOUND_MESSAGE: &str = "Usuário não encontrado!";

/// How long an error message stays visible.
pub const ERROR_DISPLAY: Duration = Duration::from_secs(3);

/// Snapshot of everything the screen displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub users: Vec<User>,
    pub name_field: String,
    pub password_field: String,
    pub id_field: String,
    pub error_message: Option<String>,
}

impl ScreenState {
    /// Adding needs both a name and a password.
    pub fn can_add(&self) -> bool {
        !self.name_field.is_empty() && !self.password_field.is_empty()
    }

    pub fn can_search_or_remove(&self) -> bool {
        !self.id_field.is_empty()
    }
}

/// Next id to assign: one past the largest numeric id in `users`.
///
/// Ids are 32-bit; ids that do not parse (including ones past `i32::MAX`)
/// count as 0, so the result is advisory and nothing guarantees it is
/// unique on the server.
pub fn next_id(users: &[User]) -> String {
    users
        .iter()
        .map(|user| user.id.parse::<i32>().unwrap_or(0))
        .max()
        .map_or(1, |max| max.saturating_add(1))
        .to_string()
}

struct State {
    screen: ScreenState,
    // Bumped on every new message; a dismiss task only clears its own.
    error_generation: u64,
    dismiss: Option<JoinHandle<()>>,
}

struct Inner<R> {
    repo: R,
    state: RwLock<State>,
}

/// Cloneable handle; clones share the same state.
pub struct UserListController<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for UserListController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: UserRepository + 'static> UserListController<R> {
    pub fn new(repo: R) -> Self {
        Self {
            inner: Arc::new(Inner {
                repo,
                state: RwLock::new(State {
                    screen: ScreenState::default(),
                    error_generation: 0,
                    dismiss: None,
                }),
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn repository(&self) -> &R {
        &self.inner.repo
    }

    pub async fn snapshot(&self) -> ScreenState {
        self.inner.state.read().await.screen.clone()
    }

    pub async fn users(&self) -> Vec<User> {
        self.inner.state.read().await.screen.users.clone()
    }

    pub async fn error_message(&self) -> Option<String> {
        self.inner.state.read().await.screen.error_message.clone()
    }

    pub async fn set_name_field(&self, value: impl Into<String>) {
        self.inner.state.write().await.screen.name_field = value.into();
    }

    pub async fn set_password_field(&self, value: impl Into<String>) {
        self.inner.state.write().await.screen.password_field = value.into();
    }

    pub async fn set_id_field(&self, value: impl Into<String>) {
        self.inner.state.write().await.screen.id_field = value.into();
    }

    /// Replace the held list with the server's current one.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let users = self.inner.repo.list_users().await?;
        debug!(count = users.len(), "user list refreshed");
        self.inner.state.write().await.screen.users = users;
        Ok(())
    }

    /// Insert a user built from the name and password fields, then refresh
    /// and clear both fields. Does nothing unless both fields are filled.
    ///
    /// Insert and refresh failures are returned untouched; the fields are
    /// left as they were in that case.
    pub async fn add_user(&self) -> Result<(), ApiError> {
        let user = {
            let state = self.inner.state.read().await;
            if !state.screen.can_add() {
                debug!("add skipped: name or password empty");
                return Ok(());
            }
            User::new(
                next_id(&state.screen.users),
                state.screen.name_field.clone(),
                state.screen.password_field.clone(),
            )
        };

        debug!(id = %user.id, "inserting user");
        self.inner.repo.insert_user(user).await?;
        self.refresh().await?;

        let mut state = self.inner.state.write().await;
        state.screen.name_field.clear();
        state.screen.password_field.clear();
        Ok(())
    }

    /// Show only the user whose id is in the id field.
    ///
    /// Any failure, including an unreachable server, shows
    /// `NOT_FOUND_MESSAGE` and keeps the current list. The id field is
    /// cleared either way.
    pub async fn search_user(&self) {
        let Some(id) = self.take_id_input().await else {
            return;
        };

        match self.inner.repo.get_user_by_id(&id).await {
            Ok(user) => self.inner.state.write().await.screen.users = vec![user],
            Err(err) => {
                debug!(%id, %err, "search failed");
                self.show_error(NOT_FOUND_MESSAGE).await;
            }
        }

        self.inner.state.write().await.screen.id_field.clear();
    }

    /// Delete the user whose id is in the id field, then refresh.
    ///
    /// A failed delete is only logged; the refresh happens regardless and
    /// its error, if any, is returned. The id field is cleared either way.
    pub async fn remove_user(&self) -> Result<(), ApiError> {
        let Some(id) = self.take_id_input().await else {
            return Ok(());
        };

        if let Err(err) = self.inner.repo.remove_user(&id).await {
            warn!(%id, %err, "delete failed, refreshing anyway");
        }
        let refreshed = self.refresh().await;

        self.inner.state.write().await.screen.id_field.clear();
        refreshed
    }

    async fn take_id_input(&self) -> Option<String> {
        let state = self.inner.state.read().await;
        if state.screen.can_search_or_remove() {
            Some(state.screen.id_field.clone())
        } else {
            debug!("id field empty");
            None
        }
    }

    /// Display `message` for `ERROR_DISPLAY`. A different message cancels
    /// the pending dismissal of the older one and restarts the clock; showing
    /// the message already on screen changes nothing.
    pub async fn show_error(&self, message: impl Into<String>) {
        let message = message.into();
        let mut state = self.inner.state.write().await;
        if state.screen.error_message.as_deref() == Some(message.as_str()) {
            return;
        }
        if let Some(pending) = state.dismiss.take() {
            pending.abort();
        }
        state.error_generation += 1;
        state.screen.error_message = Some(message);

        let generation = state.error_generation;
        let inner = Arc::downgrade(&self.inner);
        state.dismiss = Some(tokio::spawn(dismiss_after(inner, generation)));
    }

    pub async fn clear_error(&self) {
        let mut state = self.inner.state.write().await;
        if let Some(pending) = state.dismiss.take() {
            pending.abort();
        }
        state.error_generation += 1;
        state.screen.error_message = None;
    }
}

async fn dismiss_after<R>(inner: Weak<Inner<R>>, generation: u64) {
    tokio::time::sleep(ERROR_DISPLAY).await;
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut state = inner.state.write().await;
    if state.error_generation == generation {
        state.screen.error_message = None;
        state.dismiss = None;
    }
}
