use std::fmt::Write;

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use users_core::{ScreenState, UserListController, UserRepository};

/// What the user does on the screen after it loads.
#[derive(Debug)]
pub enum Interaction {
    /// Just look at the list (the refresh button).
    Refresh,
    Add { name: String, password: SecretString },
    Search { id: String },
    Remove { id: String },
}

/// Load the list, apply `interaction` and return what the screen shows.
///
/// Failures of add and remove (and of the initial load) are errors; a
/// failed search only sets the screen's error message.
/// # Errors
/// Returns an error if loading, adding or refreshing fails.
pub async fn execute<R: UserRepository + 'static>(
    interaction: Interaction,
    controller: &UserListController<R>,
) -> Result<ScreenState> {
    controller.refresh().await.context("failed to load users")?;

    match interaction {
        Interaction::Refresh => {}
        Interaction::Add { name, password } => {
            controller.set_name_field(name).await;
            controller.set_password_field(password.expose_secret()).await;
            controller.add_user().await.context("failed to add user")?;
        }
        Interaction::Search { id } => {
            controller.set_id_field(id).await;
            controller.search_user().await;
        }
        Interaction::Remove { id } => {
            controller.set_id_field(id).await;
            controller
                .remove_user()
                .await
                .context("failed to refresh users after remove")?;
        }
    }

    Ok(controller.snapshot().await)
}

/// One card per user, then the error message if any.
#[must_use]
pub fn render(state: &ScreenState) -> String {
    let mut out = String::new();
    for user in &state.users {
        let _ = writeln!(out, "ID: {}", user.id);
        let _ = writeln!(out, "Nome: {}", user.name);
        out.push('\n');
    }
    if let Some(message) = &state.error_message {
        let _ = writeln!(out, "{message}");
    }
    out
}
