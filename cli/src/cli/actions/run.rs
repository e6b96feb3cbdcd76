use anyhow::{Context, Result};
use tracing::debug;
use users_core::{HttpUserRepository, UserClient, UserListController};

use crate::cli::{
    actions::{address, screen, Action},
    globals::GlobalArgs,
};

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let http = globals.http_client().context("failed to build HTTP client")?;
    let client = UserClient::new(&globals.base_url).context("invalid --base-url")?;
    debug!(base_url = %client.base_url(), "using user service");
    let repo = HttpUserRepository::new(http, client);

    let output = match action {
        Action::Screen(interaction) => {
            let controller = UserListController::new(repo);
            let state = screen::execute(interaction, &controller).await?;
            screen::render(&state)
        }
        Action::Address => address::execute(&repo).await?,
    };

    print!("{output}");
    Ok(())
}
