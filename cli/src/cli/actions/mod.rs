pub mod address;
pub mod screen;

// Single dispatch point for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;

pub use screen::Interaction;

#[derive(Debug)]
pub enum Action {
    /// One interaction with the user-list screen.
    Screen(Interaction),
    /// The fixed address lookup; independent of the screen.
    Address,
}

impl Action {
    /// Execute the action and print its output to stdout.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
