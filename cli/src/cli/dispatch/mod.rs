use std::time::Duration;

use anyhow::{Context, Result};
use secrecy::SecretString;

use crate::cli::{
    actions::{Action, Interaction},
    globals::GlobalArgs,
};

fn required<'a>(matches: &'a clap::ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("missing required argument: {id}"))
}

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let base_url = required(matches, "base-url")?.clone();
    let timeout = matches
        .get_one::<u64>("timeout")
        .map(|secs| Duration::from_secs(*secs));
    let globals = GlobalArgs::new(base_url).with_timeout(timeout);

    let action = match matches.subcommand() {
        Some(("list", _)) => Action::Screen(Interaction::Refresh),
        Some(("add", sub_m)) => Action::Screen(Interaction::Add {
            name: required(sub_m, "name")?.clone(),
            password: SecretString::from(required(sub_m, "password")?.as_str()),
        }),
        Some(("search", sub_m)) => Action::Screen(Interaction::Search {
            id: required(sub_m, "id")?.clone(),
        }),
        Some(("remove", sub_m)) => Action::Screen(Interaction::Remove {
            id: required(sub_m, "id")?.clone(),
        }),
        Some(("address", _)) => Action::Address,
        _ => anyhow::bail!("missing subcommand"),
    };

    Ok((action, globals))
}
