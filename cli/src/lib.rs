//! Command-line front end for the user-management service.
//!
//! Each subcommand plays one interaction of the user-list screen: load the
//! list, run the controller operation, print what the screen would show.

pub mod cli;
