use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 4 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn id_arg() -> Arg {
    Arg::new("id").help("User id").required(true)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("users")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .help("Base URL of the user service")
                .default_value(DEFAULT_BASE_URL)
                .env("USERS_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds (default: none)")
                .env("USERS_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("USERS_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(Command::new("list").about("List all users"))
        .subcommand(
            Command::new("add")
                .about("Add a user with the next free id")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("User name")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("User password (sent to the service as-is)")
                        .env("USERS_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Show only the user with this id")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove the user with this id")
                .arg(id_arg()),
        )
        .subcommand(Command::new("address").about("Run the fixed address lookup"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "users");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            env!("CARGO_PKG_DESCRIPTION")
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(["USERS_BASE_URL", "USERS_TIMEOUT", "USERS_LOG_LEVEL"], || {
            let matches = new().get_matches_from(vec!["users", "list"]);
            assert_eq!(
                matches.get_one::<String>("base-url").map(String::as_str),
                Some(DEFAULT_BASE_URL)
            );
            assert_eq!(matches.get_one::<u64>("timeout"), None);
            assert_eq!(matches.subcommand_name(), Some("list"));
        });
    }

    #[test]
    fn test_add_args() {
        let matches = new().get_matches_from(vec![
            "users",
            "--base-url",
            "http://api.tld",
            "add",
            "--name",
            "Ana",
            "--password",
            "segredo",
        ]);

        assert_eq!(
            matches.get_one::<String>("base-url").map(String::as_str),
            Some("http://api.tld")
        );
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "add");
        assert_eq!(sub.get_one::<String>("name").map(String::as_str), Some("Ana"));
        assert_eq!(
            sub.get_one::<String>("password").map(String::as_str),
            Some("segredo")
        );
    }

    #[test]
    fn test_search_requires_id() {
        let result = new().try_get_matches_from(vec!["users", "search"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("USERS_BASE_URL", Some("http://10.0.2.2:3000")),
                ("USERS_TIMEOUT", Some("5")),
                ("USERS_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["users", "remove", "5"]);
                assert_eq!(
                    matches.get_one::<String>("base-url").map(String::as_str),
                    Some("http://10.0.2.2:3000")
                );
                assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(5));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
                let (_, sub) = matches.subcommand().unwrap();
                assert_eq!(sub.get_one::<String>("id").map(String::as_str), Some("5"));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, level) in levels.iter().enumerate() {
            temp_env::with_var("USERS_LOG_LEVEL", Some(*level), || {
                let matches = new().get_matches_from(vec!["users", "list"]);
                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
