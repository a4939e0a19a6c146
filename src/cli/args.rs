//! Command-line argument parsing for the eventmap CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Sign in with the given email; the password is prompted for
    Login(String),
    /// Remove the stored session
    Logout,
    /// List all events
    Events,
    /// Show one event
    Event(String),
    /// Create an event from command-line flags
    Create(EventDraft),
    /// Report whether a session is stored
    Status,
    /// Show version information
    Version,
    /// Show usage
    Help,
}

/// Raw `create` flags, converted and validated by the command handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location: Option<String>,
    pub when: Option<String>,
    pub capacity: Option<String>,
}

/// Usage text printed by `help` and on bad input.
pub const USAGE: &str = "\
Usage: eventmap <command>

Commands:
  login <email>   Sign in (password is prompted)
  logout          Remove the stored session
  events          List events
  event <id>      Show one event
  create --title <t> --description <d> --lat <lat> --lng <lng>
         --location <place> --when <rfc3339> --capacity <n>
                  Create an event
  status          Show whether you are signed in
  --version, -V   Show version
  help            Show this message

Environment:
  EVENTMAP_API_URL        API base URL (default http://localhost:8000)
  EVENTMAP_TIMEOUT_SECS   Request timeout in seconds (default 30)
  RUST_LOG                Log filter (default info)";

/// Parse command-line arguments and return the appropriate command.
///
/// The first argument is the program name and is skipped. A command that
/// is missing its operand, or anything unrecognised, yields `Help`.
///
/// # Examples
///
/// ```
/// use eventmap::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["eventmap".to_string(), "event".to_string(), "7".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Event("7".to_string()));
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);

    let command = match args.next() {
        Some(command) => command,
        None => return CliCommand::Help,
    };

    match command.as_str() {
        "login" => args.next().map(CliCommand::Login).unwrap_or(CliCommand::Help),
        "logout" => CliCommand::Logout,
        "events" | "list" => CliCommand::Events,
        "event" | "show" => args.next().map(CliCommand::Event).unwrap_or(CliCommand::Help),
        "create" => parse_draft(args).map(CliCommand::Create).unwrap_or(CliCommand::Help),
        "status" => CliCommand::Status,
        "--version" | "-V" => CliCommand::Version,
        _ => CliCommand::Help,
    }
}

/// `--flag value` pairs for `create`. Unknown flags or a flag without a
/// value reject the whole command.
fn parse_draft<I>(mut args: I) -> Option<EventDraft>
where
    I: Iterator<Item = String>,
{
    let mut draft = EventDraft::default();

    while let Some(flag) = args.next() {
        let value = args.next()?;
        let slot = match flag.as_str() {
            "--title" => &mut draft.title,
            "--description" => &mut draft.description,
            "--lat" => &mut draft.latitude,
            "--lng" => &mut draft.longitude,
            "--location" => &mut draft.location,
            "--when" => &mut draft.when,
            "--capacity" => &mut draft.capacity,
            _ => return None,
        };
        *slot = Some(value);
    }

    Some(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let args: Vec<String> = std::iter::once("eventmap")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse(&["login", "a@b.com"]),
            CliCommand::Login("a@b.com".to_string())
        );
    }

    #[test]
    fn test_parse_login_without_email() {
        assert_eq!(parse(&["login"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_event() {
        assert_eq!(parse(&["event", "42"]), CliCommand::Event("42".to_string()));
        assert_eq!(parse(&["show", "42"]), CliCommand::Event("42".to_string()));
        assert_eq!(parse(&["event"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse(&["logout"]), CliCommand::Logout);
        assert_eq!(parse(&["events"]), CliCommand::Events);
        assert_eq!(parse(&["list"]), CliCommand::Events);
        assert_eq!(parse(&["status"]), CliCommand::Status);
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::Help);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(parse(&["--unknown"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_create() {
        let command = parse(&[
            "create",
            "--title",
            "Picnic",
            "--lat",
            "33.424",
            "--lng",
            "-111.928",
            "--when",
            "2025-08-10T18:00:00Z",
            "--capacity",
            "150",
        ]);

        match command {
            CliCommand::Create(draft) => {
                assert_eq!(draft.title.as_deref(), Some("Picnic"));
                assert_eq!(draft.longitude.as_deref(), Some("-111.928"));
                assert_eq!(draft.capacity.as_deref(), Some("150"));
                assert_eq!(draft.description, None);
            }
            other => panic!("Expected Create, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_rejects_bad_flags() {
        assert_eq!(parse(&["create", "--title"]), CliCommand::Help);
        assert_eq!(parse(&["create", "--colour", "red"]), CliCommand::Help);
    }
}
