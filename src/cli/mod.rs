//! CLI module for eventmap.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Session commands (login, logout, status)
//! - Event listing, detail and creation
//!
//! # Usage
//!
//! ```ignore
//! use eventmap::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command, &client).await?;
//! ```

pub mod args;
pub mod events;
pub mod session;
pub mod version;

pub use args::{parse_args, CliCommand, EventDraft, USAGE};
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

use crate::api::EventsApi;
use crate::auth::AuthenticatedClient;

/// Run a parsed command against the given client.
pub async fn run_cli_command(command: CliCommand, client: &AuthenticatedClient) -> Result<()> {
    match command {
        CliCommand::Login(email) => session::handle_login_command(client, &email).await,
        CliCommand::Logout => session::handle_logout_command(client).await,
        CliCommand::Status => session::handle_status_command(client).await,
        CliCommand::Events => {
            events::handle_events_command(&EventsApi::new(client.clone())).await
        }
        CliCommand::Event(id) => {
            events::handle_event_command(&EventsApi::new(client.clone()), &id).await
        }
        CliCommand::Create(draft) => {
            events::handle_create_command(&EventsApi::new(client.clone()), &draft).await
        }
        CliCommand::Version => {
            handle_version_command();
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, MockHttpClient};
    use crate::config::ClientConfig;
    use std::sync::Arc;

    fn client(store: &InMemoryCredentials) -> AuthenticatedClient {
        AuthenticatedClient::new(
            ClientConfig::default(),
            Arc::new(MockHttpClient::new()),
            Arc::new(store.clone()),
        )
    }

    #[tokio::test]
    async fn test_logout_command_clears_store() {
        let store = InMemoryCredentials::with_tokens("A1", "R1");
        run_cli_command(CliCommand::Logout, &client(&store))
            .await
            .unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_help_makes_no_requests() {
        let store = InMemoryCredentials::new();
        assert!(run_cli_command(CliCommand::Help, &client(&store)).await.is_ok());
    }

    #[tokio::test]
    async fn test_events_without_session_sends_nothing() {
        let store = InMemoryCredentials::new();
        let http = MockHttpClient::new();
        let client = AuthenticatedClient::new(
            ClientConfig::default(),
            Arc::new(http.clone()),
            Arc::new(store.clone()),
        );

        let err = run_cli_command(CliCommand::Events, &client).await.unwrap_err();

        assert!(err.to_string().contains("eventmap login"));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_bad_coordinates_sends_nothing() {
        let store = InMemoryCredentials::with_tokens("A1", "R1");
        let http = MockHttpClient::new();
        let client = AuthenticatedClient::new(
            ClientConfig::default(),
            Arc::new(http.clone()),
            Arc::new(store.clone()),
        );
        let draft = EventDraft {
            title: Some("Picnic".to_string()),
            description: Some("Bring snacks".to_string()),
            latitude: Some("123.0".to_string()),
            longitude: Some("0.0".to_string()),
            location: Some("Park".to_string()),
            when: Some("2025-08-10T18:00:00Z".to_string()),
            capacity: Some("10".to_string()),
        };

        let err = run_cli_command(CliCommand::Create(draft), &client)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid coordinates"));
        assert!(http.get_requests().is_empty());
    }
}
