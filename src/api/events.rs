//! Event endpoints.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::AuthenticatedClient;
use crate::error::{ApiError, ApiResult, NetworkError};
use crate::models::{Event, NewEvent};
use crate::traits::Response;

const EVENTS_PATH: &str = "/events/";

/// Typed calls against `/events/`, all routed through the authenticated client.
#[derive(Debug, Clone)]
pub struct EventsApi {
    client: AuthenticatedClient,
}

impl EventsApi {
    pub fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    /// `GET /events/`
    pub async fn list_events(&self) -> ApiResult<Vec<Event>> {
        let response = self.client.get(EVENTS_PATH).await?;
        let events: Vec<Event> = decode(&response)?;
        debug!("Fetched {} events", events.len());
        Ok(events)
    }

    /// `GET /events/{id}/`
    pub async fn get_event(&self, id: &str) -> ApiResult<Event> {
        let response = self.client.get(&event_path(id)).await?;
        decode(&response)
    }

    /// `POST /events/`. The payload is validated before anything is sent.
    pub async fn create_event(&self, event: &NewEvent) -> ApiResult<Event> {
        event.validate()?;
        let response = self.client.post_json(EVENTS_PATH, event).await?;
        decode(&response)
    }
}

fn event_path(id: &str) -> String {
    format!("{}{}/", EVENTS_PATH, id.trim_matches('/'))
}

/// Non-2xx becomes `HttpStatus`; an undecodable 2xx body becomes
/// `InvalidResponse`.
fn decode<T: DeserializeOwned>(response: &Response) -> ApiResult<T> {
    if !response.is_success() {
        return Err(NetworkError::from_response(response).into());
    }
    response.json().map_err(|e| {
        ApiError::from(NetworkError::InvalidResponse {
            message: e.to_string(),
        })
    })
}
