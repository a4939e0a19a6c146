//! `events`, `event <id>` and `create` commands.

use chrono::{DateTime, Utc};
use color_eyre::eyre::{eyre, Result, WrapErr};

use super::args::EventDraft;
use crate::api::EventsApi;
use crate::error::{ApiError, AuthError};
use crate::models::{Event, NewEvent};

/// Fails early with a login hint instead of sending a request that can only 401.
async fn require_session(api: &EventsApi) -> Result<()> {
    if api.client().session().is_authenticated().await {
        Ok(())
    } else {
        Err(report(ApiError::Auth(AuthError::NotAuthenticated)))
    }
}

pub async fn handle_events_command(api: &EventsApi) -> Result<()> {
    require_session(api).await?;
    let events = api.list_events().await.map_err(report)?;

    if events.is_empty() {
        println!("No events");
        return Ok(());
    }

    for event in &events {
        println!("{}", summary_line(event));
    }
    Ok(())
}

pub async fn handle_event_command(api: &EventsApi, id: &str) -> Result<()> {
    require_session(api).await?;
    let event = api.get_event(id).await.map_err(report)?;
    print!("{}", detail(&event));
    Ok(())
}

pub async fn handle_create_command(api: &EventsApi, draft: &EventDraft) -> Result<()> {
    let event = new_event_from(draft)?;
    require_session(api).await?;

    let created = api.create_event(&event).await.map_err(report)?;
    println!("Created event {}", created.id);
    print!("{}", detail(&created));
    Ok(())
}

/// Numbers and the date are parsed here; text fields are left for
/// `NewEvent::validate` to check.
fn new_event_from(draft: &EventDraft) -> Result<NewEvent> {
    let latitude = required(&draft.latitude, "--lat")?
        .parse::<f64>()
        .wrap_err("--lat must be a number")?;
    let longitude = required(&draft.longitude, "--lng")?
        .parse::<f64>()
        .wrap_err("--lng must be a number")?;
    let date_time = DateTime::parse_from_rfc3339(required(&draft.when, "--when")?)
        .wrap_err("--when must be an RFC 3339 timestamp, e.g. 2025-08-10T18:00:00Z")?
        .with_timezone(&Utc);
    let ticket_capacity = required(&draft.capacity, "--capacity")?
        .parse::<u32>()
        .wrap_err("--capacity must be a whole number")?;

    Ok(NewEvent {
        title: draft.title.clone().unwrap_or_default(),
        description: draft.description.clone().unwrap_or_default(),
        latitude,
        longitude,
        location_text: draft.location.clone().unwrap_or_default(),
        date_time,
        ticket_capacity,
    })
}

fn required<'a>(value: &'a Option<String>, flag: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| eyre!("Missing {}", flag))
}

fn summary_line(event: &Event) -> String {
    format!(
        "{:>6}  {}  {}  @ {}",
        event.id,
        event.date_time.format("%Y-%m-%d %H:%M"),
        event.title,
        event.location_text
    )
}

fn detail(event: &Event) -> String {
    let (latitude, longitude) = event.coordinates();
    format!(
        "{}\nHosted by {}\nWhen:     {}\nWhere:    {} ({:.5}, {:.5})\nCapacity: {}\n\n{}\n",
        event.title,
        event.host,
        event.date_time.format("%A, %B %-d %Y at %H:%M UTC"),
        event.location_text,
        latitude,
        longitude,
        event.ticket_capacity,
        event.description
    )
}

fn report(err: ApiError) -> color_eyre::Report {
    let hint = match &err {
        _ if err.requires_reauth() => "\nRun: eventmap login <email>".to_string(),
        // The server's field errors say what to fix.
        ApiError::Network(net) if net.status() == Some(400) => format!("\n{}", net),
        _ => String::new(),
    };
    eyre!("{} [{}]{}", err.user_message(), err.error_code(), hint)
}
