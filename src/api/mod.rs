//! Domain calls on top of [`AuthenticatedClient`](crate::auth::AuthenticatedClient).

pub mod events;

pub use events::EventsApi;
