//! Authentication for the event API.
//!
//! This module provides:
//! - Token pair storage on top of any [`CredentialStore`](crate::traits::CredentialStore)
//! - Per-call request state and the single-use retry marker
//! - Coalesced access token refresh
//! - Login/logout
//! - [`AuthenticatedClient`], which ties the above together

pub mod client;
pub mod context;
pub mod refresh;
pub mod session;
pub mod token_store;

pub use client::AuthenticatedClient;
pub use context::{ExchangeState, RequestContext};
pub use refresh::{RefreshCoordinator, RefreshOutcome};
pub use session::{LoginCredentials, SessionManager};
pub use token_store::{StoredTokens, TokenPair, TokenStore};
