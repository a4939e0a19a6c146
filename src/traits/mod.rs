//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport
//! - [`CredentialStore`] - Durable token storage

pub mod credentials;
pub mod http;

pub use credentials::{CredentialStore, CredentialsError, TokenKey};
pub use http::{Headers, HttpClient, HttpError, HttpRequest, Method, Response, AUTHORIZATION};
