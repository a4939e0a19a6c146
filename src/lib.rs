//! eventmap - authenticated API client for the event map service
//!
//! This library exposes modules for use by the `eventmap` binary and in
//! integration tests.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod traits;
