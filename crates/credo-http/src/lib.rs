//! credo-http - REST collaborator client.
//!
//! Implements the core's profile-loader and provider-bridge seams over
//! the backend's REST surface, plus password login and the API-key
//! probe. The session controller never talks HTTP directly; it goes
//! through these implementations.

pub mod api;
pub mod client;
pub mod endpoints;

pub use api::AuthApi;
pub use client::RestClient;
