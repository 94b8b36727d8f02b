//! # Remote module: the shared backend client
//!
//! Every server function in the `api` crate reaches the TipMe REST backend
//! through one [`backend::HttpBackend`]. This module is entirely gated behind
//! `#[cfg(feature = "server")]` so that client (WASM) builds never pull in
//! `reqwest` or Tokio.
//!
//! ## Design
//!
//! The client is a **lazy, process-wide singleton** backed by a
//! [`tokio::sync::OnceCell`]. The first call to [`get_backend`] loads the
//! [`crate::config::Settings`], builds the HTTP client with the configured
//! base URL and timeout, and caches it for all subsequent callers. The
//! underlying `reqwest::Client` pools connections.
//!
//! ## Re-exports
//!
//! - [`get_backend`]: returns `&'static HttpBackend`, initialising it on first use.

#[cfg(feature = "server")]
mod client;

#[cfg(feature = "server")]
pub use client::get_backend;
