//! # Backend crate: typed client for the TipMe REST backend
//!
//! Every piece of persistent state (accounts, passwords, profiles, PIX keys) lives
//! in an external REST service. This crate is the only place that knows its wire
//! format. The `api` crate calls into it from server functions; the `ui` crate
//! only uses the plain data types and the client-side validation helpers.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`client`] | - | The [`Backend`] trait, one async method per backend endpoint |
//! | [`http`] | `http` | [`HttpBackend`], the `reqwest` implementation of [`Backend`] |
//! | [`memory`] | - | [`MemoryBackend`], an in-process implementation used as the test double |
//! | [`models`] | - | Request/response bodies, the public profile and social link types |
//! | [`error`] | - | [`BackendError`] and backend error message normalisation |
//! | [`token`] | - | Unverified JWT claim decoding (`userId`, `exp`) |
//! | [`session`] | - | Credential exchange and session enrichment |
//! | [`settings`] | - | Settings update requests, fired alone or as a concurrent batch |
//! | [`donation`] | - | Donation amount validation, BRL formatting, PIX payload request |

pub mod client;
pub mod donation;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod memory;
pub mod models;
pub mod session;
pub mod settings;
pub mod token;

pub use client::Backend;
pub use error::BackendError;
#[cfg(feature = "http")]
pub use http::HttpBackend;
pub use memory::MemoryBackend;
pub use models::{AccountInfo, PublicProfile, SocialLink};
pub use session::{SessionToken, SessionUser};
pub use settings::{BatchReport, FieldReport, SettingsField, SettingsUpdate};
pub use token::TokenClaims;
