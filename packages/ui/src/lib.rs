//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const TIPME_CSS: Asset = asset!("/assets/tipme.css");

mod timer;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

pub mod alert;
pub use alert::{AlertHost, AlertKind, AlertMessage};

mod login_dialog;
pub use login_dialog::LoginDialog;

mod profile_header;
pub use profile_header::ProfileHeader;

mod not_configured;
pub use not_configured::NotConfigured;

mod pix_donation;
pub use pix_donation::PixDonation;

pub mod settings;
