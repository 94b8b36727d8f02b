//! Session storage for the signed-in artist.

#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use session::{
    clear_session, current_user, load_session, now_secs, require_token, store_session, SESSION_TOKEN_KEY,
};
