//! # Wire models for the TipMe backend
//!
//! Every request and response body exchanged with the backend, as explicit
//! `serde` types. Field names follow the backend's camelCase JSON.
//!
//! ## Types
//!
//! | Type | Endpoint |
//! |------|----------|
//! | [`RegisterRequest`] | `POST /users/register` |
//! | [`Credentials`] | `POST /users/login`, `DELETE /users/delete-user` |
//! | [`LoginResponse`] | `POST /users/login` response (`{token:{token,user:{userId}}}`) |
//! | [`AccountInfo`] | `GET /users/all-info` response |
//! | [`PublicProfile`] | `GET /users/public-profile/{userId}` response |
//! | [`PixRequest`] / [`PixResponse`] | `POST /pix/generate` |
//! | [`ProfileUpdate`], [`ArtistNameUpdate`], [`BioUpdate`], [`AvatarUpdate`], [`LinkUpdate`] | `PATCH /users/...` |
//! | [`SavePixRequest`] | `POST /pix/save-pix` |
//!
//! Identifiers may arrive as JSON strings or numbers; both are normalised to
//! `String` by [`optional_id`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /users/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub user_mail: String,
    pub user_password: String,
}

/// Email + password pair, used for login and account deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_mail: String,
    pub user_password: String,
}

impl Credentials {
    pub fn new(user_mail: impl Into<String>, user_password: impl Into<String>) -> Self {
        Self {
            user_mail: user_mail.into(),
            user_password: user_password.into(),
        }
    }
}

/// Response of `POST /users/login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<LoginToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginToken {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
}

impl LoginResponse {
    /// The bearer token, if the backend returned a non-empty one.
    pub fn bearer(&self) -> Option<&str> {
        self.token
            .as_ref()
            .and_then(|t| t.token.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.token
            .as_ref()
            .and_then(|t| t.user.as_ref())
            .and_then(|u| u.user_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Response of `GET /users/all-info`: everything the session caches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub user_mail: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub user_link1: Option<String>,
    #[serde(default)]
    pub user_link2: Option<String>,
    #[serde(default)]
    pub user_link3: Option<String>,
}

/// Public profile of an artist, as shown on `/profile/:user_id`.
///
/// The backend answers `{}` for users who never filled their profile; that
/// deserialises to a profile with every field `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub user_link1: Option<String>,
    #[serde(default)]
    pub user_link2: Option<String>,
    #[serde(default)]
    pub user_link3: Option<String>,
}

impl PublicProfile {
    /// A profile is configured when at least one of artist name, bio or avatar is set.
    pub fn is_configured(&self) -> bool {
        present(&self.artist_name).is_some()
            || present(&self.bio).is_some()
            || present(&self.user_avatar).is_some()
    }

    pub fn link(&self, link: SocialLink) -> Option<&str> {
        match link {
            SocialLink::Instagram => present(&self.user_link1),
            SocialLink::Spotify => present(&self.user_link2),
            SocialLink::YouTube => present(&self.user_link3),
        }
    }

    /// Present links, in slot order.
    pub fn links(&self) -> Vec<(SocialLink, String)> {
        SocialLink::ALL
            .iter()
            .filter_map(|l| self.link(*l).map(|url| (*l, url.to_string())))
            .collect()
    }
}

/// The three external link slots of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialLink {
    Instagram,
    Spotify,
    YouTube,
}

impl SocialLink {
    pub const ALL: [SocialLink; 3] = [SocialLink::Instagram, SocialLink::Spotify, SocialLink::YouTube];

    /// Slot number used by `PATCH /users/link/{n}`.
    pub fn slot(self) -> u8 {
        match self {
            SocialLink::Instagram => 1,
            SocialLink::Spotify => 2,
            SocialLink::YouTube => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SocialLink::Instagram => "Instagram",
            SocialLink::Spotify => "Spotify",
            SocialLink::YouTube => "YouTube",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SocialLink::Instagram => "https://instagram.com/seu_usuario",
            SocialLink::Spotify => "https://open.spotify.com/artist/seu_id",
            SocialLink::YouTube => "https://youtube.com/@seu_usuario",
        }
    }
}

/// Body of the PIX payload request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixRequest {
    pub user_id: String,
    pub value: f64,
}

/// PIX "copia e cola" payload returned for a donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixResponse {
    pub payload: String,
}

/// Body of `PATCH /users/profile`. `password` is the current password.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_mail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_password: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistNameUpdate {
    pub artist_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioUpdate {
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUpdate {
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkUpdate {
    pub link: String,
}

/// Body of `POST /pix/save-pix`. `pix_name` is the receiver's full name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePixRequest {
    pub pix_key: String,
    pub pix_name: String,
    pub pix_city: String,
}

/// `Some(s)` only for non-blank strings.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Deserialize an identifier that may be a JSON string or number.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_shape() {
        let body = json!({ "token": { "token": "abc.def.ghi", "user": { "userId": 42 } } });
        let response: LoginResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.bearer(), Some("abc.def.ghi"));
        assert_eq!(response.user_id(), Some("42"));
    }

    #[test]
    fn test_login_response_without_token() {
        let response: LoginResponse = serde_json::from_value(json!({ "token": {} })).unwrap();
        assert!(response.bearer().is_none());

        let response: LoginResponse =
            serde_json::from_value(json!({ "token": { "token": "" } })).unwrap();
        assert!(response.bearer().is_none());
    }

    #[test]
    fn test_empty_public_profile_is_not_configured() {
        let profile: PublicProfile = serde_json::from_value(json!({})).unwrap();
        assert!(!profile.is_configured());
        assert!(profile.links().is_empty());
    }

    #[test]
    fn test_profile_with_only_links_is_not_configured() {
        let profile: PublicProfile = serde_json::from_value(json!({
            "artistName": "  ",
            "userLink1": "https://instagram.com/banda"
        }))
        .unwrap();
        assert!(!profile.is_configured());
    }

    #[test]
    fn test_profile_links_in_slot_order() {
        let profile: PublicProfile = serde_json::from_value(json!({
            "bio": "Punk desde 1998",
            "userLink3": "https://youtube.com/@banda",
            "userLink1": "https://instagram.com/banda"
        }))
        .unwrap();
        assert!(profile.is_configured());
        let links: Vec<SocialLink> = profile.links().into_iter().map(|(l, _)| l).collect();
        assert_eq!(links, vec![SocialLink::Instagram, SocialLink::YouTube]);
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            user_name: Some("novo".into()),
            password: "senha-atual".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "userName": "novo", "password": "senha-atual" })
        );
    }

    #[test]
    fn test_social_link_slots() {
        let slots: Vec<u8> = SocialLink::ALL.iter().map(|l| l.slot()).collect();
        assert_eq!(slots, vec![1, 2, 3]);
    }
}
