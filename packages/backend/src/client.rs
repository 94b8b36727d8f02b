//! The [`Backend`] trait: one async method per backend endpoint.
//!
//! Implementations: [`crate::HttpBackend`] (real service, `http` feature) and
//! [`crate::MemoryBackend`] (in-process test double). Everything
//! above this trait (session assembly, settings batches, donations) is written
//! against it and never sees HTTP.

use std::future::Future;

use crate::error::BackendError;
use crate::models::{
    AccountInfo, ArtistNameUpdate, AvatarUpdate, BioUpdate, Credentials, LinkUpdate,
    LoginResponse, PixRequest, PixResponse, ProfileUpdate, PublicProfile, RegisterRequest,
    SavePixRequest, SocialLink,
};

/// Async access to the TipMe backend.
///
/// Methods taking `token` send it as a bearer credential.
pub trait Backend {
    /// `POST /users/register`
    fn register(&self, request: &RegisterRequest) -> impl Future<Output = Result<(), BackendError>>;

    /// `POST /users/login`
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, BackendError>>;

    /// `GET /users/all-info`
    fn account_info(&self, token: &str) -> impl Future<Output = Result<AccountInfo, BackendError>>;

    /// `GET /users/public-profile/{user_id}`
    fn public_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<PublicProfile, BackendError>>;

    /// `POST /pix/generate`
    fn pix_payload(
        &self,
        request: &PixRequest,
    ) -> impl Future<Output = Result<PixResponse, BackendError>>;

    /// `PATCH /users/profile`
    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<(), BackendError>>;

    /// `PATCH /users/artist-name`
    fn update_artist_name(
        &self,
        token: &str,
        update: &ArtistNameUpdate,
    ) -> impl Future<Output = Result<(), BackendError>>;

    /// `PATCH /users/bio`
    fn update_bio(
        &self,
        token: &str,
        update: &BioUpdate,
    ) -> impl Future<Output = Result<(), BackendError>>;

    /// `PATCH /users/update-avatar`
    fn update_avatar(
        &self,
        token: &str,
        update: &AvatarUpdate,
    ) -> impl Future<Output = Result<(), BackendError>>;

    /// `PATCH /users/link/{n}`
    fn update_link(
        &self,
        token: &str,
        link: SocialLink,
        update: &LinkUpdate,
    ) -> impl Future<Output = Result<(), BackendError>>;

    /// `POST /pix/save-pix`
    fn save_pix(
        &self,
        token: &str,
        request: &SavePixRequest,
    ) -> impl Future<Output = Result<(), BackendError>>;

    /// `DELETE /users/delete-user`
    fn delete_account(
        &self,
        token: &str,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), BackendError>>;
}
