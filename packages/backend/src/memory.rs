use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::Backend;
use crate::error::BackendError;
use crate::models::{
    AccountInfo, ArtistNameUpdate, AvatarUpdate, BioUpdate, Credentials, LinkUpdate, LoginResponse,
    LoginToken, LoginUser, PixRequest, PixResponse, ProfileUpdate, PublicProfile, RegisterRequest,
    SavePixRequest, SocialLink,
};
use crate::settings::SettingsField;
use crate::token::{encode_unsigned, TokenClaims};

/// `exp` of every token issued by [`MemoryBackend`] (2100-01-01).
const TOKEN_EXP: u64 = 4_102_444_800;

/// Endpoints that can be switched into failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Register,
    Login,
    AccountInfo,
    PublicProfile,
    Pix,
    Field(SettingsField),
    DeleteAccount,
}

/// An account held by [`MemoryBackend`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryAccount {
    pub user_id: String,
    pub user_name: String,
    pub user_mail: String,
    pub password: String,
    pub artist_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub links: [Option<String>; 3],
    pub pix: Option<SavePixRequest>,
    pub pix_payload: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, MemoryAccount>,
    tokens: HashMap<String, String>,
    failing: HashSet<Endpoint>,
    requests: Vec<String>,
    next_id: u64,
    omit_login_user_id: bool,
}

/// In-process [`Backend`] used as the test double for the real service.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create an account directly, without going through `register`. Returns its id.
    pub fn add_account(&self, user_name: &str, user_mail: &str, password: &str) -> String {
        let mut state = self.lock();
        Self::insert_account(&mut state, user_name, user_mail, password)
    }

    fn insert_account(state: &mut State, user_name: &str, user_mail: &str, password: &str) -> String {
        state.next_id += 1;
        let user_id = state.next_id.to_string();
        state.accounts.insert(
            user_id.clone(),
            MemoryAccount {
                user_id: user_id.clone(),
                user_name: user_name.to_string(),
                user_mail: user_mail.to_string(),
                password: password.to_string(),
                ..Default::default()
            },
        );
        user_id
    }

    pub fn account(&self, user_id: &str) -> Option<MemoryAccount> {
        self.lock().accounts.get(user_id).cloned()
    }

    pub fn set_profile(&self, user_id: &str, edit: impl FnOnce(&mut MemoryAccount)) {
        if let Some(account) = self.lock().accounts.get_mut(user_id) {
            edit(account);
        }
    }

    pub fn set_pix_payload(&self, user_id: &str, payload: &str) {
        self.set_profile(user_id, |account| account.pix_payload = Some(payload.to_string()));
    }

    /// Make every call to `endpoint` fail with a transport error.
    pub fn fail(&self, endpoint: Endpoint) {
        self.lock().failing.insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.lock().failing.remove(&endpoint);
    }

    /// Answer logins without the nested `user.userId` field.
    pub fn omit_login_user_id(&self, omit: bool) {
        self.lock().omit_login_user_id = omit;
    }

    /// Every call received so far, as `"METHOD /path"`.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    fn enter(&self, endpoint: Endpoint, request: String) -> Result<MutexGuard<'_, State>, BackendError> {
        let mut state = self.lock();
        state.requests.push(request);
        if state.failing.contains(&endpoint) {
            return Err(BackendError::Transport("connection refused".to_string()));
        }
        Ok(state)
    }

    fn authorize<'a>(state: &'a mut State, token: &str) -> Result<&'a mut MemoryAccount, BackendError> {
        let user_id = state.tokens.get(token).cloned().ok_or(BackendError::Status {
            status: 401,
            message: "Token inválido".to_string(),
        })?;
        state.accounts.get_mut(&user_id).ok_or(BackendError::Status {
            status: 404,
            message: "Usuário não encontrado".to_string(),
        })
    }

    fn edit(
        &self,
        field: SettingsField,
        request: String,
        token: &str,
        edit: impl FnOnce(&mut MemoryAccount) -> Result<(), BackendError>,
    ) -> Result<(), BackendError> {
        let mut state = self.enter(Endpoint::Field(field), request)?;
        let account = Self::authorize(&mut state, token)?;
        edit(account)
    }
}

impl Backend for MemoryBackend {
    async fn register(&self, request: &RegisterRequest) -> Result<(), BackendError> {
        let mut state = self.enter(Endpoint::Register, "POST /users/register".into())?;

        let mut problems = Vec::new();
        if request.user_name.trim().is_empty() {
            problems.push("userName should not be empty");
        }
        if !request.user_mail.contains('@') {
            problems.push("userMail must be an email");
        }
        if request.user_password.len() < 6 {
            problems.push("userPassword must be longer than or equal to 6 characters");
        }
        if !problems.is_empty() {
            return Err(BackendError::Status {
                status: 400,
                message: problems.join(". "),
            });
        }

        if state.accounts.values().any(|a| a.user_mail == request.user_mail) {
            return Err(BackendError::Status {
                status: 409,
                message: "Email já cadastrado".to_string(),
            });
        }

        Self::insert_account(
            &mut state,
            &request.user_name,
            &request.user_mail,
            &request.user_password,
        );
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        let mut state = self.enter(Endpoint::Login, "POST /users/login".into())?;

        let user_id = state
            .accounts
            .values()
            .find(|a| a.user_mail == credentials.user_mail && a.password == credentials.user_password)
            .map(|a| a.user_id.clone())
            .ok_or(BackendError::Status {
                status: 401,
                message: "Credenciais inválidas".to_string(),
            })?;

        let token = encode_unsigned(&TokenClaims {
            user_id: Some(user_id.clone()),
            exp: Some(TOKEN_EXP + state.tokens.len() as u64),
        });
        state.tokens.insert(token.clone(), user_id.clone());

        let user = (!state.omit_login_user_id).then(|| LoginUser {
            user_id: Some(user_id),
        });
        Ok(LoginResponse {
            token: Some(LoginToken {
                token: Some(token),
                user,
            }),
        })
    }

    async fn account_info(&self, token: &str) -> Result<AccountInfo, BackendError> {
        let mut state = self.enter(Endpoint::AccountInfo, "GET /users/all-info".into())?;
        let account = Self::authorize(&mut state, token)?;
        Ok(AccountInfo {
            user_id: Some(account.user_id.clone()),
            user_name: Some(account.user_name.clone()),
            artist_name: account.artist_name.clone(),
            bio: account.bio.clone(),
            user_mail: Some(account.user_mail.clone()),
            user_avatar: account.avatar.clone(),
            user_link1: account.links[0].clone(),
            user_link2: account.links[1].clone(),
            user_link3: account.links[2].clone(),
        })
    }

    async fn public_profile(&self, user_id: &str) -> Result<PublicProfile, BackendError> {
        let state = self.enter(
            Endpoint::PublicProfile,
            format!("GET /users/public-profile/{}", user_id),
        )?;
        Ok(state
            .accounts
            .get(user_id)
            .map(|account| PublicProfile {
                artist_name: account.artist_name.clone(),
                bio: account.bio.clone(),
                user_avatar: account.avatar.clone(),
                user_link1: account.links[0].clone(),
                user_link2: account.links[1].clone(),
                user_link3: account.links[2].clone(),
            })
            .unwrap_or_default())
    }

    async fn pix_payload(&self, request: &PixRequest) -> Result<PixResponse, BackendError> {
        let state = self.enter(Endpoint::Pix, "POST /pix/generate".into())?;
        let account = state.accounts.get(&request.user_id).ok_or(BackendError::Status {
            status: 404,
            message: "Usuário não encontrado".to_string(),
        })?;

        let payload = match (&account.pix_payload, &account.pix) {
            (Some(payload), _) => payload.clone(),
            (None, Some(pix)) => format!(
                "BR.GOV.BCB.PIX|{}|{:.2}|{}|{}",
                pix.pix_key, request.value, pix.pix_name, pix.pix_city
            ),
            (None, None) => {
                return Err(BackendError::Status {
                    status: 404,
                    message: "Este artista ainda não cadastrou uma chave PIX".to_string(),
                })
            }
        };
        Ok(PixResponse { payload })
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<(), BackendError> {
        self.edit(SettingsField::Profile, "PATCH /users/profile".into(), token, |account| {
            if account.password != update.password {
                return Err(BackendError::Status {
                    status: 401,
                    message: "Senha atual incorreta".to_string(),
                });
            }
            if let Some(name) = &update.user_name {
                account.user_name = name.clone();
            }
            if let Some(mail) = &update.user_mail {
                account.user_mail = mail.clone();
            }
            if let Some(password) = &update.user_password {
                account.password = password.clone();
            }
            Ok(())
        })
    }

    async fn update_artist_name(
        &self,
        token: &str,
        update: &ArtistNameUpdate,
    ) -> Result<(), BackendError> {
        self.edit(SettingsField::ArtistName, "PATCH /users/artist-name".into(), token, |account| {
            account.artist_name = Some(update.artist_name.clone());
            Ok(())
        })
    }

    async fn update_bio(&self, token: &str, update: &BioUpdate) -> Result<(), BackendError> {
        self.edit(SettingsField::Bio, "PATCH /users/bio".into(), token, |account| {
            account.bio = Some(update.bio.clone());
            Ok(())
        })
    }

    async fn update_avatar(&self, token: &str, update: &AvatarUpdate) -> Result<(), BackendError> {
        self.edit(SettingsField::Avatar, "PATCH /users/update-avatar".into(), token, |account| {
            account.avatar = Some(update.avatar_url.clone());
            Ok(())
        })
    }

    async fn update_link(
        &self,
        token: &str,
        link: SocialLink,
        update: &LinkUpdate,
    ) -> Result<(), BackendError> {
        let request = format!("PATCH /users/link/{}", link.slot());
        self.edit(SettingsField::Link(link), request, token, |account| {
            account.links[usize::from(link.slot()) - 1] = Some(update.link.clone());
            Ok(())
        })
    }

    async fn save_pix(&self, token: &str, request: &SavePixRequest) -> Result<(), BackendError> {
        self.edit(SettingsField::Pix, "POST /pix/save-pix".into(), token, |account| {
            account.pix = Some(request.clone());
            Ok(())
        })
    }

    async fn delete_account(&self, token: &str, credentials: &Credentials) -> Result<(), BackendError> {
        let mut state = self.enter(Endpoint::DeleteAccount, "DELETE /users/delete-user".into())?;
        let account = Self::authorize(&mut state, token)?;
        if account.user_mail != credentials.user_mail || account.password != credentials.user_password {
            return Err(BackendError::Status {
                status: 401,
                message: "Email ou senha incorretos".to_string(),
            });
        }
        let user_id = account.user_id.clone();
        state.accounts.remove(&user_id);
        state.tokens.retain(|_, id| *id != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_validation_messages() {
        let backend = MemoryBackend::new();
        let err = backend
            .register(&RegisterRequest {
                user_name: "".into(),
                user_mail: "sem-arroba".into(),
                user_password: "123".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("userMail must be an email"));
    }

    #[tokio::test]
    async fn test_delete_account_revokes_tokens() {
        let backend = MemoryBackend::new();
        let id = backend.add_account("rita", "rita@tipme.dev", "segredo123");
        let login = backend
            .login(&Credentials::new("rita@tipme.dev", "segredo123"))
            .await
            .unwrap();
        let token = login.bearer().unwrap().to_string();

        let wrong = Credentials::new("rita@tipme.dev", "errada");
        assert!(backend.delete_account(&token, &wrong).await.is_err());
        assert!(backend.account(&id).is_some());

        let right = Credentials::new("rita@tipme.dev", "segredo123");
        backend.delete_account(&token, &right).await.unwrap();
        assert!(backend.account(&id).is_none());
        assert_eq!(backend.account_info(&token).await.unwrap_err().status(), Some(401));
    }

    #[tokio::test]
    async fn test_unknown_profile_is_empty() {
        let backend = MemoryBackend::new();
        let profile = backend.public_profile("999").await.unwrap();
        assert!(!profile.is_configured());
        assert_eq!(backend.requests(), vec!["GET /users/public-profile/999".to_string()]);
    }
}
