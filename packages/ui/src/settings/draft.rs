use api::{SessionUser, SettingsUpdate, SocialLink};
use backend::models::ProfileUpdate;

/// Values currently typed into the settings screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsDraft {
    pub artist_name: String,
    pub user_name: String,
    pub bio: String,
    pub instagram: String,
    pub spotify: String,
    pub youtube: String,
    pub pix_key: String,
    pub pix_name: String,
    pub pix_city: String,
    pub user_mail: String,
    pub new_password: String,
    pub current_password: String,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// `Some(new)` when the trimmed value is non-empty and differs from `old`.
fn changed(new: &str, old: &Option<String>) -> Option<String> {
    let new = new.trim();
    (!new.is_empty() && Some(new) != old.as_deref().map(str::trim)).then(|| new.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl SettingsDraft {
    /// Pre-fill from the session. PIX fields and passwords start empty.
    pub fn from_user(user: &SessionUser) -> Self {
        Self {
            artist_name: text(&user.artist_name),
            user_name: text(&user.user_name),
            bio: text(&user.bio),
            instagram: text(&user.link1),
            spotify: text(&user.link2),
            youtube: text(&user.link3),
            user_mail: text(&user.email),
            ..Default::default()
        }
    }

    pub fn link(&self, link: SocialLink) -> &str {
        match link {
            SocialLink::Instagram => &self.instagram,
            SocialLink::Spotify => &self.spotify,
            SocialLink::YouTube => &self.youtube,
        }
    }

    pub fn set_link(&mut self, link: SocialLink, value: String) {
        match link {
            SocialLink::Instagram => self.instagram = value,
            SocialLink::Spotify => self.spotify = value,
            SocialLink::YouTube => self.youtube = value,
        }
    }

    /// Only what differs from `original` is sent. Account fields (username,
    /// email, new password) travel together with the current password.
    pub fn to_update(&self, original: &SessionUser) -> SettingsUpdate {
        let user_name = changed(&self.user_name, &original.user_name);
        let user_mail = changed(&self.user_mail, &original.email);
        let user_password = (!self.new_password.is_empty()).then(|| self.new_password.clone());

        let profile = (user_name.is_some() || user_mail.is_some() || user_password.is_some()).then(|| {
            ProfileUpdate {
                user_name,
                user_mail,
                user_password,
                password: self.current_password.clone(),
            }
        });

        SettingsUpdate {
            profile,
            artist_name: changed(&self.artist_name, &original.artist_name),
            bio: changed(&self.bio, &original.bio),
            instagram: changed(&self.instagram, &original.link1),
            spotify: changed(&self.spotify, &original.link2),
            youtube: changed(&self.youtube, &original.link3),
            pix_key: non_empty(&self.pix_key),
            pix_name: non_empty(&self.pix_name),
            pix_city: non_empty(&self.pix_city),
        }
    }

    /// Forget typed passwords after a submission.
    pub fn clear_secrets(&mut self) {
        self.new_password.clear();
        self.current_password.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::SettingsField;

    fn user() -> SessionUser {
        SessionUser {
            user_id: Some("7".into()),
            email: Some("mel@tipme.dev".into()),
            user_name: Some("mel".into()),
            artist_name: Some("Mel Fuzz".into()),
            bio: Some("Shoegaze".into()),
            link1: Some("https://instagram.com/mel".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_untouched_draft_sends_nothing() {
        let user = user();
        let draft = SettingsDraft::from_user(&user);
        assert!(draft.to_update(&user).is_empty());
    }

    #[test]
    fn test_only_changed_fields_are_sent() {
        let user = user();
        let mut draft = SettingsDraft::from_user(&user);
        draft.bio = "Shoegaze e dream pop".into();
        draft.set_link(SocialLink::YouTube, "https://youtube.com/@mel".into());

        let fields: Vec<SettingsField> = draft
            .to_update(&user)
            .requests()
            .iter()
            .map(|r| r.field())
            .collect();
        assert_eq!(
            fields,
            vec![SettingsField::Bio, SettingsField::Link(SocialLink::YouTube)]
        );
    }

    #[test]
    fn test_account_change_carries_current_password() {
        let user = user();
        let mut draft = SettingsDraft::from_user(&user);
        draft.user_name = "melzinha".into();
        draft.current_password = "segredo123".into();

        let profile = draft.to_update(&user).profile.expect("profile update");
        assert_eq!(profile.user_name.as_deref(), Some("melzinha"));
        assert_eq!(profile.user_mail, None);
        assert_eq!(profile.password, "segredo123");

        draft.clear_secrets();
        assert!(draft.current_password.is_empty());
    }

    #[test]
    fn test_account_change_without_password_fails_validation() {
        let user = user();
        let mut draft = SettingsDraft::from_user(&user);
        draft.new_password = "nova-senha".into();
        assert!(draft.to_update(&user).validate().is_err());
    }
}
