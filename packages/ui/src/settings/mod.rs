//! Settings screen building blocks.
//!
//! Every form section edits one shared [`SettingsDraft`]; the settings view
//! turns it into a single batched update. The avatar picker and account
//! deletion submit on their own.

mod draft;
pub use draft::SettingsDraft;

mod profile_info;
pub use profile_info::ProfileInfoForm;

mod social_links;
pub use social_links::SocialLinksForm;

mod pix_key;
pub use pix_key::PixKeyForm;

mod account;
pub use account::AccountForm;

mod avatar_picker;
pub use avatar_picker::{check_avatar_choice, AvatarPicker, AVATARS};

mod delete_account;
pub use delete_account::DeleteAccountForm;
