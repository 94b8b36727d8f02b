mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod login;
pub use login::LoginView;

mod register;
pub use register::RegisterView;

mod home;
pub use home::HomeView;

mod profile;
pub use profile::ProfileView;

mod settings;
pub use settings::SettingsView;
