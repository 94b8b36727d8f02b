mod landing;
pub use landing::Landing;

mod register;
pub use register::Register;

mod home;
pub use home::Home;

mod profile;
pub use profile::Profile;

mod settings;
pub use settings::Settings;
