mod eagle_eye;
mod provider;

pub use eagle_eye::EagleEyeProvider;
pub use provider::OAuthProvider;
