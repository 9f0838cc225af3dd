//! Common code for vestibule clients: input validation, the password
//! strength meter, the wire digest, settings, and the submission client.

/// Hex-encoded password digest sent in place of the plaintext.
pub mod digest;

/// User-editable settings, persisted by the client.
pub mod settings;
pub use settings::Settings;

/// Password strength scoring for the registration form.
pub mod strength;
pub use strength::Strength;

/// Submit credentials to the configured endpoint.
pub mod submit;

/// Field validation for the auth forms.
pub mod validate;
