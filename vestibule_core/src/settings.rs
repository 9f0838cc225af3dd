use serde::{Deserialize, Serialize};

/// Endpoints must live under this prefix (or be empty, meaning unset).
/// The backend is a Google Apps Script web app; anything else is a typo or
/// worse.
pub const TRUSTED_ENDPOINT_PREFIX: &str = "https://script.google.com/";

/// Everything the user can configure, persisted as one JSON file in the
/// data directory. Unknown or missing fields fall back to defaults so old
/// settings files keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where to POST submissions. Empty means not configured yet.
    pub endpoint_url: String,

    /// Digest passwords before sending instead of sending plaintext.
    pub enable_encryption: bool,

    /// Allow "remember me" to store the login email locally.
    pub save_credentials: bool,

    /// Email remembered from the last successful login, if any.
    pub saved_email: Option<String>,

    /// Color scheme for the UI.
    pub theme: Theme,
}

impl Settings {
    /// The configured endpoint, or `None` when unset.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        if self.endpoint_url.is_empty() {
            None
        } else {
            Some(&self.endpoint_url)
        }
    }

    /// Set the endpoint URL. Rejects anything that is neither empty nor
    /// under [`TRUSTED_ENDPOINT_PREFIX`], leaving the current value
    /// untouched.
    ///
    /// ## Errors
    ///
    /// `SettingsError::UntrustedEndpoint` if the URL fails the prefix
    /// check.
    pub fn set_endpoint_url(&mut self, url: &str) -> Result<(), SettingsError> {
        let url = url.trim();

        if url.is_empty() || url.starts_with(TRUSTED_ENDPOINT_PREFIX) {
            self.endpoint_url = url.to_owned();
            Ok(())
        } else {
            Err(SettingsError::UntrustedEndpoint)
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            enable_encryption: true,
            save_credentials: true,
            saved_email: None,
            theme: Theme::Light,
        }
    }
}

/// Problems applying settings edits.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The endpoint URL is outside the trusted prefix.
    #[error("endpoint URL must start with {TRUSTED_ENDPOINT_PREFIX}")]
    UntrustedEndpoint,
}

/// The two color schemes the UI supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark text on the terminal's light background.
    #[default]
    Light,

    /// Light text on the terminal's dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
