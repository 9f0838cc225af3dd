use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while submitting credentials
#[derive(Debug, Error)]
pub enum Error {
    /// No endpoint URL has been configured, so there is nowhere to send
    /// the submission. We catch this before touching the network.
    #[error("no endpoint URL is configured")]
    ConfigurationMissing,

    /// We couldn't parse the configured endpoint as a URL.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We encountered an HTTP error, for example if the request never
    /// reached the endpoint or the response body wasn't JSON.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// The message to show the user. Raw error detail goes to the log,
    /// not the screen.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "Please configure the script URL first",
            Self::UrlParse(_) | Self::Http(_) => {
                "Failed to connect to server. Please check your configuration."
            }
        }
    }
}
