use super::error::{self, Error};
use super::{Payload, Resp};
use crate::Settings;
use url::Url;

/// Client for the submission endpoint. The endpoint is a single URL that
/// dispatches on the payload's `action` tag, so there are no per-operation
/// paths to join.
#[derive(Debug, Clone)]
pub struct Client {
    /// Where to POST, if configured.
    endpoint: Option<String>,
}

impl Client {
    /// Construct a client for an explicit endpoint.
    #[must_use]
    pub fn new(endpoint: Option<String>) -> Self {
        Self { endpoint }
    }

    /// Construct a client from the current settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.endpoint().map(ToOwned::to_owned))
    }

    /// Send one submission and interpret the reply. Fire-once: no
    /// retries, no timeout, no backoff.
    ///
    /// ## Errors
    ///
    /// - `Error::ConfigurationMissing` if no endpoint is set. Returned
    ///   before any network I/O happens.
    /// - `Error::UrlParse` if the configured endpoint isn't a URL.
    /// - `Error::Http` if the request failed or the response body wasn't
    ///   the expected JSON.
    pub async fn submit(&self, http: &reqwest::Client, payload: &Payload) -> error::Result<Resp> {
        let endpoint = self.endpoint.as_deref().ok_or(Error::ConfigurationMissing)?;

        let url = Url::parse(endpoint)?;

        let resp = http.post(url).json(payload).send().await?;

        // The script replies 200 even for rejected credentials and puts
        // the verdict in the body, so the body is all we look at.
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::submit::login;

    fn login_payload() -> Payload {
        Payload::Login(login::Req {
            email: "a@b.com".to_owned(),
            password: "hunter2".to_owned(),
        })
    }

    #[tokio::test]
    async fn unconfigured_fails_without_network() {
        let client = Client::new(None);
        let http = reqwest::Client::new();

        let result = client.submit(&http, &login_payload()).await;

        assert!(matches!(result, Err(Error::ConfigurationMissing)));
    }

    #[tokio::test]
    async fn bad_endpoint_fails_without_network() {
        let client = Client::new(Some("not a url".to_owned()));
        let http = reqwest::Client::new();

        let result = client.submit(&http, &login_payload()).await;

        assert!(matches!(result, Err(Error::UrlParse(_))));
    }

    #[test]
    fn from_settings_respects_unset_endpoint() {
        let client = Client::from_settings(&Settings::default());

        assert_eq!(client.endpoint, None);
    }
}
