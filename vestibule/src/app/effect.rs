use super::Action;
use crate::config::Config;
use tokio::{fs, io};
use vestibule_core::{submit, Settings};

/// Connections to external services that effects use. We keep these
/// around to have some level of connection sharing for the app as a
/// whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a new `EffectContext`
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Load settings from disk
    LoadSettings,

    /// Save settings to disk
    SaveSettings(Settings),

    /// Send one submission to the configured endpoint
    Submit(submit::Client, submit::Payload),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the
    /// next `Action` the application needs to handle
    pub async fn run(self, context: &EffectContext, config: &Config) -> Option<Action> {
        match self.run_inner(context, config).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(problem.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to
    /// make it more ergonomic to write.
    async fn run_inner(
        self,
        context: &EffectContext,
        config: &Config,
    ) -> Result<Option<Action>, Problem> {
        match self {
            Self::LoadSettings => {
                tracing::debug!("loading settings");

                let store = config.data_dir().join("settings.json");

                if fs::try_exists(&store).await? {
                    let data = fs::read(&store).await?;

                    match serde_json::from_slice(&data) {
                        Ok(settings) => Ok(Some(Action::LoadedSettings(settings))),
                        Err(problem) => {
                            // A corrupt settings file shouldn't wedge the
                            // app; start over with defaults.
                            tracing::warn!(?problem, "could not parse settings, using defaults");

                            Ok(Some(Action::LoadedSettings(Settings::default())))
                        }
                    }
                } else {
                    Ok(Some(Action::LoadedSettings(Settings::default())))
                }
            }

            Self::SaveSettings(settings) => {
                tracing::debug!("saving settings");

                let base = config.data_dir();
                fs::create_dir_all(&base).await?;

                let store = base.join("settings.json");

                let data = serde_json::to_vec(&settings)?;
                fs::write(&store, &data).await?;

                Ok(None)
            }

            Self::Submit(client, payload) => {
                let kind = payload.kind();

                tracing::info!(?kind, "submitting");

                let result = client.submit(&context.http, &payload).await;

                if let Err(error) = &result {
                    // The toast only gets a generic message; the detail
                    // lives here.
                    tracing::error!(%error, ?kind, "submission failed");
                }

                Ok(Some(Action::SubmitFinished(kind, result)))
            }
        }
    }
}

impl Default for EffectContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Problems that can happen while running an `Effect`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We had a problem reading or writing the data directory, for
    /// example with permissions or missing files.
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// We had a problem loading or saving JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
