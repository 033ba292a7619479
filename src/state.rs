use std::sync::Arc;

use crate::api::client::HttpApiClient;
use crate::application::Orchestrator;
use crate::config::Config;
use crate::error::ClientError;

/// One client session: configuration plus the controllers wired to a live API.
pub struct AppState {
    pub config: Config,
    pub orchestrator: Orchestrator<HttpApiClient>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP client cannot be built from `config`.
    pub fn from_config(config: Config) -> Result<Self, ClientError> {
        let api = Arc::new(HttpApiClient::from_config(&config)?);
        let orchestrator = Orchestrator::with_policy(api, config.response_ordering);

        Ok(Self {
            config,
            orchestrator,
        })
    }

    /// Short URL as shown to the user, honouring `SHORTY_DISPLAY_URL`.
    pub fn display_short_url(&self, code: &str) -> String {
        crate::utils::short_url::pretty_short_url(self.config.display_url.as_deref(), code)
    }
}
