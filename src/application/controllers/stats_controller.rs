//! Per-link analytics controller.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::api::client::ShortyApi;
use crate::application::ordering::{CompletionPolicy, SequencedState};
use crate::domain::RequestState;
use crate::domain::entities::LinkStats;
use crate::error::ClientError;

/// Analytics state.
///
/// `inspected_code` is what the user is looking at and is updated as soon as a
/// load starts. `request_code` is the code the visible `request` outcome belongs
/// to; under [`CompletionPolicy::LastCompleted`] the two can disagree after a
/// slow response for an older code lands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsState {
    pub inspected_code: String,
    pub request_code: Option<String>,
    pub request: RequestState<LinkStats>,
}

impl StatsState {
    pub fn stats(&self) -> Option<&LinkStats> {
        self.request.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.request.error()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }
}

/// Owns the inspected code and its analytics.
pub struct StatsController<A: ShortyApi + ?Sized> {
    api: Arc<A>,
    state: SequencedState<StatsState>,
}

impl<A: ShortyApi + ?Sized> StatsController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_policy(api, CompletionPolicy::default())
    }

    pub fn with_policy(api: Arc<A>, policy: CompletionPolicy) -> Self {
        Self {
            api,
            state: SequencedState::new(StatsState::default(), policy),
        }
    }

    pub fn state(&self) -> StatsState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<StatsState> {
        self.state.subscribe()
    }

    pub fn inspected_code(&self) -> String {
        self.state.read(|s| s.inspected_code.clone())
    }

    /// Records a code as inspected without fetching anything.
    pub fn set_inspected_code(&self, code: &str) {
        let code = code.trim().to_string();
        self.state.modify(|s| s.inspected_code = code);
    }

    /// Loads analytics for `code`.
    ///
    /// A blank code is ignored: no request, no state change. Otherwise the code
    /// becomes the inspected one immediately, before the fetch resolves.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording its message in state.
    pub async fn load(&self, code: &str) -> Result<(), ClientError> {
        let code = code.trim();
        if code.is_empty() {
            debug!("Ignoring stats load for blank code");
            return Ok(());
        }

        let ticket = self.state.begin(|s| {
            s.inspected_code = code.to_string();
            s.request_code = Some(code.to_string());
            s.request = RequestState::Loading;
        });
        debug!(seq = ticket.seq(), code, "Loading stats");

        let result = self.api.get_stats(code).await;
        let outcome = match &result {
            Ok(stats) => RequestState::Succeeded(stats.clone()),
            Err(e) => RequestState::Failed(e.to_string()),
        };

        let applied = self.state.complete(ticket, |s| {
            s.request_code = Some(code.to_string());
            s.request = outcome;
        });
        if !applied {
            debug!(seq = ticket.seq(), code, "Discarding stale stats response");
        }

        result.map(|_| ())
    }
}
