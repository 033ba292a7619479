//! Link listing controller.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::api::client::ShortyApi;
use crate::application::ordering::{CompletionPolicy, SequencedState};
use crate::domain::RequestState;
use crate::domain::entities::LinkSummary;
use crate::error::ClientError;

/// Coarse phase of the listing, as a renderer would branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinksPhase {
    NeverLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Listing state.
///
/// `links` is `None` until the first successful load and is only ever replaced
/// wholesale by a later success. A failed refresh leaves it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinksState {
    pub links: Option<Vec<LinkSummary>>,
    pub request: RequestState<()>,
}

impl LinksState {
    /// The last successfully loaded listing, in server order.
    pub fn links(&self) -> &[LinkSummary] {
        self.links.as_deref().unwrap_or_default()
    }

    /// Whether a load has ever succeeded. An empty listing still counts.
    pub fn loaded_once(&self) -> bool {
        self.links.is_some()
    }

    pub fn find(&self, code: &str) -> Option<&LinkSummary> {
        self.links().iter().find(|link| link.code == code)
    }

    pub fn error(&self) -> Option<&str> {
        self.request.error()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn phase(&self) -> LinksPhase {
        match self.request {
            RequestState::Loading => LinksPhase::Loading,
            RequestState::Failed(_) => LinksPhase::Failed,
            RequestState::Succeeded(()) => LinksPhase::Loaded,
            RequestState::Idle if self.loaded_once() => LinksPhase::Loaded,
            RequestState::Idle => LinksPhase::NeverLoaded,
        }
    }
}

/// Owns the link listing and its load state.
pub struct LinksController<A: ShortyApi + ?Sized> {
    api: Arc<A>,
    state: SequencedState<LinksState>,
}

impl<A: ShortyApi + ?Sized> LinksController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_policy(api, CompletionPolicy::default())
    }

    pub fn with_policy(api: Arc<A>, policy: CompletionPolicy) -> Self {
        Self {
            api,
            state: SequencedState::new(LinksState::default(), policy),
        }
    }

    pub fn state(&self) -> LinksState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<LinksState> {
        self.state.subscribe()
    }

    /// Fetches the listing and replaces the stored one on success.
    ///
    /// Safe to call repeatedly; each call runs independently and its completion
    /// is applied according to the controller's [`CompletionPolicy`].
    ///
    /// # Errors
    ///
    /// Returns the API error after recording its message in state. Links loaded
    /// by an earlier call stay readable.
    pub async fn load(&self) -> Result<(), ClientError> {
        let ticket = self.state.begin(|s| s.request = RequestState::Loading);
        debug!(seq = ticket.seq(), "Loading link listing");

        match self.api.list_links().await {
            Ok(links) => {
                let count = links.len();
                let applied = self.state.complete(ticket, |s| {
                    s.links = Some(links);
                    s.request = RequestState::Succeeded(());
                });
                if applied {
                    debug!(seq = ticket.seq(), count, "Link listing loaded");
                } else {
                    debug!(seq = ticket.seq(), "Discarding stale link listing");
                }
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                let applied = self
                    .state
                    .complete(ticket, |s| s.request = RequestState::Failed(message));
                if !applied {
                    debug!(seq = ticket.seq(), "Discarding stale listing failure");
                }
                Err(e)
            }
        }
    }
}
