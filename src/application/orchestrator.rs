//! Cross-controller wiring.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::client::ShortyApi;
use crate::application::controllers::{
    LinksController, ShortenController, StatsController, Submission,
};
use crate::application::ordering::CompletionPolicy;
use crate::error::ClientError;

/// Composes the three controllers and sequences their follow-up effects.
///
/// Holds no state of its own. Controllers are reachable for reads and form
/// edits; every flow that spans controllers goes through a method here.
pub struct Orchestrator<A: ShortyApi + ?Sized> {
    shorten: ShortenController<A>,
    links: LinksController<A>,
    stats: StatsController<A>,
}

impl<A: ShortyApi + ?Sized> Orchestrator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_policy(api, CompletionPolicy::default())
    }

    pub fn with_policy(api: Arc<A>, policy: CompletionPolicy) -> Self {
        Self {
            shorten: ShortenController::with_policy(api.clone(), policy),
            links: LinksController::with_policy(api.clone(), policy),
            stats: StatsController::with_policy(api, policy),
        }
    }

    pub fn shorten(&self) -> &ShortenController<A> {
        &self.shorten
    }

    pub fn links(&self) -> &LinksController<A> {
        &self.links
    }

    pub fn stats(&self) -> &StatsController<A> {
        &self.stats
    }

    /// Initial listing load.
    ///
    /// # Errors
    ///
    /// Returns the listing error; it is also recorded in the links state.
    pub async fn start(&self) -> Result<(), ClientError> {
        self.links.load().await
    }

    /// Submits the shorten form and, on success, points the stats view at the
    /// new code and refreshes the listing.
    ///
    /// A [`Submission::Superseded`] creation leaves the other views alone.
    ///
    /// # Errors
    ///
    /// Only the creation's own error is returned. A failed listing refresh is
    /// logged and left in the links state.
    pub async fn submit_shorten(&self) -> Result<Submission, ClientError> {
        let submission = self.shorten.submit().await?;
        let Submission::Applied(created) = &submission else {
            debug!(code = %submission.result().code, "Superseded creation, views unchanged");
            return Ok(submission);
        };

        self.stats.set_inspected_code(&created.code);
        if let Err(e) = self.links.load().await {
            warn!(code = %created.code, error = %e, "Listing refresh after creation failed");
        }

        Ok(submission)
    }

    /// Loads stats for a link selected from the listing.
    ///
    /// # Errors
    ///
    /// Returns the stats error; it is also recorded in the stats state.
    pub async fn select_link(&self, code: &str) -> Result<(), ClientError> {
        debug!(code, "Link selected");
        self.stats.load(code).await
    }

    /// Loads stats for the row at `index` of the current listing snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if there is no such row, otherwise
    /// see [`Orchestrator::select_link`].
    pub async fn select_row(&self, index: usize) -> Result<(), ClientError> {
        let code = self
            .links
            .state()
            .links()
            .get(index)
            .map(|link| link.code.clone())
            .ok_or_else(|| ClientError::validation("row", format!("No link at row {index}")))?;

        self.select_link(&code).await
    }

    /// Loads stats for a code typed by the user. Blank input is ignored.
    ///
    /// # Errors
    ///
    /// See [`StatsController::load`].
    pub async fn inspect(&self, code: &str) -> Result<(), ClientError> {
        self.stats.load(code).await
    }

    /// # Errors
    ///
    /// See [`LinksController::load`].
    pub async fn refresh_links(&self) -> Result<(), ClientError> {
        self.links.load().await
    }

    pub fn clear_shorten(&self) {
        self.shorten.clear();
    }

    /// The code currently inspected in the stats view, if any.
    pub fn active_code(&self) -> Option<String> {
        Some(self.stats.inspected_code()).filter(|code| !code.is_empty())
    }
}
