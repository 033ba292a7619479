//! Link creation controller.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};
use validator::Validate;

use crate::api::client::ShortyApi;
use crate::application::ordering::{CompletionPolicy, SequencedState};
use crate::domain::RequestState;
use crate::domain::entities::{ShortenRequest, ShortenResult};
use crate::error::ClientError;
use crate::utils::dates::parse_expiry;

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenForm {
    pub url: String,
    pub custom_code: String,
    pub want_qr: bool,
    /// Expiry as typed: RFC 3339, or local `YYYY-MM-DDTHH:MM`. Blank means none.
    pub expires_at: String,
}

impl Default for ShortenForm {
    fn default() -> Self {
        Self {
            url: String::new(),
            custom_code: String::new(),
            want_qr: true,
            expires_at: String::new(),
        }
    }
}

impl ShortenForm {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Builds a validated request. Blank optional fields are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a bad long URL, custom code or
    /// expiry text.
    pub fn to_request(&self) -> Result<ShortenRequest, ClientError> {
        let custom_code = Some(self.custom_code.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let mut request = ShortenRequest {
            url: self.url.trim().to_string(),
            custom_code,
            want_qr: self.want_qr,
            expires_at: None,
        };
        request.validate()?;
        request.expires_at = parse_expiry(&self.expires_at)?;

        Ok(request)
    }
}

/// Form plus the outcome of the latest applied submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortenState {
    pub form: ShortenForm,
    pub request: RequestState<ShortenResult>,
}

impl ShortenState {
    pub fn result(&self) -> Option<&ShortenResult> {
        self.request.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.request.error()
    }

    pub fn is_submitting(&self) -> bool {
        self.request.is_loading()
    }
}

/// A creation the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The result is now the controller's visible state.
    Applied(ShortenResult),
    /// A later submission or a clear was issued first; state was left alone.
    Superseded(ShortenResult),
}

impl Submission {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn result(&self) -> &ShortenResult {
        match self {
            Self::Applied(created) | Self::Superseded(created) => created,
        }
    }

    pub fn into_result(self) -> ShortenResult {
        match self {
            Self::Applied(created) | Self::Superseded(created) => created,
        }
    }
}

/// Owns the create-link form and the latest creation result.
pub struct ShortenController<A: ShortyApi + ?Sized> {
    api: Arc<A>,
    state: SequencedState<ShortenState>,
}

impl<A: ShortyApi + ?Sized> ShortenController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_policy(api, CompletionPolicy::default())
    }

    pub fn with_policy(api: Arc<A>, policy: CompletionPolicy) -> Self {
        Self {
            api,
            state: SequencedState::new(ShortenState::default(), policy),
        }
    }

    pub fn state(&self) -> ShortenState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ShortenState> {
        self.state.subscribe()
    }

    pub fn form(&self) -> ShortenForm {
        self.state.read(|s| s.form.clone())
    }

    /// Edits form fields in place. Result and error are left as they are.
    pub fn edit_form(&self, f: impl FnOnce(&mut ShortenForm)) {
        self.state.modify(|s| f(&mut s.form));
    }

    pub fn set_form(&self, form: ShortenForm) {
        self.edit_form(|current| *current = form);
    }

    /// Submits the current form.
    ///
    /// Allowed in any state; starting a submission clears the previous result
    /// and error. Form fields survive a failure so the user can resubmit.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without touching state or the network
    /// when the form is invalid. API failures are recorded in state and returned.
    /// A success that arrives after a newer submission or a clear is returned as
    /// [`Submission::Superseded`] when the policy discards it.
    pub async fn submit(&self) -> Result<Submission, ClientError> {
        let request = self.state.read(|s| s.form.to_request()).inspect_err(|e| {
            debug!(error = %e, "Shorten form rejected");
        })?;

        let ticket = self.state.begin(|s| s.request = RequestState::Loading);
        debug!(seq = ticket.seq(), url = %request.url, "Submitting shorten request");

        let result = self.api.create_short_link(&request).await;
        let outcome = match &result {
            Ok(created) => RequestState::Succeeded(created.clone()),
            Err(e) => RequestState::Failed(e.to_string()),
        };

        let applied = self.state.complete(ticket, |s| s.request = outcome);
        if !applied {
            debug!(seq = ticket.seq(), "Discarding stale shorten response");
        }

        let created = result?;
        if applied {
            info!(code = %created.code, "Short link created");
            Ok(Submission::Applied(created))
        } else {
            Ok(Submission::Superseded(created))
        }
    }

    /// Resets the form and clears any result or error.
    ///
    /// Under [`CompletionPolicy::LatestIssued`] an in-flight submission can no
    /// longer repopulate the cleared state.
    pub fn clear(&self) {
        let ticket = self.state.begin(|s| *s = ShortenState::default());
        debug!(seq = ticket.seq(), "Shorten form cleared");
    }
}
