//! # Shorty Client
//!
//! Client core for a URL shortening service: create short links, browse the
//! link listing and inspect per-link analytics served by a remote HTTP API.
//!
//! ## Architecture
//!
//! The crate keeps the same layer separation the server side uses:
//!
//! - **Domain Layer** ([`domain`]) - Entities and the per-controller request state
//! - **API Layer** ([`api`]) - The [`api::ShortyApi`] seam, its HTTP implementation and wire DTOs
//! - **Application Layer** ([`application`]) - Shorten, Links and Stats controllers plus the orchestrator
//! - **Utilities** ([`utils`]) - Input validation and display formatting
//!
//! ## Quick Start
//!
//! ```no_run
//! use shorty_client::prelude::*;
//!
//! # async fn run() -> Result<(), ClientError> {
//! let state = AppState::from_config(Config::default())?;
//! let app = &state.orchestrator;
//!
//! app.start().await?;
//! app.shorten().edit_form(|form| form.url = "https://example.com/a".to_string());
//! let created = app.submit_shorten().await?;
//! println!("{}", created.result().short_url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Client configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod state;
pub mod utils;

pub mod config;

pub use error::ClientError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::{HttpApiClient, ShortyApi};
    pub use crate::application::controllers::{
        LinksController, LinksPhase, LinksState, ShortenController, ShortenForm, ShortenState,
        StatsController, StatsState, Submission,
    };
    pub use crate::application::{CompletionPolicy, Orchestrator};
    pub use crate::config::Config;
    pub use crate::domain::RequestState;
    pub use crate::domain::entities::{LinkStats, LinkSummary, QrImage, ShortenRequest, ShortenResult};
    pub use crate::error::ClientError;
    pub use crate::state::AppState;
}
