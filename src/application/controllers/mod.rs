//! Resource controllers.
//!
//! Each controller owns one resource's request state behind its own lock and
//! never calls a sibling; cross-controller effects live in the orchestrator.
//!
//! # Available Controllers
//!
//! - [`shorten_controller::ShortenController`] - Create-link form and result
//! - [`links_controller::LinksController`] - Link listing
//! - [`stats_controller::StatsController`] - Per-link analytics

pub mod links_controller;
pub mod shorten_controller;
pub mod stats_controller;

pub use links_controller::{LinksController, LinksPhase, LinksState};
pub use shorten_controller::{ShortenController, ShortenForm, ShortenState, Submission};
pub use stats_controller::{StatsController, StatsState};
