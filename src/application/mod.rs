//! Application layer: resource controllers and their orchestration.
//!
//! Controllers consume the [`crate::api::client::ShortyApi`] trait and own the
//! request state a front end renders. The orchestrator wires the effects that
//! cross controller boundaries.
//!
//! # Components
//!
//! - [`controllers::ShortenController`] - Create-link form and latest result
//! - [`controllers::LinksController`] - Full link listing
//! - [`controllers::StatsController`] - Analytics for the inspected code
//! - [`orchestrator::Orchestrator`] - Cross-controller effects
//! - [`ordering`] - How overlapping requests resolve

pub mod controllers;
pub mod orchestrator;
pub mod ordering;

#[cfg(test)]
pub(crate) mod test_support;

pub use orchestrator::Orchestrator;
pub use ordering::CompletionPolicy;
