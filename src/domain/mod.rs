//! Domain layer: the data the client shows and the request lifecycle around it.
//!
//! # Architecture
//!
//! - [`entities`] - Typed records decoded from API responses
//! - [`request_state`] - Generic per-controller request lifecycle
//!
//! # Design Principles
//!
//! - No dependency on the HTTP client or the controllers
//! - Wire formats live in [`crate::api::dto`]; entities are converted from them
//!   after decoding, never deserialized directly

pub mod entities;
pub mod request_state;

pub use request_state::RequestState;
