//! Core domain entities representing the client's data model.
//!
//! Every entity is built from a successful decode of an API response (or, for
//! [`ShortenRequest`], from a validated form) and is replaced wholesale by the next
//! fetch of the same kind. Nothing here is persisted.
//!
//! # Entity Types
//!
//! - [`LinkSummary`] - One row of the link listing
//! - [`LinkStats`] - Analytics for one short code
//! - [`ShortenRequest`] / [`ShortenResult`] - Link creation input and output
//! - [`QrImage`] - Inline QR code returned with a creation result

pub mod link;
pub mod shorten;
pub mod stats;

pub use link::LinkSummary;
pub use shorten::{QrImage, ShortenRequest, ShortenResult};
pub use stats::LinkStats;
