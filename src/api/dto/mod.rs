//! Data Transfer Objects for the remote API's JSON bodies.
//!
//! DTOs mirror the server's field names exactly and are converted into
//! [`crate::domain::entities`] right after decoding. A body that does not match
//! its DTO fails with [`crate::error::ClientError::Decode`].

pub mod links;
pub mod shorten;
pub mod stats;

pub use links::LinkItem;
pub use shorten::{ShortenBody, ShortenResponse};
pub use stats::StatsResponse;
