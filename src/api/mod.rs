//! API Client layer for the remote shortener service.
//!
//! This layer performs one HTTP call per operation and translates wire formats
//! into domain entities. It holds no local state.
//!
//! # Modules
//!
//! - [`client`] - The [`client::ShortyApi`] seam and its reqwest implementation
//! - [`dto`] - Wire request/response shapes

pub mod client;
pub mod dto;

pub use client::{HttpApiClient, ShortyApi};
