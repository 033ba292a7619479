//! Utility functions for input validation and display formatting.
//!
//! - [`url_validator`] - Long URL validation
//! - [`dates`] - Expiry parsing and local timestamp formatting
//! - [`short_url`] - User-facing short URL rendering

pub mod dates;
pub mod short_url;
pub mod url_validator;
