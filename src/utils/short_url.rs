//! Display form of short URLs.

/// Builds the "pretty" short URL shown to users.
///
/// The server's `short_url` points at whatever host the API runs on (often a dev
/// tunnel); this builds the public-facing variant from a configured display base.
///
/// - Empty code yields an empty string
/// - With a base: `{base}/{code}` (trailing slashes on the base are dropped)
/// - Without a base: `/{code}`
pub fn pretty_short_url(display_base: Option<&str>, code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    match display_base.map(|b| b.trim_end_matches('/')) {
        Some(base) if !base.is_empty() => format!("{base}/{code}"),
        _ => format!("/{code}"),
    }
}
