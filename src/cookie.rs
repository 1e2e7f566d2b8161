//! Cookie lookup
//!
//! Reads a single value (typically the CSRF token) out of a `document.cookie` style string.

/// Return the decoded value of the first cookie called `name`.
///
/// Entries are `;`-separated and trimmed. A value that is not valid percent-encoding is
/// returned as-is.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    cookies
        .split(';')
        .map(str::trim)
        .find_map(|entry| entry.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        })
}
