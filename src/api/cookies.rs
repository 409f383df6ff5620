//! Cookie-header parsing.

/// Extracts the value of a named cookie from a `Cookie` header string.
///
/// Returns `None` when the cookie is absent. Percent-decoding is not
/// attempted; CSRF tokens are plain alphanumerics.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if key == name { Some(value.to_string()) } else { None }
    })
}
