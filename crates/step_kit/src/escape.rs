//! Percent-style escaping for the single-line command syntax.
//!
//! Neither function is idempotent: escaping already-escaped text escapes the
//! `%` signs again. Escape exactly once per write.

/// Escapes a command message body.
pub fn escape_data(s: &str) -> String {
    // `%` first so the sequences introduced below are not re-escaped.
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a property value; also protects the `k=v,k=v` list syntax.
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
