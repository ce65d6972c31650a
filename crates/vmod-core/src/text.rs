//! String predicates used to validate schema key names.

/// True if `s` is non-empty and consists only of ASCII letters, digits
/// and the underscore (`_`).
pub fn is_alphanumeric_inc_underscore(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
