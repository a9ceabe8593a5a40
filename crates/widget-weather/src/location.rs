//! Location name canonicalisation shared by the cache key and the upstream query.

pub const CACHE_KEY_PREFIX: &str = "weather:";

/// Trim surrounding whitespace and lower-case.
pub fn normalize_location(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn cache_key(normalized: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, normalized)
}
