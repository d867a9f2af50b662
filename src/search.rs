//! Case-insensitive substring search over the canonical list.
//!
//! The query is trimmed and lowercased once; an empty query is the identity.
//! The result keeps canonical order, so the working list is always an
//! order-preserving subsequence of the canonical one.

/// Trim and lowercase a raw search input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derive the working list from the canonical list and a raw query.
pub fn filter(canonical: &[String], raw_query: &str) -> Vec<String> {
    let query = normalize_query(raw_query);
    if query.is_empty() {
        return canonical.to_vec();
    }
    canonical
        .iter()
        .filter(|name| name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
