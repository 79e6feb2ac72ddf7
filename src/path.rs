//! Dotted-path key syntax (spec §4.2, §6): `segment(.segment)*`. An empty
//! key denotes the whole container. `.` cannot appear within a single
//! name used for keyed access (names containing it remain storable but
//! unaddressable).

/// Splits a key into its segments. An empty key yields an empty segment
/// list.
pub fn split(key: &str) -> Vec<&str> {
    if key.is_empty() {
        Vec::new()
    } else {
        key.split('.').collect()
    }
}

/// Rejoins segments into a dotted key, the inverse of [`split`].
pub fn join(segments: &[&str]) -> String {
    segments.join(".")
}
