//! Input path handling.

/// Normalizes a caller-supplied path before opening it.
///
/// Backslash separators become forward slashes and a `file://` scheme is
/// stripped.
///
/// # Examples
///
/// ```
/// use rf_reader_ndjson::normalize_path;
///
/// assert_eq!(normalize_path("data\\All_Beauty.jsonl"), "data/All_Beauty.jsonl");
/// assert_eq!(normalize_path("file:///tmp/meta.jsonl"), "/tmp/meta.jsonl");
/// ```
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix("file://") {
        Some(stripped) => stripped.to_string(),
        None => path,
    }
}
