//! File extension rule.

/// Extension of the last path segment, if it has one.
fn extension(value: &str) -> Option<&str> {
    let file_name = value.rsplit(['/', '\\']).next().unwrap_or(value).trim();
    let (stem, ext) = file_name.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then_some(ext)
}

/// Normalized entries of a comma/whitespace separated allow-list.
fn allowed(list: &str) -> impl Iterator<Item = &str> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .map(|entry| entry.trim_start_matches('.'))
        .filter(|entry| !entry.is_empty())
}

crate::rule! {
    /// File name extension must appear in the allow-list (case-insensitive).
    ///
    /// The list is separated by commas or whitespace; leading dots are
    /// ignored, so `".jpg, PNG gif"` allows `photo.JPG`.
    pub AcceptFiles = "acceptFiles", param Text;
    check(value, list: &str) {
        extension(value).is_some_and(|ext| allowed(list).any(|a| a.eq_ignore_ascii_case(ext)))
    }
}
