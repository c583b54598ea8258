use facemood_core::constants::MAX_FILENAME_LENGTH;

/// Reduce an untrusted filename to a safe single path component.
///
/// Path separators become spaces, whitespace runs collapse to `_`, and only
/// ASCII alphanumerics plus `.`, `-`, `_` survive. Leading and trailing `.`
/// and `_` are stripped so the result can never be `..` or a dotfile.
/// Returns an empty string when nothing usable remains.
pub fn sanitize_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');

    // ASCII only at this point, so byte slicing is char-safe.
    let capped = &trimmed[..trimmed.len().min(MAX_FILENAME_LENGTH)];
    capped.to_string()
}
