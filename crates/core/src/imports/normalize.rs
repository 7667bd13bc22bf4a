use std::sync::LazyLock;

use regex::Regex;

static LIBRARY_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_]+").expect("library word pattern is valid"));

/// Reduce an imported library name to its first run of word characters.
///
/// `libfoo.so.2` becomes `libfoo`, which is what the relaxed index query is
/// issued with. Input without word characters yields an empty string.
pub fn normalize_library_name(name: &str) -> &str {
    LIBRARY_WORD.find(name).map(|m| m.as_str()).unwrap_or("")
}
