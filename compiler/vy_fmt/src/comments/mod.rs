//! Comment text normalization.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::strings::literal_regex;

static MISSING_SPACE: LazyLock<Regex> = LazyLock::new(|| literal_regex(r"^#(\w)"));

static VERSION_PRAGMA: LazyLock<Regex> = LazyLock::new(|| {
    literal_regex(r"^#\s*(?:@version|pragma\s+version)\s*[\^~=><!]*\s*(?:\d\.?)*$")
});

/// Put a space between `#` and the first word character: `#x` -> `# x`.
///
/// Shebang-like `#!` and already spaced comments are left alone.
pub fn normalize_comment(value: &str) -> Cow<'_, str> {
    MISSING_SPACE.replace(value, "# ${1}")
}

/// True for a version pragma such as `# @version ^0.3.9` or
/// `# pragma version 0.4.0`.
pub fn is_pragma(value: &str) -> bool {
    VERSION_PRAGMA.is_match(value.trim())
}
