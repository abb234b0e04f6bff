// Marker lines: prose lines outside fences that name the file the next block belongs to

use regex::Regex;
use std::sync::LazyLock;

use super::paths::{first_path_token, is_path_like, strip_wrapping};

// "FILE: x", "file: x", "=== file: x ===", "檔案：x", "文件: x", "Filename: x"
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])(?:file(?:name|path)?|檔案|文件)\s*[:：]\s*(.+)$").unwrap()
});
static LIST_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+•]\s+|\d+[.)]\s+)").unwrap());

/// Path named by a marker line, if the line is one
pub fn parse_marker_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("```") {
        return None;
    }

    if let Some(caps) = LABEL_RE.captures(trimmed) {
        if let Some(path) = caps.get(1).and_then(|rest| first_path_token(rest.as_str())) {
            return Some(path);
        }
    }

    if trimmed.starts_with('#') {
        return heading_path(trimmed.trim_start_matches('#'));
    }

    bare_path(trimmed)
}

/// Path named by a heading such as `### backend/main.py`
///
/// In a multi-word heading the path must be set off with backticks or bold,
/// or carry a directory; "Using Node.js" is a title, not a file.
fn heading_path(text: &str) -> Option<String> {
    let text = text.trim();
    let text = match LIST_PREFIX_RE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let single_token = text.split_whitespace().count() == 1;

    text.split_whitespace().find_map(|token| {
        let path = strip_wrapping(token);
        let set_off = single_token
            || token.starts_with('`')
            || token.starts_with("**")
            || path.contains(['/', '\\']);
        (set_off && is_path_like(path)).then(|| path.to_string())
    })
}

/// A line holding nothing but a (possibly bulleted, backticked or bold) path
fn bare_path(line: &str) -> Option<String> {
    let line = match LIST_PREFIX_RE.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    };

    if looks_like_code(line) {
        return None;
    }
    let candidate = strip_wrapping(line);
    is_path_like(candidate).then(|| candidate.to_string())
}

// `foo.bar()` or `obj.method` style text is code, not a file name
fn looks_like_code(token: &str) -> bool {
    token.contains('(') || token.contains('=') || token.ends_with(';')
}
