//! Path sanitization for extracted files
//!
//! Every path leaving the extractor is relative, slash-separated and free of
//! `.`/`..` segments, so joining it under an output root cannot escape it.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static LABEL_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:file(?:name|path)?|path|檔案|文件)\s*[:：]\s*").unwrap()
});
static LIST_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());
static BULLET_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+•]\s+").unwrap());

/// File names that are complete without an extension
const EXTENSIONLESS_NAMES: &[&str] = &[
    "Dockerfile",
    "Makefile",
    "Procfile",
    "LICENSE",
    "Gemfile",
    ".gitignore",
    ".dockerignore",
    ".env",
];

const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path")]
    Empty,

    #[error("path contains whitespace: {0:?}")]
    Whitespace(String),

    #[error("path contains forbidden character {0:?}: {1:?}")]
    ForbiddenCharacter(char, String),
}

/// Strip wrapping quotes, backticks and emphasis from a token
pub fn strip_wrapping(token: &str) -> &str {
    let mut token = token.trim();
    loop {
        let next = token
            .trim_matches(|c: char| matches!(c, '`' | '"' | '\'' | '*' | '(' | ')' | '[' | ']' | ','))
            .trim_end_matches(['.', ':', '：', ';']);
        if next.len() == token.len() {
            return token;
        }
        token = next;
    }
}

/// Does `token` look like a file name or a relative path?
pub fn is_path_like(token: &str) -> bool {
    if token.is_empty()
        || token.contains(char::is_whitespace)
        || token.contains("://")
        || token.contains(|c: char| FORBIDDEN_CHARS.contains(&c))
    {
        return false;
    }

    let name = token.replace('\\', "/");
    let file_name = match name.rsplit('/').next() {
        Some(file_name) if !file_name.is_empty() => file_name,
        _ => return false,
    };

    if EXTENSIONLESS_NAMES.contains(&file_name) {
        return true;
    }

    match file_name.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && !stem.chars().all(|c| c.is_ascii_digit() || c == '.')
                && (1..=10).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
                && ext.chars().any(|c| c.is_ascii_alphabetic())
        }
        // A bare word only counts when it sits inside a directory
        None => name.contains('/') && file_name.chars().any(|c| c.is_alphanumeric()),
    }
}

/// First path-like token in a line of prose
pub fn first_path_token(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(strip_wrapping)
        .find(|token| is_path_like(token))
        .map(str::to_string)
}

/// Clean a marker- or hint-supplied path into its canonical relative form
pub fn normalize_path(raw: &str) -> Result<String, PathError> {
    let mut path = raw.trim();

    if let Some(m) = BULLET_PREFIX_RE.find(path) {
        path = &path[m.end()..];
    }
    if let Some(m) = LABEL_PREFIX_RE.find(path) {
        path = &path[m.end()..];
    }

    let unquoted = path.replace('`', "");
    let mut path = unquoted.trim().trim_matches(|c| matches!(c, '"' | '\'' | '*'));

    if let Some(m) = LIST_PREFIX_RE.find(path) {
        // "1.py" is a name, "1. app.py" is a list item
        let rest = path[m.end()..].trim_start();
        if is_path_like(rest) {
            path = rest;
        }
    }

    let path = path.trim().replace('\\', "/");
    if path.contains(char::is_whitespace) {
        return Err(PathError::Whitespace(path));
    }
    if let Some(c) = path.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(PathError::ForbiddenCharacter(c, path));
    }

    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .collect();
    if segments.is_empty() {
        return Err(PathError::Empty);
    }

    Ok(segments.join("/"))
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of the last path segment, with the dot (`"main.py"` -> `".py"`)
pub fn extension_of(path: &str) -> Option<&str> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx..]),
    }
}

/// Append `ext` when the file name carries no extension of its own
pub fn ensure_extension(path: &str, ext: &str) -> String {
    let name = file_name(path);
    if extension_of(path).is_some() || EXTENSIONLESS_NAMES.contains(&name) {
        path.to_string()
    } else {
        format!("{}{}", path, ext)
    }
}

/// Root a bare file name under the conventional project directory.
///
/// Paths that already name a directory are returned unchanged.
pub fn infer_directory(path: &str) -> String {
    if path.contains('/') {
        return path.to_string();
    }

    let ext = extension_of(path).map(str::to_ascii_lowercase);
    let prefix = match ext.as_deref() {
        Some(".py") => "backend/",
        _ if path.eq_ignore_ascii_case("requirements.txt") => "backend/",
        Some(".html") | Some(".htm") => "frontend/",
        Some(".css") => "frontend/static/css/",
        Some(".js") => "frontend/static/js/",
        _ => "",
    };

    format!("{}{}", prefix, path)
}

/// `dir/name.ext` -> `dir/name_<n>.ext`
pub fn with_suffix(path: &str, n: usize) -> String {
    let (dir, name) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    };

    match name.rfind('.') {
        Some(idx) if idx > 0 => format!("{}{}_{}{}", dir, &name[..idx], n, &name[idx..]),
        _ => format!("{}{}_{}", dir, name, n),
    }
}
