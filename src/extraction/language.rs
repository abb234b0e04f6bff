//! Language tags and file extensions
//!
//! Fence info strings are free-form ("Python3", "js", "html5"), so tags are
//! normalized before any lookup.

pub const DEFAULT_EXTENSION: &str = ".txt";

/// Canonical language name for a fence tag, or `None` for an empty tag
pub fn normalize_language_tag(raw: &str) -> Option<String> {
    let tag = raw.replace('`', "").trim().to_lowercase();
    if tag.is_empty() {
        return None;
    }

    let canonical = match tag.as_str() {
        "python3" | "py" | "py3" => "python",
        "js" | "node" | "nodejs" => "javascript",
        "ts" => "typescript",
        "html5" | "markup" | "htm" => "html",
        "sh" | "shell" | "zsh" => "bash",
        "yml" => "yaml",
        "md" => "markdown",
        "c++" => "cpp",
        "cs" | "c#" => "csharp",
        "rb" => "ruby",
        "rs" => "rust",
        "ps1" | "pwsh" => "powershell",
        "txt" | "plaintext" | "plain" => "text",
        other => other,
    };

    Some(canonical.to_string())
}

/// Extension (with the leading dot) for a language tag
///
/// Only exact names and aliases are recognized; callers fall back to
/// [`DEFAULT_EXTENSION`] for anything else.
pub fn extension_for_language(raw: &str) -> Option<&'static str> {
    let tag = normalize_language_tag(raw)?;

    let ext = match tag.as_str() {
        "python" => ".py",
        "javascript" => ".js",
        "typescript" => ".ts",
        "jsx" => ".jsx",
        "tsx" => ".tsx",
        "html" => ".html",
        "css" => ".css",
        "scss" => ".scss",
        "json" => ".json",
        "xml" => ".xml",
        "yaml" => ".yaml",
        "toml" => ".toml",
        "markdown" => ".md",
        "sql" => ".sql",
        "bash" => ".sh",
        "powershell" => ".ps1",
        "java" => ".java",
        "kotlin" => ".kt",
        "scala" => ".scala",
        "go" => ".go",
        "rust" => ".rs",
        "c" => ".c",
        "cpp" => ".cpp",
        "csharp" => ".cs",
        "php" => ".php",
        "ruby" => ".rb",
        "swift" => ".swift",
        "dart" => ".dart",
        "r" => ".r",
        "elixir" => ".ex",
        "perl" => ".pl",
        "text" | "requirements" | "req" => ".txt",
        "dockerfile" | "docker" => "",
        _ => return None,
    };

    Some(ext)
}

/// Fence tag to use when rendering a file with this extension
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let language = match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "html" | "htm" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "md" => "markdown",
        "sql" => "sql",
        "sh" => "bash",
        "java" => "java",
        "go" => "go",
        "rs" => "rust",
        _ => return None,
    };
    Some(language)
}
