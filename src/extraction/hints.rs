// Filename hints: "create `app.py`", "save it as main.js", "a file called styles.css"

use regex::Regex;
use std::sync::LazyLock;

use super::paths::is_path_like;

static HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:create[sd]?|creating|save[sd]?|saving|name[sd]?|naming|call(?:ed|s)?)\b(?:\s+(?:a|an|the|new|file|it|this|as|to|in|into|called|named))*\s+[`"'*]*([\w\-./\\]+\.[A-Za-z0-9]+)"#,
    )
    .unwrap()
});

/// File names hinted at in prose, first occurrence order, no duplicates
pub fn collect_hints(prose: &str) -> Vec<String> {
    let mut hints: Vec<String> = Vec::new();

    for caps in HINT_RE.captures_iter(prose) {
        let Some(name) = caps.get(1) else { continue };
        let name = name.as_str().trim_end_matches('.');
        if is_path_like(name) && !hints.iter().any(|seen| seen == name) {
            hints.push(name.to_string());
        }
    }

    hints
}
