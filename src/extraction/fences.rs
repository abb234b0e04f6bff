//! Fenced block scanning
//!
//! A single line-based pass splits a reply into fenced code blocks and the
//! prose around them. Marker lines in the prose attach to the next block.

use regex::Regex;
use std::sync::LazyLock;

use super::language::normalize_language_tag;
use super::markers::parse_marker_line;

const FENCE: &str = "```";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:title|file(?:name)?)\s*=\s*["']([^"']+)["']"#).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language_tag: Option<String>,
    pub body: String,
    /// Path named by a marker line or by the fence info string
    pub preceding_path_hint: Option<String>,
}

#[derive(Debug, Default)]
pub struct Scan {
    pub blocks: Vec<CodeBlock>,
    /// Text outside fences, marker lines excluded
    pub prose: String,
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Language tag and optional path carried by a fence info string
///
/// Accepts `python`, `python:backend/main.py` and `python title="main.py"`.
fn parse_info_string(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim().trim_start_matches('`').trim();
    let titled = TITLE_RE
        .captures(info)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let first = info.split_whitespace().next().unwrap_or("");
    match first.split_once(':') {
        Some((lang, path)) if !path.is_empty() => {
            (normalize_language_tag(lang), titled.or_else(|| Some(path.to_string())))
        }
        Some((lang, _)) => (normalize_language_tag(lang), titled),
        _ if first.contains('=') => (None, titled),
        _ => (normalize_language_tag(first), titled),
    }
}

pub fn scan(text: &str) -> Scan {
    let mut scan = Scan::default();
    let mut pending_marker: Option<String> = None;
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        if !is_fence(line) {
            match parse_marker_line(line) {
                Some(path) => pending_marker = Some(path),
                None => {
                    scan.prose.push_str(line);
                    scan.prose.push('\n');
                }
            }
            continue;
        }

        let (language_tag, info_path) = parse_info_string(&line.trim_start()[FENCE.len()..]);

        // An unterminated fence runs to end of input
        let mut body_lines = Vec::new();
        for body_line in lines.by_ref() {
            if is_fence(body_line) {
                break;
            }
            body_lines.push(body_line);
        }

        let marker = pending_marker.take();
        let body = body_lines.join("\n");
        if body.trim().is_empty() {
            continue;
        }

        scan.blocks.push(CodeBlock {
            language_tag,
            body,
            preceding_path_hint: marker.or(info_path),
        });
    }

    scan
}
