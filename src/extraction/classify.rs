//! Content sniffing for blocks without a usable name
//!
//! Classification is an ordered table of pure predicates; the first rule that
//! matches decides the kind. Each predicate sees the block text and its
//! normalized fence tag.

use regex::Regex;
use std::sync::LazyLock;

use super::language::DEFAULT_EXTENSION;

static REQUIREMENT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-\[\],]*\s*(?:==|>=|<=|~=|!=|>|<)\s*[\w.*]+").unwrap()
});
static PYTHON_SYNTAX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:def \w+\(|async def \w+\(|from [\w.]+ import |import [\w.]+(?:\s+as \w+)?\s*$|class \w+(?:\(.*\))?:\s*$|if __name__ ==)")
        .unwrap()
});
static ROUTE_DECORATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(?:app|router|bp|blueprint)\.\w+").unwrap());
static CSS_RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[A-Za-z.#*:\[@][^{}();=]*\{").unwrap());
static CSS_DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*-?[a-z][a-z\-]*\s*:\s*[^;]+;").unwrap());
static TEST_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:def test_\w+|import pytest|import unittest|from fastapi\.testclient import)")
        .unwrap()
});
static CONFIG_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*class \w*(?:Config|Settings)\b|BaseSettings").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Requirements,
    Markup,
    Backend,
    Stylesheet,
    Script,
    Generic,
}

/// What a predicate gets to look at
pub struct Sniff<'a> {
    pub body: &'a str,
    pub lower: String,
    pub tag: Option<&'a str>,
}

impl<'a> Sniff<'a> {
    pub fn new(body: &'a str, tag: Option<&'a str>) -> Self {
        Self {
            body,
            lower: body.to_lowercase(),
            tag,
        }
    }

    fn tag_is(&self, names: &[&str]) -> bool {
        self.tag.is_some_and(|tag| names.contains(&tag))
    }
}

type Rule = (ContentKind, fn(&Sniff<'_>) -> bool);

pub const RULES: &[Rule] = &[
    (ContentKind::Requirements, is_requirements),
    (ContentKind::Markup, is_markup),
    (ContentKind::Backend, is_backend),
    (ContentKind::Stylesheet, is_stylesheet),
    (ContentKind::Script, is_script),
    (ContentKind::Generic, is_anything),
];

pub fn classify(body: &str, tag: Option<&str>) -> ContentKind {
    let sniff = Sniff::new(body, tag);
    RULES
        .iter()
        .find(|(_, predicate)| predicate(&sniff))
        .map(|(kind, _)| *kind)
        .unwrap_or(ContentKind::Generic)
}

fn is_requirements(sniff: &Sniff<'_>) -> bool {
    if sniff.tag_is(&["requirements", "req"]) {
        return true;
    }
    if sniff.tag.is_some() && !sniff.tag_is(&["text"]) {
        return false;
    }

    let lines: Vec<&str> = sniff
        .body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    !lines.is_empty()
        && lines.len() < 10
        && lines.iter().all(|line| REQUIREMENT_LINE_RE.is_match(line))
}

fn is_markup(sniff: &Sniff<'_>) -> bool {
    has_root_markup(sniff.body) || sniff.lower.contains("<body") || sniff.tag_is(&["html"])
}

fn is_backend(sniff: &Sniff<'_>) -> bool {
    if sniff.tag_is(&["python"]) {
        return true;
    }
    // A declared language other than python is trusted over syntax sniffing
    if sniff.tag.is_some() && !sniff.tag_is(&["text"]) {
        return false;
    }

    has_route_decorator(sniff.body)
        || ["fastapi", "flask", "django"].iter().any(|framework| {
            sniff.lower.contains(&format!("import {}", framework))
                || sniff.lower.contains(&format!("from {}", framework))
        })
        || PYTHON_SYNTAX_RE.is_match(sniff.body)
}

fn is_stylesheet(sniff: &Sniff<'_>) -> bool {
    if sniff.tag_is(&["css", "scss"]) {
        return true;
    }
    sniff.tag.is_none()
        && CSS_RULE_RE.is_match(sniff.body)
        && CSS_DECLARATION_RE.is_match(sniff.body)
        && !sniff.lower.contains("function")
        && !sniff.body.contains("=>")
}

fn is_script(sniff: &Sniff<'_>) -> bool {
    if sniff.tag_is(&["javascript", "typescript", "jsx", "tsx"]) {
        return true;
    }
    sniff.tag.is_none()
        && ["function ", "const ", "let ", "document.", "addeventlistener", "fetch(", "=>"]
            .iter()
            .any(|needle| sniff.lower.contains(needle))
}

fn is_anything(_: &Sniff<'_>) -> bool {
    true
}

/// Server-side HTTP route idioms (`@app.get`, `FastAPI(`, `Flask(`)
pub fn has_route_decorator(body: &str) -> bool {
    ROUTE_DECORATOR_RE.is_match(body) || body.contains("FastAPI(") || body.contains("Flask(")
}

/// Does the text carry a root `<html>` element or an HTML doctype?
pub fn has_root_markup(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("<!doctype html") || lower.contains("<html")
}

/// Conventional location for a block of the given kind
pub fn default_path(kind: ContentKind, body: &str, ext: &str) -> String {
    match kind {
        ContentKind::Requirements => "backend/requirements.txt".to_string(),
        ContentKind::Markup => "frontend/index.html".to_string(),
        ContentKind::Stylesheet => "frontend/static/css/style.css".to_string(),
        ContentKind::Script if ext == ".ts" => "frontend/static/js/app.ts".to_string(),
        ContentKind::Script => "frontend/static/js/app.js".to_string(),
        ContentKind::Backend if ext != ".py" && ext != DEFAULT_EXTENSION => {
            format!("backend/unknown{}", ext)
        }
        ContentKind::Backend if TEST_CODE_RE.is_match(body) => {
            "backend/tests/test_api.py".to_string()
        }
        ContentKind::Backend if CONFIG_CODE_RE.is_match(body) => "backend/config.py".to_string(),
        ContentKind::Backend => "backend/main.py".to_string(),
        ContentKind::Generic => format!("file{}", ext),
    }
}
