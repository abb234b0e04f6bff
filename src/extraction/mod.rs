//! Multi-file response extraction
//!
//! Turns one free-form LLM reply into an ordered set of named files. The
//! pipeline never fails: every block ends up with a path, falling back from
//! explicit markers to positional filename hints to content sniffing.
//!
//! 1. Scan fenced blocks, attaching marker lines (`FILE: x`, `### x`, ...)
//! 2. Without any marker, pair prose hints ("create `app.py`") with blocks
//!    positionally, but only when the counts match exactly
//! 3. Unnamed blocks get a conventional path from their content kind
//! 4. Promote conventional entry points (`backend/main.py`,
//!    `frontend/index.html`) when suitable content went elsewhere

pub mod classify;
pub mod fences;
pub mod hints;
pub mod language;
pub mod markers;
pub mod paths;
pub mod persist;
pub mod promote;
pub mod result;

use tracing::debug;

pub use classify::ContentKind;
pub use fences::CodeBlock;
pub use paths::PathError;
pub use persist::{files_summary, write_to_dir};
pub use result::{ExtractionResult, FileAssignment};

use language::{extension_for_language, DEFAULT_EXTENSION};

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Expected target language, used only to pick default extensions
    pub language_hint: Option<String>,
}

impl ExtractOptions {
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language_hint: Some(language.into()),
        }
    }

    fn hinted_extension(&self) -> Option<&'static str> {
        self.language_hint.as_deref().and_then(extension_for_language)
    }
}

pub fn extract_files(text: &str, options: &ExtractOptions) -> ExtractionResult {
    let scan = fences::scan(text);
    let mut result = ExtractionResult::default();

    if scan.blocks.is_empty() {
        let body = text.trim();
        if !body.is_empty() {
            let ext = options.hinted_extension().unwrap_or(DEFAULT_EXTENSION);
            let kind = classify::classify(body, None);
            result.insert_unique(classify::default_path(kind, body, ext), body.to_string());
        }
        promote::promote_entry_points(&mut result);
        return result;
    }

    let any_marker = scan
        .blocks
        .iter()
        .any(|block| block.preceding_path_hint.is_some());

    let hints = if any_marker {
        Vec::new()
    } else {
        hints::collect_hints(&scan.prose)
    };
    let pair_hints = !hints.is_empty() && hints.len() == scan.blocks.len();
    if !any_marker && !hints.is_empty() && !pair_hints {
        debug!(
            "{} filename hints for {} blocks, falling back to content sniffing",
            hints.len(),
            scan.blocks.len()
        );
    }

    for (index, block) in scan.blocks.iter().enumerate() {
        let named = match &block.preceding_path_hint {
            Some(marker) => Some(marker.as_str()),
            None if pair_hints => hints.get(index).map(String::as_str),
            None => None,
        };

        let path = named
            .and_then(|raw| {
                resolve_named(raw, block, options)
                    .map_err(|e| debug!("Ignoring file name {:?}: {}", raw, e))
                    .ok()
            })
            .unwrap_or_else(|| resolve_default(block, options));

        result.insert_unique(path, block.body.clone());
    }

    promote::promote_entry_points(&mut result);
    result
}

fn block_extension(block: &CodeBlock, options: &ExtractOptions) -> &'static str {
    block
        .language_tag
        .as_deref()
        .and_then(extension_for_language)
        .or_else(|| options.hinted_extension())
        .unwrap_or(DEFAULT_EXTENSION)
}

/// Path for a block whose name came from a marker or a hint
pub fn resolve_named(
    raw: &str,
    block: &CodeBlock,
    options: &ExtractOptions,
) -> Result<String, PathError> {
    let path = paths::normalize_path(raw)?;
    let path = paths::ensure_extension(&path, block_extension(block, options));
    Ok(paths::infer_directory(&path))
}

fn resolve_default(block: &CodeBlock, options: &ExtractOptions) -> String {
    let ext = block_extension(block, options);
    let kind = classify::classify(&block.body, block.language_tag.as_deref());
    paths::infer_directory(&classify::default_path(kind, &block.body, ext))
}
