// Writing an extraction result to disk (used by kestrel-extract)

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::result::ExtractionResult;

pub const SUMMARY_FILE_NAME: &str = "FILES.md";

/// Write every file under `root`, creating parent directories
pub fn write_to_dir(result: &ExtractionResult, root: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(result.len());

    for file in result {
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&target, &file.content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        debug!("Wrote {} ({} bytes)", target.display(), file.content.len());
        written.push(target);
    }

    Ok(written)
}

/// Markdown listing of the extracted files
pub fn files_summary(result: &ExtractionResult) -> String {
    let mut out = String::from("# Generated files\n\n");
    for file in result {
        out.push_str(&format!(
            "- `{}` ({} lines)\n",
            file.path,
            file.content.lines().count()
        ));
    }
    out
}
