// Entry-point promotion: make sure conventional entry files exist when
// plausible content for them was extracted under another name.

use tracing::debug;

use super::classify::{has_root_markup, has_route_decorator};
use super::paths::extension_of;
use super::result::ExtractionResult;

pub const BACKEND_ENTRY_NAMES: &[&str] = &["main.py", "app.py"];
pub const BACKEND_ENTRY_PATH: &str = "backend/main.py";
pub const MARKUP_ENTRY_NAME: &str = "index.html";
pub const MARKUP_ENTRY_PATH: &str = "frontend/index.html";

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn promote_entry_points(result: &mut ExtractionResult) {
    let has_backend_entry = result
        .iter()
        .any(|file| BACKEND_ENTRY_NAMES.contains(&file_name(&file.path)));

    if !has_backend_entry {
        let candidate = result
            .iter()
            .find(|file| {
                extension_of(&file.path) == Some(".py") && has_route_decorator(&file.content)
            })
            .map(|file| file.path.clone());

        if let Some(from) = candidate {
            if result.rename(&from, BACKEND_ENTRY_PATH) {
                debug!("Promoted {} to {}", from, BACKEND_ENTRY_PATH);
            }
        }
    }

    let has_markup_entry = result
        .iter()
        .any(|file| file_name(&file.path) == MARKUP_ENTRY_NAME);

    if !has_markup_entry {
        let candidate = result
            .iter()
            .find(|file| {
                matches!(extension_of(&file.path), Some(".html") | Some(".htm"))
                    && has_root_markup(&file.content)
            })
            .map(|file| file.path.clone());

        if let Some(from) = candidate {
            if result.rename(&from, MARKUP_ENTRY_PATH) {
                debug!("Promoted {} to {}", from, MARKUP_ENTRY_PATH);
            }
        }
    }
}
