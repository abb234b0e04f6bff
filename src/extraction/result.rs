use serde::ser::{Serialize, SerializeMap, Serializer};

use super::language::language_for_extension;
use super::paths::{extension_of, with_suffix};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAssignment {
    pub path: String,
    pub content: String,
}

/// Ordered path -> content mapping produced by one extraction
///
/// Paths are unique; insertion order is the order of first assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    files: Vec<FileAssignment>,
}

impl ExtractionResult {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileAssignment> {
        self.files.iter()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.path.as_str()).collect()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|file| file.path == path)
            .map(|file| file.content.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|file| file.path == path)
    }

    /// Add a file, suffixing `_1`, `_2`, ... before the extension on collision.
    /// Returns the path actually used.
    pub fn insert_unique(&mut self, path: String, content: String) -> String {
        let mut candidate = path.clone();
        let mut n = 1;
        while self.contains(&candidate) {
            candidate = with_suffix(&path, n);
            n += 1;
        }

        self.files.push(FileAssignment {
            path: candidate.clone(),
            content,
        });
        candidate
    }

    /// Rename a file in place; refuses when `to` is already taken
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if self.contains(to) {
            return false;
        }
        match self.files.iter_mut().find(|file| file.path == from) {
            Some(file) => {
                file.path = to.to_string();
                true
            }
            None => false,
        }
    }

    /// `FILE: path` marker plus fenced body for every file
    ///
    /// Feeding this text back through the extractor reproduces the mapping.
    pub fn to_marked_text(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            let tag = extension_of(&file.path)
                .and_then(language_for_extension)
                .unwrap_or("");
            out.push_str(&format!("FILE: {}\n```{}\n{}\n```\n\n", file.path, tag, file.content));
        }
        out
    }
}

impl<'a> IntoIterator for &'a ExtractionResult {
    type Item = &'a FileAssignment;
    type IntoIter = std::slice::Iter<'a, FileAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

// Serialized as a JSON object keyed by path, in extraction order
impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len()))?;
        for file in &self.files {
            map.serialize_entry(&file.path, &file.content)?;
        }
        map.end()
    }
}
