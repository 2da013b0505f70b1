//! An in-memory document for tools and tests.

use std::ops::Range;
use std::path::PathBuf;

use selection_engine_lang::LanguageId;

use crate::host::{DocumentContext, SelectionAccessor};

/// A text buffer with a single selection, implementing the document collaborator traits.
///
/// The selection is a byte range that must fall on char boundaries; it is clamped to the text
/// when set. Replacing the selection selects the inserted text.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    text: String,
    selection: Range<usize>,
    language: Option<LanguageId>,
    file_path: Option<PathBuf>,
    edit_labels: Vec<String>,
}

impl InMemoryDocument {
    /// Create a document with the whole text selected.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let selection = 0..text.len();
        Self {
            text,
            selection,
            ..Self::default()
        }
    }

    /// Select the given byte range (clamped to the text).
    pub fn with_selection(mut self, selection: Range<usize>) -> Self {
        self.select(selection);
        self
    }

    /// Set the document language.
    pub fn with_language(mut self, language: impl Into<LanguageId>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Bind the document to a file path.
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Select the given byte range (clamped to the text).
    pub fn select(&mut self, selection: Range<usize>) {
        let end = selection.end.min(self.text.len());
        let start = selection.start.min(end);
        self.selection = start..end;
    }

    /// The full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The selected byte range.
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Labels of the edits applied so far, oldest first.
    pub fn edit_labels(&self) -> &[String] {
        &self.edit_labels
    }
}

impl SelectionAccessor for InMemoryDocument {
    fn has_non_empty_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    fn selected_text(&self) -> String {
        self.text[self.selection.clone()].to_string()
    }

    fn replace_selected_text(&mut self, new_text: &str, edit_label: &str) {
        let start = self.selection.start;
        self.text.replace_range(self.selection.clone(), new_text);
        self.selection = start..start + new_text.len();
        self.edit_labels.push(edit_label.to_string());
    }
}

impl DocumentContext for InMemoryDocument {
    fn active_language(&self) -> Option<LanguageId> {
        self.language.clone()
    }

    fn active_file_path(&self) -> Option<PathBuf> {
        self.file_path.clone()
    }
}
