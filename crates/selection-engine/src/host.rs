//! Host collaborator interfaces.
//!
//! The engine never reaches for an ambient "active document". Everything it needs from the
//! host editor is passed in explicitly through these traits:
//!
//! - [`SelectionAccessor`] reads and conditionally replaces the current selection;
//! - [`DocumentContext`] describes the active document (language, backing file);
//! - [`HostServices`] performs the side effects the engine delegates (statistics display,
//!   launching processes, region folding);
//! - [`GuidSource`] produces GUID text.

use std::path::{Path, PathBuf};

use selection_engine_lang::LanguageId;
use uuid::Uuid;

use crate::error::HostError;
use crate::statistics::TextStatistics;

/// Access to the active document's selection.
pub trait SelectionAccessor {
    /// Returns `true` if the selection covers at least one character.
    fn has_non_empty_selection(&self) -> bool;

    /// The selected text (empty for a caret).
    fn selected_text(&self) -> String;

    /// Replace the selection with `new_text`, labelling the edit `edit_label` for the host's
    /// undo history.
    fn replace_selected_text(&mut self, new_text: &str, edit_label: &str);

    /// Replace the selection only if it still reads `expected`.
    ///
    /// Returns whether the write happened. Hosts with their own atomic compare-and-replace
    /// should override this.
    fn set_selected_text_if_unchanged(
        &mut self,
        expected: &str,
        new_text: &str,
        edit_label: &str,
    ) -> bool {
        if self.selected_text() != expected {
            return false;
        }
        self.replace_selected_text(new_text, edit_label);
        true
    }
}

/// Facts about the active document.
pub trait DocumentContext {
    /// The document's language, if the host knows it.
    fn active_language(&self) -> Option<LanguageId>;

    /// The file backing the document, if any.
    fn active_file_path(&self) -> Option<PathBuf>;

    /// Returns `true` if `path` currently exists on disk.
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// A document the engine can both inspect and edit.
pub trait ActiveDocument: SelectionAccessor + DocumentContext {}

impl<T: SelectionAccessor + DocumentContext + ?Sized> ActiveDocument for T {}

/// Side effects the engine delegates to the host.
pub trait HostServices {
    /// Present statistics for the selection.
    fn show_statistics(&mut self, stats: &TextStatistics) -> Result<(), HostError>;

    /// Run the selected text as a script or command line.
    fn execute_text(&mut self, text: &str, language: Option<&LanguageId>) -> Result<(), HostError>;

    /// Open or run the file backing the active document.
    fn execute_file(&mut self, path: &Path) -> Result<(), HostError>;

    /// Collapse (`true`) or expand (`false`) every region in the active document.
    fn set_regions_collapsed(&mut self, collapsed: bool) -> Result<(), HostError>;
}

/// Produces GUID text for the "Generate GUID" command.
pub trait GuidSource {
    /// The next GUID, already formatted.
    fn next_guid(&mut self) -> String;
}

/// Random (v4) GUIDs in the hyphenated lower-case form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGuid;

impl GuidSource for RandomGuid {
    fn next_guid(&mut self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}
