//! Command availability.
//!
//! Availability is a pure function of the current context. It is evaluated fresh on every
//! call (hosts typically ask on each UI refresh) and nothing is cached, since the selection and
//! the active document can change at any time.

use selection_engine_lang::LanguageSyntaxCatalog;

use crate::comment::contains_commented_line;
use crate::dispatch::Command;
use crate::host::ActiveDocument;
use crate::line_sequence::LineSequence;

/// What a command needs from the context before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precondition {
    /// A non-empty selection.
    Selection,
    /// A language with comment syntax and a non-empty selection.
    CommentableSelection,
    /// A language with comment syntax and a selection containing a commented line.
    CommentedSelection,
    /// A language with comment syntax; a caret is enough.
    CommentLanguage,
    /// A language with region markers.
    RegionLanguage,
    /// A document backed by a file that exists on disk.
    ExistingFile,
}

impl Precondition {
    /// Evaluate this precondition against the context. An absent document never qualifies.
    pub fn holds<C>(self, document: Option<&dyn ActiveDocument>, catalog: &C) -> bool
    where
        C: LanguageSyntaxCatalog + ?Sized,
    {
        let Some(document) = document else {
            return false;
        };

        let supports_comments = || {
            document
                .active_language()
                .is_some_and(|language| catalog.supports_comments(&language))
        };

        match self {
            Self::Selection => document.has_non_empty_selection(),
            Self::CommentableSelection => {
                document.has_non_empty_selection() && supports_comments()
            }
            Self::CommentedSelection => {
                if !document.has_non_empty_selection() {
                    return false;
                }
                let Some(config) = document
                    .active_language()
                    .and_then(|language| catalog.comment_config(&language))
                    .filter(|config| config.is_usable())
                else {
                    return false;
                };
                contains_commented_line(&LineSequence::parse(&document.selected_text()), &config)
            }
            Self::CommentLanguage => supports_comments(),
            Self::RegionLanguage => document
                .active_language()
                .is_some_and(|language| catalog.supports_regions(&language)),
            Self::ExistingFile => document
                .active_file_path()
                .is_some_and(|path| document.file_exists(&path)),
        }
    }
}

/// Returns `true` if `command` may run in the given context.
pub fn is_available<C>(
    command: Command,
    document: Option<&dyn ActiveDocument>,
    catalog: &C,
) -> bool
where
    C: LanguageSyntaxCatalog + ?Sized,
{
    command.precondition().holds(document, catalog)
}

/// Like [`is_available`], for a host command string. Unknown names are never available.
pub fn is_available_by_name<C>(
    name: &str,
    document: Option<&dyn ActiveDocument>,
    catalog: &C,
) -> bool
where
    C: LanguageSyntaxCatalog + ?Sized,
{
    name.parse::<Command>()
        .is_ok_and(|command| is_available(command, document, catalog))
}
