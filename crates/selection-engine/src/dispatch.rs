//! Command dispatch.
//!
//! Every [`Command`] maps to one row of a static table holding its name, its undo label, its
//! [`Precondition`] and the function that runs it. [`CommandDispatcher::execute`] looks the row
//! up, re-checks availability, runs the transform on the captured selection and writes the
//! result back only if the selection still holds the captured text.
//!
//! # Example
//!
//! ```rust
//! use selection_engine::{
//!     Command, CommandDispatcher, CommandOutcome, HostError, HostServices, InMemoryDocument,
//!     LanguageId, SyntaxTable, TextStatistics,
//! };
//! use std::path::Path;
//!
//! struct Headless;
//!
//! impl HostServices for Headless {
//!     fn show_statistics(&mut self, _: &TextStatistics) -> Result<(), HostError> { Ok(()) }
//!     fn execute_text(&mut self, _: &str, _: Option<&LanguageId>) -> Result<(), HostError> { Ok(()) }
//!     fn execute_file(&mut self, _: &Path) -> Result<(), HostError> { Ok(()) }
//!     fn set_regions_collapsed(&mut self, _: bool) -> Result<(), HostError> { Ok(()) }
//! }
//!
//! let mut dispatcher = CommandDispatcher::new(SyntaxTable::new(), Headless);
//! let mut doc = InMemoryDocument::new("pear\napple\n");
//!
//! let outcome = dispatcher.execute(Command::SortLines, Some(&mut doc)).unwrap();
//! assert_eq!(outcome, CommandOutcome::Applied);
//! assert_eq!(doc.text(), "apple\npear\n");
//! ```

use std::fmt;
use std::str::FromStr;

use selection_engine_lang::{CommentConfig, LanguageId, LanguageSyntaxCatalog, RegionConfig};

use crate::availability::Precondition;
use crate::comment::{add_region, comment_lines, todo_comment, uncomment_lines};
use crate::config::EngineOptions;
use crate::error::{CommandError, HostError};
use crate::host::{ActiveDocument, GuidSource, HostServices, RandomGuid};
use crate::line_sequence::LineSequence;
use crate::sort::sort_lines;
use crate::statistics::TextStatistics;
use crate::trim::trim_lines;

/// The closed set of selection commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Sort the selected lines.
    SortLines,
    /// Trim whitespace from the selected lines.
    Trim,
    /// Show statistics for the selection.
    Statistics,
    /// Run the selected text.
    ExecuteText,
    /// Run the active document's file.
    ExecuteFile,
    /// Comment the selected lines.
    CommentSelection,
    /// Uncomment the selected lines.
    UncommentSelection,
    /// Wrap the selection in a named region.
    AddRegion,
    /// Collapse every region.
    CollapseAllRegions,
    /// Expand every region.
    ExpandAllRegions,
    /// Replace the selection with a new GUID.
    GenerateGuid,
    /// Insert a TODO comment.
    AddToDoComment,
}

impl Command {
    /// Every command, in table order.
    pub const ALL: [Command; 12] = [
        Command::SortLines,
        Command::Trim,
        Command::Statistics,
        Command::ExecuteText,
        Command::ExecuteFile,
        Command::CommentSelection,
        Command::UncommentSelection,
        Command::AddRegion,
        Command::CollapseAllRegions,
        Command::ExpandAllRegions,
        Command::GenerateGuid,
        Command::AddToDoComment,
    ];

    fn entry(self) -> &'static CommandEntry {
        &COMMANDS[self as usize]
    }

    /// Stable kebab-case name used in host command strings (e.g. `"sort-lines"`).
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Human-readable label for the host's undo history.
    pub fn edit_label(self) -> &'static str {
        self.entry().edit_label
    }

    /// What the command needs before it may run.
    pub fn precondition(self) -> Precondition {
        self.entry().precondition
    }

    /// Returns `true` if the command rewrites the selection (as opposed to a host side effect).
    pub fn rewrites_selection(self) -> bool {
        matches!(self.entry().action, Action::Rewrite(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.edit_label())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse a command name, ignoring case and treating `_` like `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        COMMANDS
            .iter()
            .find(|entry| entry.name == normalized)
            .map(|entry| entry.command)
            .ok_or_else(|| CommandError::UnknownCommand(s.to_string()))
    }
}

/// What happened when a command was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command was not available; nothing happened.
    Unavailable,
    /// The transform produced the same text; nothing was written.
    Unchanged,
    /// The result was written back to the selection.
    Applied,
    /// The selection changed while the command ran; the result was dropped.
    Discarded,
    /// The command was handed to a host service.
    HostHandled,
}

struct RewriteScope<'a> {
    options: &'a EngineOptions,
    catalog: &'a dyn LanguageSyntaxCatalog,
    language: Option<&'a LanguageId>,
    guids: &'a mut dyn GuidSource,
}

impl RewriteScope<'_> {
    fn language(&self) -> Result<&LanguageId, CommandError> {
        self.language.ok_or(CommandError::NoLanguage)
    }

    fn comment_config(&self) -> Result<CommentConfig, CommandError> {
        let language = self.language()?;
        self.catalog
            .comment_config(language)
            .filter(CommentConfig::is_usable)
            .ok_or_else(|| CommandError::MissingCommentSyntax(language.to_string()))
    }

    fn region_config(&self) -> Result<RegionConfig, CommandError> {
        let language = self.language()?;
        self.catalog
            .region_config(language)
            .ok_or_else(|| CommandError::MissingRegionSyntax(language.to_string()))
    }
}

struct HostScope<'a> {
    command: Command,
    document: &'a dyn ActiveDocument,
    host: &'a mut dyn HostServices,
}

fn host_failure(command: Command) -> impl FnOnce(HostError) -> CommandError {
    move |source| CommandError::Host { command, source }
}

type RewriteFn = fn(&mut RewriteScope<'_>, &LineSequence) -> Result<LineSequence, CommandError>;
type HostFn = fn(&mut HostScope<'_>) -> Result<(), CommandError>;

#[derive(Clone, Copy)]
enum Action {
    Rewrite(RewriteFn),
    Host(HostFn),
}

struct CommandEntry {
    command: Command,
    name: &'static str,
    edit_label: &'static str,
    precondition: Precondition,
    action: Action,
}

static COMMANDS: [CommandEntry; 12] = [
    CommandEntry {
        command: Command::SortLines,
        name: "sort-lines",
        edit_label: "Sort Lines",
        precondition: Precondition::Selection,
        action: Action::Rewrite(rewrite_sort),
    },
    CommandEntry {
        command: Command::Trim,
        name: "trim",
        edit_label: "Trim",
        precondition: Precondition::Selection,
        action: Action::Rewrite(rewrite_trim),
    },
    CommandEntry {
        command: Command::Statistics,
        name: "statistics",
        edit_label: "Statistics",
        precondition: Precondition::Selection,
        action: Action::Host(run_statistics),
    },
    CommandEntry {
        command: Command::ExecuteText,
        name: "execute-text",
        edit_label: "Execute Text",
        precondition: Precondition::Selection,
        action: Action::Host(run_execute_text),
    },
    CommandEntry {
        command: Command::ExecuteFile,
        name: "execute-file",
        edit_label: "Execute File",
        precondition: Precondition::ExistingFile,
        action: Action::Host(run_execute_file),
    },
    CommandEntry {
        command: Command::CommentSelection,
        name: "comment-selection",
        edit_label: "Comment Selection",
        precondition: Precondition::CommentableSelection,
        action: Action::Rewrite(rewrite_comment),
    },
    CommandEntry {
        command: Command::UncommentSelection,
        name: "uncomment-selection",
        edit_label: "Uncomment Selection",
        precondition: Precondition::CommentedSelection,
        action: Action::Rewrite(rewrite_uncomment),
    },
    CommandEntry {
        command: Command::AddRegion,
        name: "add-region",
        edit_label: "Add Region",
        precondition: Precondition::RegionLanguage,
        action: Action::Rewrite(rewrite_add_region),
    },
    CommandEntry {
        command: Command::CollapseAllRegions,
        name: "collapse-all-regions",
        edit_label: "Collapse All Regions",
        precondition: Precondition::RegionLanguage,
        action: Action::Host(run_collapse_regions),
    },
    CommandEntry {
        command: Command::ExpandAllRegions,
        name: "expand-all-regions",
        edit_label: "Expand All Regions",
        precondition: Precondition::RegionLanguage,
        action: Action::Host(run_expand_regions),
    },
    CommandEntry {
        command: Command::GenerateGuid,
        name: "generate-guid",
        edit_label: "Generate GUID",
        precondition: Precondition::Selection,
        action: Action::Rewrite(rewrite_guid),
    },
    CommandEntry {
        command: Command::AddToDoComment,
        name: "add-todo-comment",
        edit_label: "Add TODO Comment",
        precondition: Precondition::CommentLanguage,
        action: Action::Rewrite(rewrite_todo),
    },
];

fn rewrite_sort(
    scope: &mut RewriteScope<'_>,
    seq: &LineSequence,
) -> Result<LineSequence, CommandError> {
    Ok(sort_lines(seq, &scope.options.sort))
}

fn rewrite_trim(
    scope: &mut RewriteScope<'_>,
    seq: &LineSequence,
) -> Result<LineSequence, CommandError> {
    Ok(trim_lines(seq, &scope.options.trim))
}

fn rewrite_comment(
    scope: &mut RewriteScope<'_>,
    seq: &LineSequence,
) -> Result<LineSequence, CommandError> {
    Ok(comment_lines(seq, &scope.comment_config()?))
}

fn rewrite_uncomment(
    scope: &mut RewriteScope<'_>,
    seq: &LineSequence,
) -> Result<LineSequence, CommandError> {
    Ok(uncomment_lines(seq, &scope.comment_config()?))
}

fn rewrite_add_region(
    scope: &mut RewriteScope<'_>,
    seq: &LineSequence,
) -> Result<LineSequence, CommandError> {
    let config = scope.region_config()?;
    Ok(add_region(seq, &config, &scope.options.region.default_name))
}

// The GUID replaces the selection wholesale, terminators included.
fn rewrite_guid(
    scope: &mut RewriteScope<'_>,
    _: &LineSequence,
) -> Result<LineSequence, CommandError> {
    Ok(LineSequence::parse(&scope.guids.next_guid()))
}

fn rewrite_todo(
    scope: &mut RewriteScope<'_>,
    seq: &LineSequence,
) -> Result<LineSequence, CommandError> {
    let config = scope.comment_config()?;
    Ok(todo_comment(seq, &config, scope.options.todo.author.as_deref()))
}

fn run_statistics(scope: &mut HostScope<'_>) -> Result<(), CommandError> {
    let stats = TextStatistics::compute(&scope.document.selected_text());
    tracing::debug!(?stats, "selection statistics");
    scope
        .host
        .show_statistics(&stats)
        .map_err(host_failure(scope.command))
}

fn run_execute_text(scope: &mut HostScope<'_>) -> Result<(), CommandError> {
    let text = scope.document.selected_text();
    let language = scope.document.active_language();
    scope
        .host
        .execute_text(&text, language.as_ref())
        .map_err(host_failure(scope.command))
}

fn run_execute_file(scope: &mut HostScope<'_>) -> Result<(), CommandError> {
    let path = scope
        .document
        .active_file_path()
        .ok_or(CommandError::NoActiveFile)?;
    scope
        .host
        .execute_file(&path)
        .map_err(host_failure(scope.command))
}

fn run_collapse_regions(scope: &mut HostScope<'_>) -> Result<(), CommandError> {
    scope
        .host
        .set_regions_collapsed(true)
        .map_err(host_failure(scope.command))
}

fn run_expand_regions(scope: &mut HostScope<'_>) -> Result<(), CommandError> {
    scope
        .host
        .set_regions_collapsed(false)
        .map_err(host_failure(scope.command))
}

/// Runs [`Command`]s against a host document.
///
/// The dispatcher owns the language catalog, the host services, the options and the GUID
/// source; the document is passed to every call so that nothing refers to a stale "active
/// document".
pub struct CommandDispatcher<C, H> {
    catalog: C,
    host: H,
    options: EngineOptions,
    guids: Box<dyn GuidSource>,
}

impl<C, H> CommandDispatcher<C, H>
where
    C: LanguageSyntaxCatalog,
    H: HostServices,
{
    /// Create a dispatcher with default options and random GUIDs.
    pub fn new(catalog: C, host: H) -> Self {
        Self {
            catalog,
            host,
            options: EngineOptions::default(),
            guids: Box::new(RandomGuid),
        }
    }

    /// Builder-style setter for the options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder-style setter for the GUID source.
    pub fn with_guid_source(mut self, guids: impl GuidSource + 'static) -> Self {
        self.guids = Box::new(guids);
        self
    }

    /// Current options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Replace the options (e.g. after the user edits them).
    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    /// The language catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The host services.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host services.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns `true` if `command` may run against `document`.
    pub fn is_available(&self, command: Command, document: Option<&dyn ActiveDocument>) -> bool {
        command.precondition().holds(document, &self.catalog)
    }

    /// Every command currently available for `document`, in table order.
    pub fn available_commands(&self, document: Option<&dyn ActiveDocument>) -> Vec<Command> {
        Command::ALL
            .into_iter()
            .filter(|&command| self.is_available(command, document))
            .collect()
    }

    /// Execute a command named by a host command string.
    ///
    /// Unknown names are unavailable, not errors.
    pub fn execute_named(
        &mut self,
        name: &str,
        document: Option<&mut dyn ActiveDocument>,
    ) -> Result<CommandOutcome, CommandError> {
        match name.parse::<Command>() {
            Ok(command) => self.execute(command, document),
            Err(err) => {
                tracing::debug!(%err, "ignoring command");
                Ok(CommandOutcome::Unavailable)
            }
        }
    }

    /// Execute `command` against `document`.
    ///
    /// Availability is re-checked first; an unavailable command is a no-op. Rewriting commands
    /// capture the selection, transform it, and write the result back only if it differs from
    /// the input and the live selection still equals the captured text. A selection that
    /// changed in between yields [`CommandOutcome::Discarded`]; the result is dropped, not
    /// merged or retried.
    ///
    /// Errors are logged here and returned to the caller.
    pub fn execute(
        &mut self,
        command: Command,
        document: Option<&mut dyn ActiveDocument>,
    ) -> Result<CommandOutcome, CommandError> {
        let span = tracing::debug_span!("execute", command = command.name());
        let _guard = span.enter();

        let Some(document) = document else {
            tracing::debug!("no active document");
            return Ok(CommandOutcome::Unavailable);
        };
        if !self.is_available(command, Some(&*document)) {
            tracing::debug!("command not available");
            return Ok(CommandOutcome::Unavailable);
        }

        let result = self.run(command, document);
        match &result {
            Ok(outcome) => tracing::debug!(?outcome, "command finished"),
            Err(err) => tracing::error!(%err, "command failed"),
        }
        result
    }

    fn run(
        &mut self,
        command: Command,
        document: &mut dyn ActiveDocument,
    ) -> Result<CommandOutcome, CommandError> {
        match command.entry().action {
            Action::Rewrite(rewrite) => {
                let input = document.selected_text();
                let language = document.active_language();
                let mut scope = RewriteScope {
                    options: &self.options,
                    catalog: &self.catalog,
                    language: language.as_ref(),
                    guids: self.guids.as_mut(),
                };
                let output = rewrite(&mut scope, &LineSequence::parse(&input))?.serialize();

                if output == input {
                    return Ok(CommandOutcome::Unchanged);
                }
                if document.set_selected_text_if_unchanged(&input, &output, command.edit_label()) {
                    Ok(CommandOutcome::Applied)
                } else {
                    tracing::warn!("selection changed while the command ran; result discarded");
                    Ok(CommandOutcome::Discarded)
                }
            }
            Action::Host(run) => {
                let mut scope = HostScope {
                    command,
                    document: &*document,
                    host: &mut self.host,
                };
                run(&mut scope)?;
                Ok(CommandOutcome::HostHandled)
            }
        }
    }
}
