use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use selection_engine::{
    Command, CommandDispatcher, CommandError, CommandOutcome, CommentConfig, DocumentContext,
    EngineOptions, GuidSource, HostError, HostServices, InMemoryDocument, LanguageId,
    LanguageSyntax, RegionConfig, SelectionAccessor, SortPolicy, SyntaxTable, TextStatistics,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct RecordingHost {
    statistics: Vec<TextStatistics>,
    executed_text: Vec<(String, Option<LanguageId>)>,
    executed_files: Vec<PathBuf>,
    collapsed: Vec<bool>,
    fail: bool,
}

impl RecordingHost {
    fn check(&self) -> Result<(), HostError> {
        if self.fail {
            Err("host is unavailable".into())
        } else {
            Ok(())
        }
    }
}

impl HostServices for RecordingHost {
    fn show_statistics(&mut self, stats: &TextStatistics) -> Result<(), HostError> {
        self.check()?;
        self.statistics.push(*stats);
        Ok(())
    }

    fn execute_text(&mut self, text: &str, language: Option<&LanguageId>) -> Result<(), HostError> {
        self.check()?;
        self.executed_text.push((text.to_string(), language.cloned()));
        Ok(())
    }

    fn execute_file(&mut self, path: &Path) -> Result<(), HostError> {
        self.check()?;
        self.executed_files.push(path.to_path_buf());
        Ok(())
    }

    fn set_regions_collapsed(&mut self, collapsed: bool) -> Result<(), HostError> {
        self.check()?;
        self.collapsed.push(collapsed);
        Ok(())
    }
}

struct FixedGuid(&'static str);

impl GuidSource for FixedGuid {
    fn next_guid(&mut self) -> String {
        self.0.to_string()
    }
}

/// A document whose selection is edited by "someone else" between capture and write-back.
struct RacingDocument {
    inner: InMemoryDocument,
    reads: usize,
    writes: usize,
}

impl SelectionAccessor for RacingDocument {
    fn has_non_empty_selection(&self) -> bool {
        self.inner.has_non_empty_selection()
    }

    fn selected_text(&self) -> String {
        self.inner.selected_text()
    }

    fn replace_selected_text(&mut self, new_text: &str, edit_label: &str) {
        self.writes += 1;
        self.inner.replace_selected_text(new_text, edit_label);
    }

    fn set_selected_text_if_unchanged(
        &mut self,
        expected: &str,
        new_text: &str,
        edit_label: &str,
    ) -> bool {
        self.reads += 1;
        // A concurrent edit lands right before the compare.
        let len = self.inner.text().len();
        self.inner.select(0..len);
        self.inner.replace_selected_text("edited elsewhere\n", "Typing");
        if self.selected_text() != expected {
            return false;
        }
        self.replace_selected_text(new_text, edit_label);
        true
    }
}

impl DocumentContext for RacingDocument {
    fn active_language(&self) -> Option<LanguageId> {
        self.inner.active_language()
    }

    fn active_file_path(&self) -> Option<PathBuf> {
        self.inner.active_file_path()
    }
}

fn catalog() -> SyntaxTable {
    SyntaxTable::new()
        .with_language(
            "csharp",
            LanguageSyntax::default()
                .with_comments(CommentConfig::line_and_block("//", "/*", "*/"))
                .with_regions(RegionConfig::new("#region", "#endregion")),
        )
        .with_language(
            "html",
            LanguageSyntax::default().with_comments(CommentConfig::block("<!--", "-->")),
        )
        .with_language(
            "css",
            LanguageSyntax::default().with_comments(CommentConfig::block("/*", "*/")),
        )
}

fn dispatcher() -> CommandDispatcher<SyntaxTable, RecordingHost> {
    // RUST_LOG=selection_engine=debug shows the dispatcher's trace for a failing test.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    CommandDispatcher::new(catalog(), RecordingHost::default())
}

#[test]
fn test_sort_writes_back_with_label() {
    let mut dispatcher = dispatcher().with_options(EngineOptions {
        sort: SortPolicy {
            ordinal_comparison: true,
            case_sensitive: true,
            ..SortPolicy::default()
        },
        ..EngineOptions::default()
    });
    let mut doc = InMemoryDocument::new("head\nb\na\nc\ntail").with_selection(5..11);

    let outcome = dispatcher
        .execute(Command::SortLines, Some(&mut doc))
        .unwrap();

    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(doc.text(), "head\na\nb\nc\ntail");
    assert_eq!(doc.edit_labels(), ["Sort Lines".to_string()]);
}

#[test]
fn test_unchanged_result_is_not_written() {
    let mut dispatcher = dispatcher();
    let mut doc = InMemoryDocument::new("a\nb\n");

    let outcome = dispatcher.execute(Command::Trim, Some(&mut doc)).unwrap();

    assert_eq!(outcome, CommandOutcome::Unchanged);
    assert!(doc.edit_labels().is_empty());
}

#[test]
fn test_unavailable_command_is_a_no_op() {
    let mut dispatcher = dispatcher();
    let mut caret = InMemoryDocument::new(" a ").with_selection(1..1);

    assert_eq!(
        dispatcher.execute(Command::Trim, Some(&mut caret)).unwrap(),
        CommandOutcome::Unavailable
    );
    assert_eq!(
        dispatcher.execute(Command::Trim, None).unwrap(),
        CommandOutcome::Unavailable
    );
    assert_eq!(caret.text(), " a ");
}

#[test]
fn test_changed_selection_discards_result() {
    let mut dispatcher = dispatcher();
    let mut doc = RacingDocument {
        inner: InMemoryDocument::new("b\na\n"),
        reads: 0,
        writes: 0,
    };

    let outcome = dispatcher
        .execute(Command::SortLines, Some(&mut doc))
        .unwrap();

    assert_eq!(outcome, CommandOutcome::Discarded);
    assert_eq!(doc.reads, 1);
    assert_eq!(doc.writes, 0);
    assert_eq!(doc.inner.text(), "edited elsewhere\n");
}

#[test]
fn test_comment_and_uncomment_round_trip() {
    let mut dispatcher = dispatcher();
    let mut doc = InMemoryDocument::new("  int a;\n  int b;\n").with_language("csharp");

    assert!(!dispatcher.is_available(Command::UncommentSelection, Some(&doc)));
    assert_eq!(
        dispatcher
            .execute(Command::CommentSelection, Some(&mut doc))
            .unwrap(),
        CommandOutcome::Applied
    );
    assert_eq!(doc.text(), "  // int a;\n  // int b;\n");

    assert!(dispatcher.is_available(Command::UncommentSelection, Some(&doc)));
    dispatcher
        .execute(Command::UncommentSelection, Some(&mut doc))
        .unwrap();
    assert_eq!(doc.text(), "  int a;\n  int b;\n");
    assert_eq!(
        doc.edit_labels(),
        ["Comment Selection".to_string(), "Uncomment Selection".to_string()]
    );
}

#[test]
fn test_block_only_language_comments() {
    let mut dispatcher = dispatcher();
    let mut doc = InMemoryDocument::new("<p>hi</p>").with_language("html");

    dispatcher
        .execute(Command::CommentSelection, Some(&mut doc))
        .unwrap();
    assert_eq!(doc.text(), "<!-- <p>hi</p> -->");
}

#[test]
fn test_block_uncomment_with_shared_token_chars() {
    let mut dispatcher = dispatcher();

    // Start and end tokens overlap: this is text, not a comment.
    let mut overlap = InMemoryDocument::new("/*/\u{3000}").with_language("css");
    assert!(!dispatcher.is_available(Command::UncommentSelection, Some(&overlap)));
    assert_eq!(
        dispatcher
            .execute(Command::UncommentSelection, Some(&mut overlap))
            .unwrap(),
        CommandOutcome::Unavailable
    );
    assert_eq!(overlap.text(), "/*/\u{3000}");

    let mut wrapped = InMemoryDocument::new("/* a */\u{3000}").with_language("css");
    assert_eq!(
        dispatcher
            .execute(Command::UncommentSelection, Some(&mut wrapped))
            .unwrap(),
        CommandOutcome::Applied
    );
    assert_eq!(wrapped.text(), "a\u{3000}");
}

#[test]
fn test_add_region_uses_configured_name() {
    let mut options = EngineOptions::default();
    options.region.default_name = "Fields".to_string();
    let mut dispatcher = dispatcher().with_options(options);
    let mut doc = InMemoryDocument::new("    int a;\r\n").with_language("csharp");

    dispatcher.execute(Command::AddRegion, Some(&mut doc)).unwrap();

    assert_eq!(
        doc.text(),
        "    #region Fields\r\n    int a;\r\n    #endregion\r\n"
    );
}

#[test]
fn test_add_todo_comment_at_caret() {
    let mut options = EngineOptions::default();
    options.todo.author = Some("ann".to_string());
    let mut dispatcher = dispatcher().with_options(options);
    let mut doc = InMemoryDocument::new("x();\n")
        .with_selection(0..0)
        .with_language("csharp");

    dispatcher
        .execute(Command::AddToDoComment, Some(&mut doc))
        .unwrap();
    assert_eq!(doc.text(), "// TODO (ann): x();\n");
}

#[test]
fn test_generate_guid_replaces_selection() {
    let mut dispatcher =
        dispatcher().with_guid_source(FixedGuid("0f8fad5b-d9cb-469f-a165-70867728950e"));
    let mut doc = InMemoryDocument::new("id = X;").with_selection(5..6);

    dispatcher
        .execute(Command::GenerateGuid, Some(&mut doc))
        .unwrap();
    assert_eq!(doc.text(), "id = 0f8fad5b-d9cb-469f-a165-70867728950e;");
}

#[test]
fn test_host_commands() {
    let mut dispatcher = dispatcher();
    let mut doc = InMemoryDocument::new("echo hi\n").with_language("csharp");

    assert_eq!(
        dispatcher
            .execute(Command::Statistics, Some(&mut doc))
            .unwrap(),
        CommandOutcome::HostHandled
    );
    dispatcher
        .execute(Command::ExecuteText, Some(&mut doc))
        .unwrap();
    dispatcher
        .execute(Command::CollapseAllRegions, Some(&mut doc))
        .unwrap();
    dispatcher
        .execute(Command::ExpandAllRegions, Some(&mut doc))
        .unwrap();

    let host = dispatcher.host();
    assert_eq!(host.statistics.len(), 1);
    assert_eq!(host.statistics[0].words, 2);
    assert_eq!(
        host.executed_text,
        vec![("echo hi\n".to_string(), Some(LanguageId::new("csharp")))]
    );
    assert_eq!(host.collapsed, vec![true, false]);
    assert_eq!(doc.text(), "echo hi\n");
}

#[test]
fn test_execute_file_requires_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.ps1");
    let mut dispatcher = dispatcher();
    let mut doc = InMemoryDocument::new("").with_file_path(&path);

    assert_eq!(
        dispatcher
            .execute(Command::ExecuteFile, Some(&mut doc))
            .unwrap(),
        CommandOutcome::Unavailable
    );

    std::fs::write(&path, "Write-Host hi").unwrap();
    assert_eq!(
        dispatcher
            .execute(Command::ExecuteFile, Some(&mut doc))
            .unwrap(),
        CommandOutcome::HostHandled
    );
    assert_eq!(dispatcher.host().executed_files, vec![path]);
}

#[test]
fn test_host_failure_is_returned() {
    let mut dispatcher = dispatcher();
    dispatcher.host_mut().fail = true;
    let mut doc = InMemoryDocument::new("text");

    let err = dispatcher
        .execute(Command::Statistics, Some(&mut doc))
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::Host {
            command: Command::Statistics,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Statistics failed: host is unavailable");
}

#[test]
fn test_available_commands() {
    let dispatcher = dispatcher();
    let doc = InMemoryDocument::new("// x").with_language("csharp");

    assert_eq!(
        dispatcher.available_commands(Some(&doc)),
        vec![
            Command::SortLines,
            Command::Trim,
            Command::Statistics,
            Command::ExecuteText,
            Command::CommentSelection,
            Command::UncommentSelection,
            Command::AddRegion,
            Command::CollapseAllRegions,
            Command::ExpandAllRegions,
            Command::GenerateGuid,
            Command::AddToDoComment,
        ]
    );
    assert!(dispatcher.available_commands(None).is_empty());
}

#[test]
fn test_execute_named() {
    let mut dispatcher = dispatcher();
    let mut doc = InMemoryDocument::new(" a \n");

    assert_eq!(
        dispatcher.execute_named("trim", Some(&mut doc)).unwrap(),
        CommandOutcome::Applied
    );
    assert_eq!(doc.text(), "a\n");
    assert_eq!(
        dispatcher
            .execute_named("reformat", Some(&mut doc))
            .unwrap(),
        CommandOutcome::Unavailable
    );
}
