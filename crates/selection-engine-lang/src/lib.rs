#![warn(missing_docs)]
//! `selection-engine-lang` - data-driven language syntax helpers for `selection-engine`.
//!
//! This crate intentionally stays lightweight: it ships **no** built-in language tables.
//! Hosts describe the languages they know about (comment tokens, region markers) and hand a
//! [`LanguageSyntaxCatalog`] to the engine, which uses it to decide whether comment and region
//! commands are available and how to apply them.

use std::collections::HashMap;
use std::fmt;

/// Identifier of a document language as reported by the host (e.g. `"rust"`, `"csharp"`).
///
/// Identifiers are compared case-insensitively; they are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(String);

impl LanguageId {
    /// Create a language identifier.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    /// The normalized identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Comment tokens/config for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports only block comments.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            line: None,
            block_start: Some(start.into()),
            block_end: Some(end.into()),
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// The line token, if one is configured and non-empty.
    pub fn line_token(&self) -> Option<&str> {
        self.line.as_deref().filter(|s| !s.is_empty())
    }

    /// The block tokens, if both are configured and non-empty.
    pub fn block_tokens(&self) -> Option<(&str, &str)> {
        let start = self.block_start.as_deref().filter(|s| !s.is_empty())?;
        let end = self.block_end.as_deref().filter(|s| !s.is_empty())?;
        Some((start, end))
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line_token().is_some()
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_tokens().is_some()
    }

    /// Returns `true` if any comment style is usable.
    pub fn is_usable(&self) -> bool {
        self.has_line() || self.has_block()
    }
}

/// Region marker tokens for a given language (e.g. `#region` / `#endregion`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionConfig {
    /// Token that opens a region. The region name follows it after a space.
    pub start: String,
    /// Token that closes a region.
    pub end: String,
}

impl RegionConfig {
    /// Create a region config from its start and end markers.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Everything the engine needs to know about one language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageSyntax {
    /// Comment tokens, if the language has comments.
    pub comments: Option<CommentConfig>,
    /// Region markers, if the language supports named regions.
    pub regions: Option<RegionConfig>,
}

impl LanguageSyntax {
    /// Builder-style setter for comment tokens.
    pub fn with_comments(mut self, comments: CommentConfig) -> Self {
        self.comments = Some(comments);
        self
    }

    /// Builder-style setter for region markers.
    pub fn with_regions(mut self, regions: RegionConfig) -> Self {
        self.regions = Some(regions);
        self
    }
}

/// Language syntax lookups used by the command engine.
///
/// Only the two `*_config` methods are required; the `supports_*` predicates derive from them.
pub trait LanguageSyntaxCatalog {
    /// Comment tokens for `language`, if known.
    fn comment_config(&self, language: &LanguageId) -> Option<CommentConfig>;

    /// Region markers for `language`, if known.
    fn region_config(&self, language: &LanguageId) -> Option<RegionConfig>;

    /// Returns `true` if `language` has at least one usable comment style.
    fn supports_comments(&self, language: &LanguageId) -> bool {
        self.comment_config(language)
            .is_some_and(|config| config.is_usable())
    }

    /// Returns `true` if `language` has region markers.
    fn supports_regions(&self, language: &LanguageId) -> bool {
        self.region_config(language)
            .is_some_and(|config| !config.start.is_empty() && !config.end.is_empty())
    }
}

impl<T: LanguageSyntaxCatalog + ?Sized> LanguageSyntaxCatalog for &T {
    fn comment_config(&self, language: &LanguageId) -> Option<CommentConfig> {
        (**self).comment_config(language)
    }

    fn region_config(&self, language: &LanguageId) -> Option<RegionConfig> {
        (**self).region_config(language)
    }
}

/// A map-backed [`LanguageSyntaxCatalog`] populated by the host.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTable {
    languages: HashMap<LanguageId, LanguageSyntax>,
}

impl SyntaxTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the syntax for `language`.
    pub fn insert(&mut self, language: impl Into<LanguageId>, syntax: LanguageSyntax) {
        self.languages.insert(language.into(), syntax);
    }

    /// Builder-style variant of [`SyntaxTable::insert`].
    pub fn with_language(
        mut self,
        language: impl Into<LanguageId>,
        syntax: LanguageSyntax,
    ) -> Self {
        self.insert(language, syntax);
        self
    }

    /// Look up the syntax registered for `language`.
    pub fn get(&self, language: &LanguageId) -> Option<&LanguageSyntax> {
        self.languages.get(language)
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns `true` if no language is registered.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl LanguageSyntaxCatalog for SyntaxTable {
    fn comment_config(&self, language: &LanguageId) -> Option<CommentConfig> {
        self.get(language).and_then(|syntax| syntax.comments.clone())
    }

    fn region_config(&self, language: &LanguageId) -> Option<RegionConfig> {
        self.get(language).and_then(|syntax| syntax.regions.clone())
    }
}
