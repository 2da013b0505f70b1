#![warn(missing_docs)]
//! Selection Engine - Headless Selection Command Kernel
//!
//! # Overview
//!
//! `selection-engine` implements the text commands an editor extension runs over the current
//! selection: sorting and trimming lines, commenting, wrapping in regions, TODO comments,
//! GUIDs and statistics. It does not talk to an editor directly; the host supplies the
//! selection, the document facts and the side effects through small traits.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  CommandDispatcher (conditional write-back) │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Command availability (preconditions)       │  ← UI gating
//! ├─────────────────────────────────────────────┤
//! │  Transforms (sort / trim / comment / ...)   │  ← Pure functions
//! ├─────────────────────────────────────────────┤
//! │  LineSequence (content + terminator pairs)  │  ← Line model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using the transforms directly
//!
//! ```rust
//! use selection_engine::{LineSequence, TrimPolicy, trim_lines};
//!
//! let seq = LineSequence::parse("  x\r\n y \n");
//! let trimmed = trim_lines(&seq, &TrimPolicy::default());
//! assert_eq!(trimmed.serialize(), "x\r\ny\n");
//! ```
//!
//! ## Checking availability
//!
//! ```rust
//! use selection_engine::{Command, InMemoryDocument, SyntaxTable, is_available};
//!
//! let catalog = SyntaxTable::new();
//! let doc = InMemoryDocument::new("b\na").with_selection(0..0);
//! assert!(!is_available(Command::SortLines, Some(&doc), &catalog));
//! assert!(!is_available(Command::SortLines, None, &catalog));
//! ```
//!
//! # Module Description
//!
//! - [`line_ending`] - per-line terminators
//! - [`line_sequence`] - the `(content, terminator)` line model
//! - [`collation`] - ordinal and dictionary-style comparers
//! - [`sort`] / [`trim`] - line sorting and trimming
//! - [`comment`] - comment, region and TODO transforms
//! - [`statistics`] - selection statistics
//! - [`availability`] - command preconditions
//! - [`dispatch`] - the command table and dispatcher
//! - [`host`] - host collaborator traits
//! - [`config`] - engine options

pub mod availability;
pub mod collation;
pub mod comment;
pub mod config;
pub mod dispatch;
mod error;
pub mod host;
pub mod line_ending;
pub mod line_sequence;
mod memory;
pub mod sort;
pub mod statistics;
pub mod trim;

pub use availability::{Precondition, is_available, is_available_by_name};
pub use collation::Comparer;
pub use config::{EngineOptions, RegionOptions, ToDoOptions};
pub use dispatch::{Command, CommandDispatcher, CommandOutcome};
pub use error::{CommandError, ConfigError, HostError};
pub use host::{
    ActiveDocument, DocumentContext, GuidSource, HostServices, RandomGuid, SelectionAccessor,
};
pub use line_ending::LineTerminator;
pub use line_sequence::{Line, LineSequence};
pub use memory::InMemoryDocument;
pub use selection_engine_lang::{
    CommentConfig, LanguageId, LanguageSyntax, LanguageSyntaxCatalog, RegionConfig, SyntaxTable,
};
pub use sort::{SortPolicy, sort_lines};
pub use statistics::TextStatistics;
pub use trim::{TrimPolicy, trim_lines};
