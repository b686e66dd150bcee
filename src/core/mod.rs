//! What a parse produces, and what can be done with it.
//!
//! This module contains:
//! - [`store`] - [`MessageStore`], the ordered messages and participants
//! - [`report`] - [`ParsingStats`], [`ParsingReport`] and warnings
//! - [`output`] - String converters (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatline::TranscriptParser;
//! use chatline::core::{FormatQuality, MessageStore};
//!
//! let transcript = TranscriptParser::new().parse_str("25/10/2023 09:15 - Ann: Hi");
//! let store: &MessageStore = transcript.store();
//! assert_eq!(store.len(), 1);
//! assert_eq!(transcript.report().format_quality, FormatQuality::Excellent);
//! ```

pub mod output;
pub mod report;
pub mod store;

pub use report::{FormatQuality, ParseWarning, ParsingReport, ParsingStats};
pub use store::MessageStore;

// Conditionally re-export output converters
#[cfg(feature = "csv-output")]
pub use output::to_csv;
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl};
