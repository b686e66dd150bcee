//! The message type produced by transcript parsing.
//!
//! A [`Message`] is one logical chat message: a timestamp, the sender, and the
//! (possibly multi-line, space-joined) content. Messages are immutable once
//! built; the word and character counts are computed at construction.
//!
//! # Example
//!
//! ```
//! use chatline::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2023, 10, 25, 9, 15, 0).unwrap();
//! let msg = Message::new(ts, "Ann", "Hi there");
//!
//! assert_eq!(msg.sender(), "Ann");
//! assert_eq!(msg.word_count(), 2);
//! assert_eq!(msg.char_count(), 8);
//! assert!(msg.has_resolved_timestamp());
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How much a message's timestamp can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampConfidence {
    /// Parsed by one of the known layouts.
    #[default]
    Exact,
    /// Reconstructed from numeric fields by the fallback heuristic.
    Heuristic,
    /// Nothing worked; the timestamp is [`unknown_timestamp`].
    Unresolved,
}

/// Sentinel instant used for messages whose timestamp could not be resolved.
///
/// This is the Unix epoch. Check [`Message::timestamp_confidence`] rather than
/// comparing against this value.
pub fn unknown_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

/// A single message reconstructed from a transcript.
///
/// Timestamps are the wall-clock time written in the export, tagged as UTC;
/// exports carry no zone information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    timestamp: DateTime<Utc>,
    sender: String,
    content: String,
    word_count: usize,
    char_count: usize,
    timestamp_confidence: TimestampConfidence,
}

impl Message {
    /// Creates a message with an exactly parsed timestamp.
    pub fn new(
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::with_confidence(timestamp, sender, content, TimestampConfidence::Exact)
    }

    /// Creates a message whose timestamp could not be resolved.
    ///
    /// The timestamp is set to [`unknown_timestamp`].
    pub fn unresolved(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_confidence(
            unknown_timestamp(),
            sender,
            content,
            TimestampConfidence::Unresolved,
        )
    }

    /// Creates a message with an explicit timestamp confidence.
    pub fn with_confidence(
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        content: impl Into<String>,
        timestamp_confidence: TimestampConfidence,
    ) -> Self {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        let char_count = content.chars().count();
        Self {
            timestamp,
            sender: sender.into(),
            content,
            word_count,
            char_count,
            timestamp_confidence,
        }
    }

    /// Returns when the message was sent.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of whitespace-separated words in the content.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of characters (Unicode scalar values) in the content.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Returns how the timestamp was obtained.
    pub fn timestamp_confidence(&self) -> TimestampConfidence {
        self.timestamp_confidence
    }

    /// Returns `true` unless the timestamp is the unresolved sentinel.
    pub fn has_resolved_timestamp(&self) -> bool {
        self.timestamp_confidence != TimestampConfidence::Unresolved
    }
}
