//! The parsed message sequence.
//!
//! A [`MessageStore`] holds the messages of exactly one transcript, in the
//! order they appear in it, plus the set of distinct senders. Timestamps are
//! never used to reorder: an export with a clock jump keeps its jump.
//!
//! Stores are only ever filled by [`TranscriptParser`](crate::TranscriptParser),
//! which builds a fresh one per call. There is no way to parse a second
//! transcript into an existing store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Message;

/// Ordered messages of one transcript plus their participants.
///
/// Invariant: a name is in [`participants`](Self::participants) exactly when
/// at least one message has it as sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageStore {
    messages: Vec<Message>,
    participants: BTreeSet<String>,
}

impl MessageStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a message and records its sender.
    pub(crate) fn push(&mut self, message: Message) {
        if !self.participants.contains(message.sender()) {
            self.participants.insert(message.sender().to_string());
        }
        self.messages.push(message);
    }

    /// Returns the messages in transcript order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the distinct sender names, sorted.
    pub fn participants(&self) -> &BTreeSet<String> {
        &self.participants
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no message was recognized.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over the messages in transcript order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Messages sent by `sender` (exact match), in transcript order.
    pub fn messages_from<'a>(&'a self, sender: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages.iter().filter(move |m| m.sender() == sender)
    }

    /// Number of messages per sender.
    pub fn count_by_sender(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for msg in &self.messages {
            *counts.entry(msg.sender()).or_insert(0) += 1;
        }
        counts
    }

    /// Earliest and latest resolved timestamps.
    ///
    /// Messages with an unresolved timestamp are ignored. Returns `None` when
    /// no message has a resolved timestamp.
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let mut resolved = self
            .messages
            .iter()
            .filter(|m| m.has_resolved_timestamp())
            .map(Message::timestamp);

        let first = resolved.next()?;
        Some(resolved.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
    }

    /// Consumes the store, returning the messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl<'a> IntoIterator for &'a MessageStore {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
