//! JSON output converter.

use serde::Serialize;

use crate::Message;
use crate::config::OutputConfig;
use crate::error::Result;
use crate::message::TimestampConfidence;

/// Message shape shared by the JSON and JSONL converters.
/// Only includes fields enabled in `OutputConfig`.
#[derive(Serialize)]
pub(super) struct JsonMessage<'a> {
    sender: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp_confidence: Option<TimestampConfidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    char_count: Option<usize>,
}

impl<'a> JsonMessage<'a> {
    pub(super) fn from_message(msg: &'a Message, config: &OutputConfig) -> Self {
        let (timestamp, timestamp_confidence) = if config.include_timestamps {
            let ts = msg
                .has_resolved_timestamp()
                .then(|| msg.timestamp().format("%Y-%m-%dT%H:%M:%SZ").to_string());
            // Only flag timestamps that were not parsed exactly
            let confidence = (msg.timestamp_confidence() != TimestampConfidence::Exact)
                .then(|| msg.timestamp_confidence());
            (ts, confidence)
        } else {
            (None, None)
        };

        let (word_count, char_count) = if config.include_counts {
            (Some(msg.word_count()), Some(msg.char_count()))
        } else {
            (None, None)
        };

        Self {
            sender: msg.sender(),
            content: msg.content(),
            timestamp,
            timestamp_confidence,
            word_count,
            char_count,
        }
    }
}

/// Converts messages to a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "content": "Hello"},
///   {"sender": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let json_messages: Vec<JsonMessage<'_>> = messages
        .iter()
        .map(|m| JsonMessage::from_message(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_messages)?)
}
