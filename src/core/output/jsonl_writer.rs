//! JSON Lines (JSONL) output converter.
//!
//! One message per line, convenient for line-oriented tools and for
//! appending transcripts to an existing dataset.

use std::fmt::Write;

use crate::Message;
use crate::config::OutputConfig;
use crate::error::Result;

use super::json_writer::JsonMessage;

/// Converts messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"Alice","content":"Hello"}
/// {"sender":"Bob","content":"Hi"}
/// ```
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut output = String::new();

    for msg in messages {
        let line = serde_json::to_string(&JsonMessage::from_message(msg, config))?;
        // Writing to a String cannot fail
        let _ = writeln!(output, "{line}");
    }

    Ok(output)
}
