//! CSV output converter.

use crate::Message;
use crate::config::OutputConfig;
use crate::error::Result;

/// Converts messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `[Timestamp;]Sender;Content[;Words;Chars]`
/// - Unresolved timestamps are written as an empty field
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer.write_record(build_header(config))?;

    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush().map_err(csv::Error::from)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.push("Sender");
    header.push("Content");

    if config.include_counts {
        header.push("Words");
        header.push("Chars");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_timestamps {
        record.push(if msg.has_resolved_timestamp() {
            msg.timestamp().format("%Y-%m-%d %H:%M:%S").to_string()
        } else {
            String::new()
        });
    }

    record.push(msg.sender().to_string());
    record.push(msg.content().to_string());

    if config.include_counts {
        record.push(msg.word_count().to_string());
        record.push(msg.char_count().to_string());
    }

    record
}
