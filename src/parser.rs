//! Transcript parsing.
//!
//! [`TranscriptParser`] turns a whole exported transcript into a
//! [`Transcript`]: the ordered messages, their participants, parsing
//! statistics, the detected format family and any non-fatal warnings.
//!
//! Parsing is total. Malformed lines are counted and dropped, messages with
//! unreadable timestamps are kept with a sentinel timestamp, and an input
//! with no recognizable message is still a valid (empty) [`Transcript`].
//!
//! # Example
//!
//! ```rust
//! use chatline::TranscriptParser;
//!
//! let text = "\
//! 25/10/2023 09:15 - Ann: Hi
//! there
//! 25/10/2023 09:17 - Bob: Hi Ann";
//!
//! let transcript = TranscriptParser::new().parse_str(text);
//!
//! assert_eq!(transcript.messages().len(), 2);
//! assert_eq!(transcript.messages()[0].content(), "Hi there");
//! assert_eq!(transcript.participants().len(), 2);
//! assert_eq!(transcript.stats().multiline_messages, 1);
//! ```

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::Message;
use crate::config::ParserConfig;
use crate::core::report::{ParseWarning, ParsingReport, ParsingStats};
use crate::core::store::MessageStore;
use crate::error::{ChatlineError, Result};
use crate::parsing::{
    DetectedFormat, MessageStart, TimestampResolver, detect_format, match_message_start,
};

/// Parser for exported chat transcripts.
///
/// A parser holds only configuration and can be shared freely; every call to
/// [`parse_str`](Self::parse_str) builds a fresh [`MessageStore`].
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    config: ParserConfig,
    resolver: TimestampResolver,
}

impl TranscriptParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        let resolver = TimestampResolver::with_date_order(config.date_order);
        Self { config, resolver }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the timestamp resolver used for committed messages.
    pub fn resolver(&self) -> &TimestampResolver {
        &self.resolver
    }

    /// Parses a complete transcript.
    pub fn parse_str(&self, text: &str) -> Transcript {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let sample: Vec<&str> = text.lines().take(self.config.detection_sample).collect();
        let detected_format = detect_format(&sample);
        debug!(bytes = text.len(), format = %detected_format, "parsing transcript");

        let mut run = ParseRun::new(self);
        let mut state = LineState::NoOpenMessage;

        for (idx, raw) in text.lines().enumerate() {
            // iOS puts a bidi mark in front of media and system lines
            let line = raw
                .trim()
                .trim_start_matches(['\u{200e}', '\u{200f}'])
                .trim_start();
            if line.is_empty() {
                continue;
            }
            run.stats.total_lines += 1;
            let line_number = idx + 1;

            if let Some(start) = match_message_start(line) {
                if let LineState::MessageOpen(pending) =
                    std::mem::replace(&mut state, LineState::NoOpenMessage)
                {
                    run.commit(pending);
                }

                if self.config.skip_system_messages && self.config.is_system_notice(start.content) {
                    run.stats.system_messages += 1;
                    trace!(line = line_number, sender = start.sender, "dropped system notice");
                    continue;
                }

                trace!(line = line_number, pattern = start.pattern, "message start");
                state = LineState::MessageOpen(PendingMessage::open(line_number, &start));
            } else if let LineState::MessageOpen(pending) = &mut state {
                pending.append(line);
                run.stats.continuation_lines += 1;
            } else {
                run.stats.skipped_lines += 1;
                trace!(line = line_number, "skipped unattributable line");
            }
        }

        if let LineState::MessageOpen(pending) = state {
            run.commit(pending);
        }

        run.finish(detected_format)
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-line state of the segmentation state machine.
enum LineState {
    NoOpenMessage,
    MessageOpen(PendingMessage),
}

/// A message whose content may still grow.
struct PendingMessage {
    line: usize,
    timestamp: String,
    sender: String,
    content: String,
    continuations: usize,
}

impl PendingMessage {
    fn open(line: usize, start: &MessageStart<'_>) -> Self {
        Self {
            line,
            timestamp: start.timestamp.to_string(),
            sender: start.sender.to_string(),
            content: start.content.to_string(),
            continuations: 0,
        }
    }

    fn append(&mut self, line: &str) {
        self.content.push(' ');
        self.content.push_str(line);
        self.continuations += 1;
    }
}

/// Mutable state of a single `parse_str` call.
struct ParseRun<'p> {
    parser: &'p TranscriptParser,
    store: MessageStore,
    stats: ParsingStats,
    warnings: Vec<ParseWarning>,
}

impl<'p> ParseRun<'p> {
    fn new(parser: &'p TranscriptParser) -> Self {
        Self {
            parser,
            store: MessageStore::new(),
            stats: ParsingStats::default(),
            warnings: Vec::new(),
        }
    }

    /// Resolves the timestamp and appends the message to the store.
    fn commit(&mut self, pending: PendingMessage) {
        if pending.continuations > 0 {
            self.stats.multiline_messages += 1;
        }

        let message = match self.parser.resolver.resolve(&pending.timestamp) {
            Ok(resolution) => Message::with_confidence(
                resolution.instant,
                pending.sender,
                pending.content,
                resolution.confidence(),
            ),
            Err(error) => {
                warn!(
                    line = pending.line,
                    timestamp = %pending.timestamp,
                    %error,
                    "unresolved timestamp, keeping message with sentinel time"
                );
                self.stats.unresolved_timestamps += 1;
                self.warnings.push(ParseWarning::UnresolvedTimestamp {
                    line: pending.line,
                    timestamp: pending.timestamp,
                    error,
                });
                Message::unresolved(pending.sender, pending.content)
            }
        };

        self.store.push(message);
        self.stats.parsed_messages += 1;
    }

    fn finish(self, detected_format: DetectedFormat) -> Transcript {
        debug!(
            total_lines = self.stats.total_lines,
            messages = self.stats.parsed_messages,
            skipped = self.stats.skipped_lines,
            system = self.stats.system_messages,
            unresolved = self.stats.unresolved_timestamps,
            format = %detected_format,
            "parsed transcript"
        );

        Transcript {
            store: self.store,
            stats: self.stats,
            detected_format,
            warnings: self.warnings,
        }
    }
}

/// Result of parsing one transcript.
///
/// Read-only: everything was fixed when [`TranscriptParser::parse_str`]
/// returned.
#[derive(Debug, Clone)]
pub struct Transcript {
    store: MessageStore,
    stats: ParsingStats,
    detected_format: DetectedFormat,
    warnings: Vec<ParseWarning>,
}

impl Transcript {
    /// Returns the messages in transcript order.
    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    /// Returns the distinct sender names.
    pub fn participants(&self) -> &BTreeSet<String> {
        self.store.participants()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Returns the parsing counters.
    pub fn stats(&self) -> &ParsingStats {
        &self.stats
    }

    /// Returns the format family detected from the leading lines.
    pub fn detected_format(&self) -> DetectedFormat {
        self.detected_format
    }

    /// Returns non-fatal problems found while parsing.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Returns `true` if nothing in the input was recognized as a message.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Builds the human-facing parsing report.
    pub fn report(&self) -> ParsingReport {
        ParsingReport::new(self.detected_format, self.stats, self.warnings.clone())
    }

    /// Returns the transcript, or [`ChatlineError::NothingRecognized`] if it
    /// holds no messages.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatline::TranscriptParser;
    ///
    /// let err = TranscriptParser::new()
    ///     .parse_str("not a chat export")
    ///     .require_messages()
    ///     .unwrap_err();
    /// assert!(err.is_nothing_recognized());
    /// ```
    pub fn require_messages(self) -> Result<Self> {
        if self.is_empty() {
            return Err(ChatlineError::nothing_recognized(
                self.stats.total_lines,
                self.detected_format.label(),
            ));
        }
        Ok(self)
    }

    /// Consumes the transcript, returning the store.
    pub fn into_store(self) -> MessageStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::TimestampConfidence;
    use crate::parsing::FormatFamily;
    use chrono::{TimeZone, Utc};

    fn parse(text: &str) -> Transcript {
        TranscriptParser::new().parse_str(text)
    }

    #[test]
    fn test_two_messages_with_continuation() {
        let t = parse("25/10/2023 09:15 - Ann: Hi\nthere\n25/10/2023 09:17 - Bob: Hi Ann");

        assert_eq!(t.messages().len(), 2);
        assert_eq!(t.messages()[0].sender(), "Ann");
        assert_eq!(t.messages()[0].content(), "Hi there");
        assert_eq!(
            t.messages()[0].timestamp(),
            Utc.with_ymd_and_hms(2023, 10, 25, 9, 15, 0).unwrap()
        );
        assert_eq!(t.messages()[1].sender(), "Bob");
        assert_eq!(t.messages()[1].content(), "Hi Ann");
        assert_eq!(t.participants().len(), 2);
        assert_eq!(t.stats().multiline_messages, 1);
        assert_eq!(t.stats().continuation_lines, 1);
    }

    #[test]
    fn test_final_buffer_is_flushed() {
        let t = parse("25/10/2023 09:15 - Ann: one\ntwo\nthree");
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0].content(), "one two three");
        assert_eq!(t.stats().multiline_messages, 1);
        assert_eq!(t.stats().continuation_lines, 2);
    }

    #[test]
    fn test_media_only() {
        let t = parse("25/10/2023 09:15 - Ann: <Media omitted>");
        assert!(t.is_empty());
        assert_eq!(t.stats().system_messages, 1);
        assert_eq!(t.stats().parsed_messages, 0);
    }

    #[test]
    fn test_system_notice_opens_no_buffer() {
        let t = parse(
            "25/10/2023 09:15 - Ann: Hi\n\
             25/10/2023 09:16 - Bob: Missed voice call\n\
             orphan line",
        );
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0].content(), "Hi");
        assert_eq!(t.stats().system_messages, 1);
        assert_eq!(t.stats().skipped_lines, 1);
        assert_eq!(t.stats().multiline_messages, 0);
    }

    #[test]
    fn test_system_notice_flushes_open_message() {
        let t = parse(
            "25/10/2023 09:15 - Ann: Hi\nsecond line\n\
             25/10/2023 09:16 - Bob: <Mídia oculta>",
        );
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0].content(), "Hi second line");
        assert_eq!(t.stats().multiline_messages, 1);
    }

    #[test]
    fn test_keep_system_notices_when_configured() {
        let parser =
            TranscriptParser::with_config(ParserConfig::new().with_skip_system_messages(false));
        let t = parser.parse_str("25/10/2023 09:15 - Ann: <Media omitted>");
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.stats().system_messages, 0);
    }

    #[test]
    fn test_leading_lines_are_skipped() {
        let t = parse(
            "Messages and calls are end-to-end encrypted.\n\
             \n\
             25/10/2023 09:15 - Ann: Hi",
        );
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.stats().skipped_lines, 1);
        assert_eq!(t.stats().total_lines, 2);
    }

    #[test]
    fn test_empty_lines_not_counted() {
        let t = parse("\n\n25/10/2023 09:15 - Ann: Hi\n   \n\nthere\n");
        assert_eq!(t.stats().total_lines, 2);
        assert_eq!(t.messages()[0].content(), "Hi there");
    }

    #[test]
    fn test_unresolved_timestamp_keeps_message() {
        let t = parse("99/99/9999 09:15 - Ann: Hi\n25/10/2023 09:17 - Bob: Hey");

        assert_eq!(t.messages().len(), 2);
        let first = &t.messages()[0];
        assert_eq!(first.timestamp_confidence(), TimestampConfidence::Unresolved);
        assert_eq!(first.timestamp(), crate::message::unknown_timestamp());
        assert_eq!(t.stats().unresolved_timestamps, 1);
        assert_eq!(t.stats().parsed_messages, 2);

        assert_eq!(t.warnings().len(), 1);
        assert!(matches!(
            &t.warnings()[0],
            ParseWarning::UnresolvedTimestamp { line: 1, timestamp, .. }
                if timestamp == "99/99/9999 09:15"
        ));
        assert!(matches!(
            &t.warnings()[0],
            ParseWarning::UnresolvedTimestamp {
                error: crate::error::TimestampError::OutOfRange { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_heuristic_confidence() {
        let t = parse("2023.10.25. 09:15 - Anna: Szia");
        assert_eq!(t.messages().len(), 1);
        assert_eq!(
            t.messages()[0].timestamp_confidence(),
            TimestampConfidence::Heuristic
        );
        assert_eq!(
            t.messages()[0].timestamp(),
            Utc.with_ymd_and_hms(2023, 10, 25, 9, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_out_of_order_timestamps_preserved() {
        let t = parse("25/10/2023 10:00 - Ann: later\n25/10/2023 09:00 - Bob: earlier");
        assert_eq!(t.messages()[0].content(), "later");
        assert_eq!(t.messages()[1].content(), "earlier");
    }

    #[test]
    fn test_month_first_config() {
        let parser = TranscriptParser::with_config(
            ParserConfig::new().with_date_order(crate::config::DateOrder::MonthFirst),
        );
        let t = parser.parse_str("03/04/2023 10:00 - Ann: Hi");
        assert_eq!(
            t.messages()[0].timestamp(),
            Utc.with_ymd_and_hms(2023, 3, 4, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_bom_is_ignored() {
        let t = parse("\u{feff}25/10/2023 09:15 - Ann: Hi");
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.stats().skipped_lines, 0);
    }

    #[test]
    fn test_leading_bidi_mark_on_start_line() {
        let t = parse(
            "[15.01.24, 10:30:45] Alice: Hi\n\
             \u{200e}[15.01.24, 10:30:50] Bob: \u{200e}image omitted\n\
             \u{200f}[15.01.24, 10:31:00] Alice: Nice",
        );
        assert_eq!(t.messages().len(), 2);
        assert_eq!(t.messages()[0].content(), "Hi");
        assert_eq!(t.messages()[1].content(), "Nice");
        assert_eq!(t.stats().system_messages, 1);
        assert_eq!(t.stats().continuation_lines, 0);
    }

    #[test]
    fn test_detected_format_and_sample_size() {
        let text = "25.10.2023 09:15 - Hans: a\n\
                    25/10/2023 09:16 - Lisa: b\n\
                    25/10/2023 09:17 - Lisa: c";
        assert_eq!(
            parse(text).detected_format(),
            DetectedFormat::Family(FormatFamily::Slash)
        );

        let parser =
            TranscriptParser::with_config(ParserConfig::new().with_detection_sample(1));
        assert_eq!(
            parser.parse_str(text).detected_format(),
            DetectedFormat::Family(FormatFamily::Dot)
        );
    }

    #[test]
    fn test_require_messages() {
        assert!(parse("25/10/2023 09:15 - Ann: Hi").require_messages().is_ok());

        let err = parse("hello\nworld").require_messages().unwrap_err();
        assert!(matches!(
            err,
            ChatlineError::NothingRecognized { total_lines: 2, .. }
        ));
    }

    #[test]
    fn test_empty_input() {
        let t = parse("");
        assert!(t.is_empty());
        assert_eq!(t.stats().total_lines, 0);
        assert_eq!(t.detected_format(), DetectedFormat::Unknown);
        assert_eq!(t.report().success_rate, 0.0);
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TranscriptParser>();
        assert_send_sync::<Transcript>();
    }

    #[test]
    fn test_parser_is_reusable() {
        let parser = TranscriptParser::new();
        let a = parser.parse_str("25/10/2023 09:15 - Ann: Hi");
        let b = parser.parse_str("25/10/2023 09:15 - Bob: Hi");
        assert_eq!(a.messages().len(), 1);
        assert_eq!(b.messages().len(), 1);
        assert!(b.participants().contains("Bob"));
        assert!(!b.participants().contains("Ann"));
    }
}
