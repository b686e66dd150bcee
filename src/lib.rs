//! # Chatline
//!
//! A Rust library for turning exported chat transcripts into structured,
//! ordered messages.
//!
//! ## Overview
//!
//! Messaging apps export conversations as plain text, one message per line,
//! each line opening with a timestamp and a sender. Every phone writes that
//! prefix a little differently, depending on platform and locale:
//!
//! ```text
//! 25/10/2023, 09:15 - Ann: Hi            (Android, day-first)
//! 10/25/23, 9:15 PM - Ann: Hi            (Android, US)
//! [25.10.23, 09:15:30] Ann: Hi           (iOS)
//! 2023-10-25 09:15 - Ann: Hi             (ISO)
//! 25/10/2023, 9:15 p. m. - Ana: Hola     (Spanish meridiem)
//! ```
//!
//! Chatline recognizes all of these, joins wrapped lines back into their
//! message, drops media placeholders and missed-call notices, and reports
//! how much of the input it understood.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatline::prelude::*;
//!
//! let text = "\
//! 25/10/2023 09:15 - Ann: Hi
//! there
//! 25/10/2023 09:16 - Bob: <Media omitted>
//! 25/10/2023 09:17 - Bob: Hi Ann";
//!
//! let transcript = TranscriptParser::new().parse_str(text);
//!
//! assert_eq!(transcript.messages().len(), 2);
//! assert_eq!(transcript.messages()[0].content(), "Hi there");
//! assert_eq!(transcript.stats().system_messages, 1);
//!
//! let report = transcript.report();
//! assert_eq!(report.success_rate, 50.0);
//! assert_eq!(report.format_quality, FormatQuality::Poor);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use chatline::prelude::*;
//!
//! let config = ParserConfig::new()
//!     .with_date_order(DateOrder::MonthFirst)
//!     .with_missed_call_phrase("Appel manqué");
//!
//! let transcript = TranscriptParser::with_config(config)
//!     .parse_str("03/04/2023 10:00 - Ann: Hi");
//! assert_eq!(transcript.messages()[0].timestamp().to_rfc3339(), "2023-03-04T10:00:00+00:00");
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`] and its result, [`Transcript`]
//! - [`parsing`] - Line-level pieces: timestamp resolution, format detection,
//!   message-start patterns
//! - [`core`] - [`MessageStore`](core::MessageStore), statistics and report,
//!   output converters
//! - [`config`] - [`ParserConfig`](config::ParserConfig),
//!   [`OutputConfig`](config::OutputConfig)
//! - [`message`] - [`Message`]
//! - [`error`] - [`ChatlineError`], [`TimestampError`](error::TimestampError)
//! - [`prelude`] - Convenient re-exports
//!
//! ## Logging
//!
//! Chatline emits [`tracing`] events and never installs a subscriber. Each
//! parse logs a `debug` summary; dropped lines are logged at `trace`, and
//! messages kept with an unresolved timestamp at `warn`.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `json-output` | [`to_json`](core::output::to_json), [`to_jsonl`](core::output::to_jsonl), [`ParsingReport::to_json`](core::ParsingReport::to_json) |
//! | `csv-output` | [`to_csv`](core::output::to_csv) |
//! | `full` | Both of the above (default) |

pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlineError, Result};
pub use message::Message;
pub use parser::{Transcript, TranscriptParser};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::message::TimestampConfidence;

    pub use crate::error::{ChatlineError, Result, TimestampError};

    pub use crate::parser::{Transcript, TranscriptParser};

    pub use crate::config::{DateOrder, OutputConfig, ParserConfig};

    pub use crate::core::{FormatQuality, MessageStore, ParseWarning, ParsingReport, ParsingStats};

    pub use crate::parsing::{DetectedFormat, FormatFamily, TimestampResolver};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::to_csv;
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl};
}
