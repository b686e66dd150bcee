//! Line-level building blocks of transcript parsing.
//!
//! - [`timestamp`] - [`TimestampResolver`]: timestamp text to date-time
//! - [`detect`] - [`detect_format`]: advisory format family of a transcript
//! - [`patterns`] - [`match_message_start`]: ordered message-start patterns
//!
//! [`TranscriptParser`](crate::TranscriptParser) drives all three.

pub mod detect;
pub mod patterns;
pub mod timestamp;

pub use detect::{DetectedFormat, FormatFamily, detect_format};
pub use patterns::{MessageStart, START_PATTERNS, StartPattern, match_message_start};
pub use timestamp::{Resolution, ResolutionMethod, TimestampResolver};
