//! String converters for parsed messages.
//!
//! - [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`to_jsonl`] - JSON Lines, one message per line - requires `json-output` feature
//!
//! The converters return strings; writing them anywhere is up to the caller.
//! Which optional fields appear is controlled by
//! [`OutputConfig`](crate::config::OutputConfig).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatline::Result<()> {
//! use chatline::TranscriptParser;
//! use chatline::config::OutputConfig;
//! use chatline::core::output::{to_csv, to_jsonl};
//!
//! let transcript = TranscriptParser::new().parse_str("25/10/2023 09:15 - Ann: Hi");
//! let config = OutputConfig::new().with_timestamps();
//!
//! let csv = to_csv(transcript.messages(), &config)?;
//! assert!(csv.contains("2023-10-25 09:15:00;Ann;Hi"));
//!
//! let jsonl = to_jsonl(transcript.messages(), &config)?;
//! assert!(jsonl.contains(r#""timestamp":"2023-10-25T09:15:00Z""#));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::to_csv;
#[cfg(feature = "json-output")]
pub use json_writer::to_json;
#[cfg(feature = "json-output")]
pub use jsonl_writer::to_jsonl;
