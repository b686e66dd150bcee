//! Parsing statistics and the human-facing quality report.
//!
//! # Example
//!
//! ```rust
//! use chatline::TranscriptParser;
//! use chatline::core::report::FormatQuality;
//!
//! let transcript = TranscriptParser::new()
//!     .parse_str("25/10/2023 09:15 - Ann: Hi\nthere\n25/10/2023 09:17 - Bob: Hi Ann");
//! let report = transcript.report();
//!
//! assert_eq!(report.parsing_statistics.parsed_messages, 2);
//! assert_eq!(report.success_rate, 66.67);
//! assert_eq!(report.format_quality, FormatQuality::Fair);
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::TimestampError;
use crate::parsing::DetectedFormat;

/// Counters collected during one parse pass.
///
/// Every non-empty line ends up in exactly one bucket, so
/// `parsed_messages + skipped_lines + system_messages + continuation_lines`
/// always equals `total_lines`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParsingStats {
    /// Non-empty lines examined.
    pub total_lines: usize,
    /// Messages committed to the store (including unresolved timestamps).
    pub parsed_messages: usize,
    /// Lines dropped because no message was open to attach them to.
    pub skipped_lines: usize,
    /// Messages that received at least one continuation line.
    pub multiline_messages: usize,
    /// Media placeholders and missed-call notices dropped.
    pub system_messages: usize,
    /// Lines appended to an open message.
    pub continuation_lines: usize,
    /// Messages committed with the unresolved sentinel timestamp.
    pub unresolved_timestamps: usize,
}

impl ParsingStats {
    /// Share of attributable lines that became messages, in percent,
    /// rounded to two decimals.
    ///
    /// Computed as `parsed_messages / max(1, total_lines - skipped_lines)`.
    pub fn success_rate(&self) -> f64 {
        let attributable = self.total_lines.saturating_sub(self.skipped_lines).max(1);
        let rate = self.parsed_messages as f64 / attributable as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }

    /// Sum of the per-line buckets; equals `total_lines` after a parse.
    pub fn accounted_lines(&self) -> usize {
        self.parsed_messages + self.skipped_lines + self.system_messages + self.continuation_lines
    }
}

/// Quality bucket derived from the success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatQuality {
    /// Above 90%
    Excellent,
    /// Above 70%
    Good,
    /// Above 50%
    Fair,
    /// 50% or less
    Poor,
}

impl FormatQuality {
    /// Buckets a success rate given in percent.
    pub fn from_success_rate(rate: f64) -> Self {
        if rate > 90.0 {
            FormatQuality::Excellent
        } else if rate > 70.0 {
            FormatQuality::Good
        } else if rate > 50.0 {
            FormatQuality::Fair
        } else {
            FormatQuality::Poor
        }
    }
}

impl fmt::Display for FormatQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormatQuality::Excellent => "Excellent",
            FormatQuality::Good => "Good",
            FormatQuality::Fair => "Fair",
            FormatQuality::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// Non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A message was kept with the sentinel timestamp.
    UnresolvedTimestamp {
        /// 1-based line number where the message starts
        line: usize,
        /// Timestamp text as written
        timestamp: String,
        /// Why resolution failed
        #[serde(serialize_with = "serialize_display")]
        error: TimestampError,
    },
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnresolvedTimestamp { line, error, .. } => {
                write!(f, "line {line}: unresolved timestamp: {error}")
            }
        }
    }
}

/// Report handed to whatever presents the parse result.
///
/// Serializes to
/// `{detected_format, parsing_statistics, success_rate, format_quality, warnings?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsingReport {
    /// Dominant format family of the sampled prefix.
    pub detected_format: DetectedFormat,
    /// Raw counters.
    pub parsing_statistics: ParsingStats,
    /// Percentage in `0..=100`, two decimals.
    pub success_rate: f64,
    /// Bucket of `success_rate`.
    pub format_quality: FormatQuality,
    /// Non-fatal problems, omitted from JSON when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

impl ParsingReport {
    /// Builds the report from a finished parse.
    pub fn new(
        detected_format: DetectedFormat,
        parsing_statistics: ParsingStats,
        warnings: Vec<ParseWarning>,
    ) -> Self {
        let success_rate = parsing_statistics.success_rate();
        Self {
            detected_format,
            parsing_statistics,
            success_rate,
            format_quality: FormatQuality::from_success_rate(success_rate),
            warnings,
        }
    }

    /// Serializes the report as pretty-printed JSON.
    #[cfg(feature = "json-output")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
