//! Unified error types for chatline.
//!
//! Parsing a transcript never fails: malformed lines only lower the
//! [`success_rate`](crate::core::report::ParsingReport::success_rate). Errors
//! show up at the edges of the library instead:
//!
//! - [`TimestampError`] is the typed outcome of a single failed timestamp
//!   resolution (see [`TimestampResolver`](crate::parsing::TimestampResolver))
//! - [`ChatlineError`] covers the rest: an empty parse result turned into an
//!   error on request, and failures of the output converters

use thiserror::Error;

/// A specialized [`Result`] type for chatline operations.
///
/// # Example
///
/// ```rust
/// use chatline::error::Result;
/// use chatline::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlineError>;

/// The error type for all chatline operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlineError {
    /// The transcript produced no messages at all.
    ///
    /// Returned by [`Transcript::require_messages`](crate::Transcript::require_messages)
    /// so callers can show a format hint instead of an empty analysis.
    #[error(
        "No messages recognized in {total_lines} non-empty lines (detected format: {detected_format}). \
         Expected lines like '25/10/2023, 09:15 - Name: text' or '[25/10/2023, 09:15:30] Name: text'."
    )]
    NothingRecognized {
        /// Number of non-empty lines that were examined
        total_lines: usize,
        /// Label of the format family the detector guessed
        detected_format: String,
    },

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when converter output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Why a timestamp string could not be turned into a date-time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Nothing left after trimming.
    #[error("empty timestamp")]
    Empty,

    /// No layout matched and the heuristic found too few numeric fields.
    #[error("'{input}' matches no known layout and has {found} numeric fields (at least 5 required)")]
    TooFewFields {
        /// The normalized timestamp string
        input: String,
        /// Number of digit runs found
        found: usize,
    },

    /// The numeric fields do not form a real calendar date and time of day.
    #[error("numeric fields of '{input}' do not form a valid date and time")]
    OutOfRange {
        /// The normalized timestamp string
        input: String,
    },
}

impl From<std::string::FromUtf8Error> for ChatlineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlineError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlineError {
    /// Creates a "nothing recognized" error.
    pub fn nothing_recognized(total_lines: usize, detected_format: impl Into<String>) -> Self {
        ChatlineError::NothingRecognized {
            total_lines,
            detected_format: detected_format.into(),
        }
    }

    /// Returns `true` if the transcript yielded no messages.
    pub fn is_nothing_recognized(&self) -> bool {
        matches!(self, ChatlineError::NothingRecognized { .. })
    }

    /// Returns `true` if this is a serialization error.
    pub fn is_serialization(&self) -> bool {
        match self {
            #[cfg(feature = "json-output")]
            ChatlineError::Json(_) => true,
            #[cfg(feature = "csv-output")]
            ChatlineError::Csv(_) => true,
            _ => false,
        }
    }
}

impl TimestampError {
    /// Returns the normalized input that failed, if there was any.
    pub fn input(&self) -> Option<&str> {
        match self {
            TimestampError::Empty => None,
            TimestampError::TooFewFields { input, .. } | TimestampError::OutOfRange { input } => {
                Some(input)
            }
        }
    }
}
