//! Configuration types for parsing and output.
//!
//! Plain structs with builder methods, without any CLI framework dependencies.
//! Both derive serde traits so they can be embedded in an application's own
//! configuration file.
//!
//! # Example
//!
//! ```rust
//! use chatline::config::{DateOrder, ParserConfig};
//! use chatline::TranscriptParser;
//!
//! let config = ParserConfig::new()
//!     .with_date_order(DateOrder::MonthFirst)
//!     .with_detection_sample(100);
//!
//! let parser = TranscriptParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Which field comes first when a numeric date like `03/04/2023` is ambiguous.
///
/// Only used to break ties: `25/10/2023` is always the 25th of October and
/// `10/25/2023` always the 25th of October, whatever the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `DD/MM/YYYY` (European, Brazilian, most of the world)
    #[default]
    DayFirst,
    /// `MM/DD/YYYY` (United States)
    MonthFirst,
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatline::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_skip_system_messages(false)
///     .with_missed_call_phrase("Verpasster Sprachanruf");
/// assert!(!config.skip_system_messages);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Tie-break for ambiguous day/month fields (default: day first)
    pub date_order: DateOrder,

    /// Number of leading lines sampled for format detection (default: 50)
    pub detection_sample: usize,

    /// Drop media placeholders and missed-call notices (default: true)
    pub skip_system_messages: bool,

    /// Content prefixes that mark a media/system notice
    /// (default: `<` and the U+200E mark iOS puts before "image omitted")
    pub system_prefixes: Vec<String>,

    /// Phrases that mark a missed-call notice anywhere in the content
    pub missed_call_phrases: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::DayFirst,
            detection_sample: 50,
            skip_system_messages: true,
            system_prefixes: vec!["<".to_string(), "\u{200e}".to_string()],
            missed_call_phrases: vec![
                "Missed call".to_string(),
                "Missed voice call".to_string(),
                "Missed video call".to_string(),
                "Ligação de voz perdida".to_string(),
                "Chamada de vídeo perdida".to_string(),
            ],
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the day/month tie-break.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Sets how many leading lines the format detector looks at.
    #[must_use]
    pub fn with_detection_sample(mut self, lines: usize) -> Self {
        self.detection_sample = lines;
        self
    }

    /// Sets whether media and missed-call notices are dropped.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Adds a content prefix that marks a system/media notice.
    #[must_use]
    pub fn with_system_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.system_prefixes.push(prefix.into());
        self
    }

    /// Adds a missed-call phrase (for transcripts in other languages).
    #[must_use]
    pub fn with_missed_call_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.missed_call_phrases.push(phrase.into());
        self
    }

    /// Returns `true` if `content` is a media placeholder or missed-call notice.
    pub fn is_system_notice(&self, content: &str) -> bool {
        self.system_prefixes
            .iter()
            .any(|p| !p.is_empty() && content.starts_with(p.as_str()))
            || self
                .missed_call_phrases
                .iter()
                .any(|p| !p.is_empty() && content.contains(p.as_str()))
    }
}

/// Configuration for the output converters.
///
/// Sender and content are always written. Everything else is opt-in.
///
/// # Example
///
/// ```rust
/// use chatline::config::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps().with_counts();
/// assert!(config.include_timestamps);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include message timestamps (unresolved ones are left empty)
    pub include_timestamps: bool,

    /// Include word and character counts
    pub include_counts: bool,
}

impl OutputConfig {
    /// Creates a config that writes only sender and content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that writes every available field.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_counts: true,
        }
    }

    /// Enables timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    /// Enables word and character counts.
    #[must_use]
    pub fn with_counts(mut self) -> Self {
        self.include_counts = true;
        self
    }
}
