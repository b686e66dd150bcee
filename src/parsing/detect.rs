//! Format family detection.
//!
//! Samples the first lines of a transcript and reports which timestamp family
//! dominates. The result only feeds the parsing report: every line is still
//! matched against every message-start pattern on its own.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Coarse timestamp layout families, in declaration (tie-break) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatFamily {
    /// `10/25/2023 9:15 AM`
    ///
    /// Declared before [`FormatFamily::Slash`]: every 12-hour slash line also
    /// matches the slash family, so declared later it could never win a tie.
    UsTwelveHour,
    /// `25/10/2023 09:15`
    Slash,
    /// `2023-10-25 09:15`
    Iso,
    /// `25.10.2023 09:15`
    Dot,
    /// `25-10-2023 09:15`
    Dash,
}

impl FormatFamily {
    /// Returns all families in declaration order.
    pub fn all() -> &'static [FormatFamily] {
        &[
            FormatFamily::UsTwelveHour,
            FormatFamily::Slash,
            FormatFamily::Iso,
            FormatFamily::Dot,
            FormatFamily::Dash,
        ]
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            FormatFamily::UsTwelveHour => "US Format (MM/DD/YYYY AM/PM)",
            FormatFamily::Slash => "Brazilian/European (DD/MM/YYYY)",
            FormatFamily::Iso => "ISO Format (YYYY-MM-DD)",
            FormatFamily::Dot => "Android Dot (DD.MM.YYYY)",
            FormatFamily::Dash => "Dash Format (DD-MM-YYYY)",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            FormatFamily::UsTwelveHour => {
                r"\b\d{1,2}/\d{1,2}/\d{2,4}\b.*\d\s*[AaPp]\.?\s?[Mm]\b"
            }
            FormatFamily::Slash => r"\b\d{1,2}/\d{1,2}/\d{2,4}\b",
            FormatFamily::Iso => r"\b\d{4}-\d{1,2}-\d{1,2}\b",
            FormatFamily::Dot => r"\b\d{1,2}\.\d{1,2}\.\d{2,4}\b",
            // The leading \b keeps ISO dates out: `2023-10-25` has no
            // boundary before `23-10-25`.
            FormatFamily::Dash => r"\b\d{1,2}-\d{1,2}-\d{2,4}\b",
        }
    }
}

impl fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of format detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectedFormat {
    /// One family matched the most sampled lines.
    Family(FormatFamily),
    /// No sampled line matched any family.
    Unknown,
}

impl DetectedFormat {
    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            DetectedFormat::Family(family) => family.label(),
            DetectedFormat::Unknown => "Mixed/Unknown",
        }
    }

    /// Returns the detected family, if any.
    pub fn family(self) -> Option<FormatFamily> {
        match self {
            DetectedFormat::Family(family) => Some(family),
            DetectedFormat::Unknown => None,
        }
    }
}

impl fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DetectedFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Compiled detection pattern for one family.
struct FamilyDetector {
    family: FormatFamily,
    regex: Regex,
}

static DETECTORS: LazyLock<Vec<FamilyDetector>> = LazyLock::new(|| {
    FormatFamily::all()
        .iter()
        .map(|&family| FamilyDetector {
            family,
            regex: Regex::new(family.pattern()).expect("format family pattern must compile"),
        })
        .collect()
});

/// Detects the dominant format family in `lines`.
///
/// Callers pass a bounded prefix of the transcript. The family matching the
/// most lines wins; ties go to the family declared first.
///
/// # Example
///
/// ```rust
/// use chatline::parsing::{DetectedFormat, FormatFamily, detect_format};
///
/// let lines = ["25.10.2023, 09:15 - Hans: Hallo", "25.10.2023, 09:17 - Lisa: Hi"];
/// assert_eq!(detect_format(&lines), DetectedFormat::Family(FormatFamily::Dot));
/// assert_eq!(detect_format(&["hello"]), DetectedFormat::Unknown);
/// ```
pub fn detect_format(lines: &[&str]) -> DetectedFormat {
    let mut scores = vec![0usize; DETECTORS.len()];

    for line in lines {
        for (i, detector) in DETECTORS.iter().enumerate() {
            if detector.regex.is_match(line) {
                scores[i] += 1;
            }
        }
    }

    let Some(&max_score) = scores.iter().max() else {
        return DetectedFormat::Unknown;
    };
    if max_score == 0 {
        return DetectedFormat::Unknown;
    }

    scores
        .iter()
        .position(|&s| s == max_score)
        .map_or(DetectedFormat::Unknown, |i| {
            DetectedFormat::Family(DETECTORS[i].family)
        })
}
