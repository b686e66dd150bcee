//! Timestamp resolution for chat transcripts.
//!
//! Exports write timestamps the way the exporting phone was configured:
//! `25/10/2023, 09:15`, `10/25/23 9:15 PM`, `[15.01.24, 10:30:45]`,
//! `2023-10-25 09:15`, `25/10/2023, 9:15 p. m.`, and many more.
//!
//! [`TimestampResolver`] first tries an ordered list of exact chrono layouts
//! and, when none of them parses the whole string, falls back to a numeric
//! heuristic over the digit runs in the string.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::config::DateOrder;
use crate::error::TimestampError;
use crate::message::TimestampConfidence;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern must compile"));

static DATE_TIME_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("comma pattern must compile"));

// am, AM, a.m., a. m., pm ... at the very end
static MERIDIEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*([ap])\.?\s?m\.?$").expect("meridiem pattern must compile")
});

// Two-digit years come before four-digit ones: chrono's `%Y` also accepts
// two digits and would read `25/10/23` as the year 23.
const DAY_FIRST_DATES: [&str; 6] = [
    "%d/%m/%y", "%d/%m/%Y", "%d.%m.%y", "%d.%m.%Y", "%d-%m-%y", "%d-%m-%Y",
];

const MONTH_FIRST_DATES: [&str; 6] = [
    "%m/%d/%y", "%m/%d/%Y", "%m.%d.%y", "%m.%d.%Y", "%m-%d-%y", "%m-%d-%Y",
];

// Always last: `%Y-%m-%d` would accept `25-10-23` as year 25.
const YEAR_FIRST_DATES: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

// Input is normalized so that a comma before the time is always ", ".
const DATE_TIME_SEPARATORS: [&str; 2] = [" ", ", "];

// 24-hour layouts first; they reject a trailing meridiem, so a 12-hour string
// always falls through to the `%p` layouts.
const TIMES: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M:%S %p"];

/// How a timestamp was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMethod {
    /// Parsed by the layout at this index of [`TimestampResolver::layouts`].
    Layout(usize),
    /// Reconstructed by the numeric heuristic.
    Heuristic,
}

/// A successfully resolved timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved wall-clock time, tagged as UTC.
    pub instant: DateTime<Utc>,
    /// Which path produced it.
    pub method: ResolutionMethod,
}

impl Resolution {
    /// Confidence to attach to a message built from this resolution.
    pub fn confidence(&self) -> TimestampConfidence {
        match self.method {
            ResolutionMethod::Layout(_) => TimestampConfidence::Exact,
            ResolutionMethod::Heuristic => TimestampConfidence::Heuristic,
        }
    }
}

/// Resolves timestamp substrings into date-times.
///
/// Resolution is deterministic and side-effect free: the same input always
/// yields the same outcome, and failure is a [`TimestampError`] value.
///
/// Two-digit years below 50 are 20xx and the rest 19xx, whichever path
/// resolves them. chrono's own `%y` window (00-68 as 20xx) is narrowed to
/// match the heuristic.
///
/// # Example
///
/// ```rust
/// use chatline::parsing::TimestampResolver;
/// use chrono::{TimeZone, Utc};
///
/// let resolver = TimestampResolver::new();
/// let resolved = resolver.resolve("25/10/2023, 09:15").unwrap();
/// assert_eq!(resolved.instant, Utc.with_ymd_and_hms(2023, 10, 25, 9, 15, 0).unwrap());
///
/// // Ambiguous dates are day-first unless configured otherwise
/// let resolved = resolver.resolve("03/04/2023 10:00").unwrap();
/// assert_eq!(resolved.instant, Utc.with_ymd_and_hms(2023, 4, 3, 10, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct TimestampResolver {
    order: DateOrder,
    layouts: Vec<String>,
}

impl TimestampResolver {
    /// Creates a day-first resolver.
    pub fn new() -> Self {
        Self::with_date_order(DateOrder::DayFirst)
    }

    /// Creates a resolver with the given day/month tie-break.
    ///
    /// The tie-break decides which date group is tried first, and which field
    /// the heuristic treats as the day when both could be.
    pub fn with_date_order(order: DateOrder) -> Self {
        let (primary, secondary) = match order {
            DateOrder::DayFirst => (&DAY_FIRST_DATES, &MONTH_FIRST_DATES),
            DateOrder::MonthFirst => (&MONTH_FIRST_DATES, &DAY_FIRST_DATES),
        };

        let dates = primary
            .iter()
            .chain(secondary.iter())
            .chain(YEAR_FIRST_DATES.iter());

        let mut layouts = Vec::new();
        for date in dates {
            for sep in DATE_TIME_SEPARATORS {
                for time in TIMES {
                    layouts.push(format!("{date}{sep}{time}"));
                }
            }
        }

        Self { order, layouts }
    }

    /// Returns the configured day/month tie-break.
    pub fn date_order(&self) -> DateOrder {
        self.order
    }

    /// Returns the layouts in the order they are tried.
    pub fn layouts(&self) -> &[String] {
        &self.layouts
    }

    /// Resolves a timestamp substring.
    pub fn resolve(&self, raw: &str) -> Result<Resolution, TimestampError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(TimestampError::Empty);
        }

        for (index, layout) in self.layouts.iter().enumerate() {
            let parsed = NaiveDateTime::parse_from_str(&normalized, layout)
                .ok()
                .and_then(|naive| pivot_two_digit_year(naive, layout));
            if let Some(naive) = parsed {
                return Ok(Resolution {
                    instant: naive.and_utc(),
                    method: ResolutionMethod::Layout(index),
                });
            }
        }

        let naive = self.resolve_heuristic(&normalized)?;
        Ok(Resolution {
            instant: naive.and_utc(),
            method: ResolutionMethod::Heuristic,
        })
    }

    /// Rebuilds a date-time from the digit runs of `normalized`.
    fn resolve_heuristic(&self, normalized: &str) -> Result<NaiveDateTime, TimestampError> {
        let out_of_range = || TimestampError::OutOfRange {
            input: normalized.to_string(),
        };

        let mut fields = Vec::new();
        for run in DIGIT_RUN.find_iter(normalized) {
            let value: u32 = run.as_str().parse().map_err(|_| out_of_range())?;
            fields.push(NumericField {
                value,
                width: run.as_str().len(),
            });
        }

        if fields.len() < 5 {
            return Err(TimestampError::TooFewFields {
                input: normalized.to_string(),
                found: fields.len(),
            });
        }

        let (first, second, third) = (fields[0], fields[1], fields[2]);
        let (year, month, day) = if first.looks_like_year() {
            (first.expand_year(), second.value, third.value)
        } else {
            let (day, month) = match (first.value > 12, second.value > 12) {
                (true, false) => (first.value, second.value),
                (false, true) => (second.value, first.value),
                _ => match self.order {
                    DateOrder::DayFirst => (first.value, second.value),
                    DateOrder::MonthFirst => (second.value, first.value),
                },
            };
            (third.expand_year(), month, day)
        };

        let mut hour = fields[3].value;
        let minute = fields[4].value;
        let second = fields.get(5).map_or(0, |f| f.value);

        if normalized.ends_with(" PM") && hour < 12 {
            hour += 12;
        } else if normalized.ends_with(" AM") && hour == 12 {
            hour = 0;
        }

        let year = i32::try_from(year).map_err(|_| out_of_range())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(out_of_range)
    }
}

impl Default for TimestampResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves `%y` years 2050..=2068 back a century.
fn pivot_two_digit_year(naive: NaiveDateTime, layout: &str) -> Option<NaiveDateTime> {
    if layout.contains("%y") && (2050..=2068).contains(&naive.year()) {
        naive.with_year(naive.year() - 100)
    } else {
        Some(naive)
    }
}

/// A digit run and how many digits it was written with.
#[derive(Debug, Clone, Copy)]
struct NumericField {
    value: u32,
    width: usize,
}

impl NumericField {
    fn looks_like_year(self) -> bool {
        self.width >= 3 || self.value > 31
    }

    /// Two-digit years below 50 are 20xx, the rest 19xx.
    fn expand_year(self) -> u32 {
        match (self.width, self.value) {
            (w, v) if w <= 2 && v < 50 => 2000 + v,
            (w, v) if w <= 2 => 1900 + v,
            (_, v) => v,
        }
    }
}

/// Canonical spacing: no brackets, single spaces, `", "` before the time,
/// and a trailing ` AM`/` PM`.
fn normalize(raw: &str) -> String {
    let stripped = raw
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let comma = DATE_TIME_COMMA.replace_all(&collapsed, ", ");

    MERIDIEM
        .replace(&comma, |caps: &regex::Captures<'_>| {
            if caps[1].eq_ignore_ascii_case("p") {
                " PM"
            } else {
                " AM"
            }
        })
        .into_owned()
}
