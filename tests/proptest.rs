//! Property-based tests for chatline.
//!
//! These tests generate random transcripts to find edge cases.

use proptest::prelude::*;

use chatline::config::DateOrder;
use chatline::parsing::{ResolutionMethod, TimestampResolver};
use chatline::prelude::*;
use chrono::{TimeZone, Utc};

/// One generated line of a transcript.
#[derive(Debug, Clone)]
enum Line {
    Start { sender: String, content: String },
    Notice,
    Continuation(String),
    Blank,
}

impl Line {
    fn render(&self, index: usize) -> String {
        let minute = index % 60;
        match self {
            Line::Start { sender, content } => {
                format!("25/10/2023, 09:{minute:02} - {sender}: {content}")
            }
            Line::Notice => format!("25/10/2023, 09:{minute:02} - Bob: <Media omitted>"),
            Line::Continuation(text) => text.clone(),
            Line::Blank => "   ".to_string(),
        }
    }
}

/// Generate a random line using fast strategies (no regex!)
fn arb_line() -> impl Strategy<Value = Line> {
    let senders = prop::sample::select(vec!["Alice", "Bob", "Иван", "João Silva", "User 🎉"]);
    let contents = prop::sample::select(vec![
        "Hello",
        "Hi there!",
        "Meeting at 10:30: ok",
        "Привет мир",
        "🎉🔥 emoji",
        "a; b, c",
    ]);
    let free_text = prop::sample::select(vec![
        "continued here",
        "Messages and calls are end-to-end encrypted.",
        "and another thing",
        "::",
        "12345",
    ]);

    prop_oneof![
        4 => (senders, contents).prop_map(|(s, c)| Line::Start {
            sender: s.to_string(),
            content: c.to_string(),
        }),
        1 => Just(Line::Notice),
        3 => free_text.prop_map(|t| Line::Continuation(t.to_string())),
        1 => Just(Line::Blank),
    ]
}

fn arb_transcript(max_lines: usize) -> impl Strategy<Value = (Vec<Line>, String)> {
    prop::collection::vec(arb_line(), 0..max_lines).prop_map(|lines| {
        let text = lines
            .iter()
            .enumerate()
            .map(|(i, line)| line.render(i))
            .collect::<Vec<_>>()
            .join("\n");
        (lines, text)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // ACCOUNTING PROPERTIES
    // ============================================

    /// Every non-empty line lands in exactly one bucket
    #[test]
    fn every_line_is_accounted_for((_, text) in arb_transcript(40)) {
        let t = TranscriptParser::new().parse_str(&text);
        let stats = t.stats();
        prop_assert_eq!(stats.accounted_lines(), stats.total_lines);
        prop_assert_eq!(stats.parsed_messages, t.messages().len());
    }

    /// Counters agree with the generated structure
    #[test]
    fn counters_match_generated_lines((lines, text) in arb_transcript(40)) {
        let t = TranscriptParser::new().parse_str(&text);
        let starts = lines.iter().filter(|l| matches!(l, Line::Start { .. })).count();
        let notices = lines.iter().filter(|l| matches!(l, Line::Notice)).count();
        let non_blank = lines.iter().filter(|l| !matches!(l, Line::Blank)).count();

        prop_assert_eq!(t.messages().len(), starts);
        prop_assert_eq!(t.stats().system_messages, notices);
        prop_assert_eq!(t.stats().total_lines, non_blank);
    }

    /// Participants are exactly the senders of stored messages
    #[test]
    fn participants_match_senders((_, text) in arb_transcript(40)) {
        let t = TranscriptParser::new().parse_str(&text);
        let senders: std::collections::BTreeSet<String> =
            t.messages().iter().map(|m| m.sender().to_string()).collect();
        prop_assert_eq!(&senders, t.participants());
    }

    /// Success rate is a percentage
    #[test]
    fn success_rate_in_range((_, text) in arb_transcript(40)) {
        let rate = TranscriptParser::new().parse_str(&text).report().success_rate;
        prop_assert!((0.0..=100.0).contains(&rate), "rate {}", rate);
    }

    // ============================================
    // SEGMENTATION PROPERTIES
    // ============================================

    /// A start followed by K plain lines yields one message with K+1 parts
    #[test]
    fn continuation_lines_join(k in 0usize..20) {
        let mut text = String::from("25/10/2023 09:15 - Ann: first");
        for i in 0..k {
            text.push_str(&format!("\npart{i}"));
        }

        let t = TranscriptParser::new().parse_str(&text);
        prop_assert_eq!(t.messages().len(), 1);
        prop_assert_eq!(t.stats().continuation_lines, k);
        prop_assert_eq!(t.stats().multiline_messages, usize::from(k > 0));

        let content = t.messages()[0].content();
        prop_assert_eq!(content.split(' ').count(), k + 1);
        for i in 0..k {
            let expected = format!("part{i}");
            prop_assert!(content.contains(&expected), "Missing part{}", i);
        }
    }

    /// Parsing is deterministic
    #[test]
    fn parsing_is_deterministic((_, text) in arb_transcript(30)) {
        let parser = TranscriptParser::new();
        let a = parser.parse_str(&text);
        let b = parser.parse_str(&text);
        prop_assert_eq!(a.messages(), b.messages());
        prop_assert_eq!(a.stats(), b.stats());
        prop_assert_eq!(a.detected_format(), b.detected_format());
    }

    // ============================================
    // TIMESTAMP PROPERTIES
    // ============================================

    /// Formatting a date-time with any layout and resolving it gives it back
    ///
    /// The day stays above 12 so that day-first and month-first layouts
    /// cannot both accept the same text, and the year stays inside the
    /// window two-digit years map to.
    #[test]
    fn layout_round_trip(
        year in 1950i32..2050,
        month in 1u32..=12,
        day in 13u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
        month_first in any::<bool>(),
    ) {
        let order = if month_first { DateOrder::MonthFirst } else { DateOrder::DayFirst };
        let resolver = TimestampResolver::with_date_order(order);
        let original = Utc.with_ymd_and_hms(year, month, day, hour, minute, second).unwrap();

        for layout in resolver.layouts() {
            // Only layouts carrying seconds can round-trip them
            let expected = if layout.contains("%S") {
                original
            } else {
                Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
            };

            let text = original.format(layout).to_string();
            let resolved = resolver.resolve(&text);
            prop_assert!(resolved.is_ok(), "layout {} failed on {}", layout, text);
            let resolved = resolved.unwrap();
            prop_assert_eq!(resolved.instant, expected, "layout {} via {}", layout, text);
            prop_assert!(matches!(resolved.method, ResolutionMethod::Layout(_)));
        }
    }

    /// Unambiguous heuristic input resolves the same under either date order
    #[test]
    fn heuristic_unambiguous_day(
        day in 13u32..=28,
        month in 1u32..=12,
        year in 2000i32..2040,
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let text = format!("{day} {month} {year} {hour} {minute}");
        let expected = Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap();

        for order in [DateOrder::DayFirst, DateOrder::MonthFirst] {
            let resolved = TimestampResolver::with_date_order(order).resolve(&text).unwrap();
            prop_assert_eq!(resolved.instant, expected);
            prop_assert_eq!(resolved.method, ResolutionMethod::Heuristic);
        }
    }

    /// Resolution never panics on arbitrary input
    #[test]
    fn resolve_never_panics(input in "\\PC{0,40}") {
        let _ = TimestampResolver::new().resolve(&input);
    }

    /// Parsing never panics on arbitrary input
    #[test]
    fn parse_never_panics(input in "\\PC{0,200}") {
        let t = TranscriptParser::new().parse_str(&input);
        prop_assert_eq!(t.stats().accounted_lines(), t.stats().total_lines);
    }
}
