//! Message-start patterns.
//!
//! A message-start line carries a timestamp, a sender and the first line of
//! content. The patterns below are tried top to bottom and the first match
//! wins, so the order is part of the behavior: well-formed layouts come
//! first, the permissive catch-alls (which exist for regional variants nobody
//! anticipated) last. Each entry notes what it must win against.

use std::sync::LazyLock;

use regex::Regex;

/// `9:15`, `09:15:30`, `9:15 PM`, `9:15 p. m.`, `10:30:45\u{202f}AM`.
///
/// The trailing `\b` keeps senders like "Amy" from being read as a meridiem.
const TIME: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:\s*[AaPp]\.?\s?[Mm]\b\.?)?";

/// A named message-start pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartPattern {
    /// Short identifier, used in trace logs.
    pub name: &'static str,
    template: &'static str,
}

/// Ordered list of message-start patterns.
///
/// Every template captures `(timestamp, sender, content)`; `{TIME}` is
/// replaced by [`TIME`]. Senders stop at the first colon.
pub const START_PATTERNS: [StartPattern; 8] = [
    // `25/10/2023, 09:15 - Ann: Hi` and `10/25/23 9:15 PM - Ann: Hi`.
    // Android exports; by far the most common shape, so it goes first.
    StartPattern {
        name: "slash",
        template: r"^(\d{1,2}/\d{1,2}/\d{2,4},?\s+{TIME})\s*-\s*([^:]+):\s*(.+)$",
    },
    // `25.10.2023, 09:15 - Ann: Hi`
    StartPattern {
        name: "dot",
        template: r"^(\d{1,2}\.\d{1,2}\.\d{2,4},?\s+{TIME})\s*-\s*([^:]+):\s*(.+)$",
    },
    // `25-10-2023 09:15 - Ann: Hi`
    StartPattern {
        name: "dash",
        template: r"^(\d{1,2}-\d{1,2}-\d{2,4},?\s+{TIME})\s*-\s*([^:]+):\s*(.+)$",
    },
    // `2023-10-25 09:15 - Ann: Hi`. After the day-first shapes, which cannot
    // match a four-digit first field anyway.
    StartPattern {
        name: "iso",
        template: r"^(\d{4}[-/.]\d{1,2}[-/.]\d{1,2},?\s+{TIME})\s*-\s*([^:]+):\s*(.+)$",
    },
    // `[25/10/2023, 09:15:30] Ann: Hi` (iOS), with or without a dash after
    // the bracket.
    StartPattern {
        name: "bracketed",
        template: r"^\[(\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4},?\s+{TIME})\]\s*(?:-\s*)?([^:]+):\s*(.+)$",
    },
    // Catch-alls. The date is any run of digits and separators; the time
    // keeps its shape so that it cannot swallow the sender.
    //
    // `25/10/2023 09:15 - Ann: Hi` with an odd date, e.g. `2023.10.25.`
    StartPattern {
        name: "loose_dashed",
        template: r"^([\d/\-.]{6,11},?\s+{TIME})\s*-\s*([^:]+):\s*(.+)$",
    },
    // `[2023.10.25. 09:15] Ann: Hi`
    StartPattern {
        name: "loose_bracketed",
        template: r"^\[([\d/\-.]{6,11},?\s+{TIME})\]\s*(?:-\s*)?([^:]+):\s*(.+)$",
    },
    // `25/10/2023 09:15 Ann: Hi`. Last: without a dash or bracket anything
    // that starts with a date and a time qualifies.
    StartPattern {
        name: "loose",
        template: r"^([\d/\-.]{6,11},?\s+{TIME})\s+([^:]+):\s*(.+)$",
    },
];

static COMPILED: LazyLock<Vec<(StartPattern, Regex)>> = LazyLock::new(|| {
    START_PATTERNS
        .iter()
        .map(|&pattern| {
            let source = pattern.template.replace("{TIME}", TIME);
            let regex = Regex::new(&source).expect("message-start pattern must compile");
            (pattern, regex)
        })
        .collect()
});

/// The three parts of a message-start line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageStart<'a> {
    /// Name of the pattern that matched.
    pub pattern: &'static str,
    /// Timestamp text as written (brackets excluded).
    pub timestamp: &'a str,
    /// Sender name, trimmed.
    pub sender: &'a str,
    /// First line of content, trimmed.
    pub content: &'a str,
}

/// Matches `line` against the start patterns in order.
///
/// `line` is expected to be trimmed already. Returns `None` for continuation
/// lines and for lines nobody can attribute.
///
/// # Example
///
/// ```rust
/// use chatline::parsing::match_message_start;
///
/// let start = match_message_start("25/10/2023, 09:15 - Ann: Hi: there").unwrap();
/// assert_eq!(start.timestamp, "25/10/2023, 09:15");
/// assert_eq!(start.sender, "Ann");
/// assert_eq!(start.content, "Hi: there");
///
/// assert!(match_message_start("just some text").is_none());
/// ```
pub fn match_message_start(line: &str) -> Option<MessageStart<'_>> {
    COMPILED.iter().find_map(|(pattern, regex)| {
        let caps = regex.captures(line)?;
        let sender = caps.get(2)?.as_str().trim();
        let content = caps.get(3)?.as_str().trim();
        if sender.is_empty() || content.is_empty() {
            return None;
        }
        Some(MessageStart {
            pattern: pattern.name,
            timestamp: caps.get(1)?.as_str().trim(),
            sender,
            content,
        })
    })
}
