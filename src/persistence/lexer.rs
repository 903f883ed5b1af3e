//! Tokenizer for inline task annotations.
//!
//! Every field has two spellings: a bracketed `[key::value]` tag and an emoji
//! shorthand (or, for counters, the legacy trailing `[N]`). The line is
//! tokenized once, left to right, and fields are then resolved with a fixed
//! precedence: bracketed tag, then inline `key::value`, then shorthand.

use crate::domain::{HabitType, Level};
use chrono::NaiveDate;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

pub const IMPORTANCE_GLYPH: char = '⭐';
pub const URGENCY_GLYPH: char = '🔥';
pub const HABIT_GLYPH: char = '🔁';
pub const ACCUMULATED_GLYPH: char = '📈';
/// Shared by duration (`⏳30`) and scheduled date (`⏳ 2025-06-08`)
pub const HOURGLASS_GLYPH: char = '⏳';
pub const START_GLYPH: char = '➕';

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
          \[\s*(?P<key>[a-z][a-z-]*)\s*::\s*(?P<value>[^\[\]]*?)\s*\]
        | ⏳\s*(?P<scheduled>\d{4}-\d{2}-\d{2})
        | ⏳(?P<duration>\d+)
        | ➕\s*(?P<start>\d{4}-\d{2}-\d{2})
        | (?P<glyph>⭐|🔥|🔁|📈)\x{FE0F}?
        | \[(?P<legacy>\d+)\]\s*$
        | \b(?P<inline_key>[a-z][a-z-]*)::(?P<inline_value>[^\s\[\]]+)
        ",
    )
    .expect("annotation token pattern is valid")
});

static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*- \[(?P<mark>[ xX])\]").expect("checkbox pattern is valid"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// Shorthand glyphs that carry no trailing value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Importance,
    Urgency,
    Habit,
    Accumulated,
}

impl Glyph {
    fn from_glyph(s: &str) -> Option<Self> {
        match s.chars().next()? {
            IMPORTANCE_GLYPH => Some(Self::Importance),
            URGENCY_GLYPH => Some(Self::Urgency),
            HABIT_GLYPH => Some(Self::Habit),
            ACCUMULATED_GLYPH => Some(Self::Accumulated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `[key::value]` when `bracketed`, bare `key::value` otherwise.
    /// Keys are lowercased; values are kept verbatim.
    Tag {
        key: String,
        value: String,
        bracketed: bool,
    },
    Glyph(Glyph),
    Duration(u32),
    Scheduled(NaiveDate),
    Start(NaiveDate),
    /// Trailing `[N]` at the end of the line
    LegacyCounter(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range of the token in the line
    pub span: Range<usize>,
}

/// Split a line into annotation tokens, in order of appearance.
///
/// Date-shaped literals that are not real calendar dates are consumed but
/// produce no token.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for caps in TOKEN_RE.captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let span = whole.range();

        let kind = if let (Some(key), Some(value)) = (caps.name("key"), caps.name("value")) {
            tag_token(key.as_str(), value.as_str(), true)
        } else if let Some(m) = caps.name("scheduled") {
            parse_date(m.as_str()).map(TokenKind::Scheduled)
        } else if let Some(m) = caps.name("duration") {
            m.as_str().parse().ok().map(TokenKind::Duration)
        } else if let Some(m) = caps.name("start") {
            parse_date(m.as_str()).map(TokenKind::Start)
        } else if let Some(m) = caps.name("glyph") {
            Glyph::from_glyph(m.as_str()).map(TokenKind::Glyph)
        } else if let Some(m) = caps.name("legacy") {
            m.as_str().parse().ok().map(TokenKind::LegacyCounter)
        } else if let (Some(key), Some(value)) = (caps.name("inline_key"), caps.name("inline_value")) {
            tag_token(key.as_str(), value.as_str(), false)
        } else {
            None
        };

        if let Some(kind) = kind {
            tokens.push(Token { kind, span });
        }
    }

    tokens
}

/// Keys this lexer understands; other `key::value` pairs are ordinary text
pub const KNOWN_KEYS: &[&str] = &[
    "importance",
    "urgency",
    "duration",
    "habit",
    "accumulated",
    "success",
    "last-done",
    "streak",
    "max-streak",
    "last-streak-date",
    "attribute",
];

fn tag_token(key: &str, value: &str, bracketed: bool) -> Option<TokenKind> {
    let key = key.to_lowercase();
    if !KNOWN_KEYS.contains(&key.as_str()) {
        return None;
    }
    Some(TokenKind::Tag {
        key,
        value: value.to_string(),
        bracketed,
    })
}

/// Parse a strict `YYYY-MM-DD` literal
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !DATE_RE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Checklist marker state of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub open: bool,
    /// Byte range of the `[ ]` / `[x]` marker
    pub mark: Range<usize>,
}

/// Recognise a `- [ ]` / `- [x]` checklist line
pub fn checkbox(line: &str) -> Option<Checkbox> {
    let caps = CHECKBOX_RE.captures(line)?;
    let mark = caps.name("mark")?;
    Some(Checkbox {
        open: mark.as_str() == " ",
        mark: mark.start() - 1..mark.end() + 1,
    })
}

/// Every field the lexer recognises, each one absent unless found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub importance: Option<Level>,
    pub urgency: Option<Level>,
    pub duration_minutes: Option<u32>,
    pub habit_type: Option<HabitType>,
    pub accumulated: Option<bool>,
    /// `[success::N]` or the legacy trailing `[N]`
    pub counter: Option<i64>,
    pub last_done: Option<NaiveDate>,
    pub streak: Option<u32>,
    pub max_streak: Option<u32>,
    pub last_streak_date: Option<NaiveDate>,
    pub scheduled: Option<NaiveDate>,
    pub start: Option<NaiveDate>,
    pub attribute: Option<String>,
    /// Byte offset of the first annotation token
    pub boundary: Option<usize>,
}

/// Field values found at one precedence level
#[derive(Default)]
struct Layer {
    importance: Option<Level>,
    urgency: Option<Level>,
    duration_minutes: Option<u32>,
    habit_type: Option<HabitType>,
    accumulated: Option<bool>,
    counter: Option<i64>,
    last_done: Option<NaiveDate>,
    streak: Option<u32>,
    max_streak: Option<u32>,
    last_streak_date: Option<NaiveDate>,
    attribute: Option<String>,
}

fn first<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

impl Layer {
    fn accept_tag(&mut self, key: &str, value: &str) {
        let value = value.trim();
        match key {
            "importance" => first(&mut self.importance, Level::from_tag(value)),
            "urgency" => first(&mut self.urgency, Level::from_tag(value)),
            "duration" => first(&mut self.duration_minutes, value.parse().ok()),
            "habit" => first(&mut self.habit_type, HabitType::from_tag(value)),
            "accumulated" => first(&mut self.accumulated, parse_bool(value)),
            "success" => first(&mut self.counter, parse_signed(value)),
            "last-done" => first(&mut self.last_done, parse_date(value)),
            "streak" => first(&mut self.streak, value.parse().ok()),
            "max-streak" => first(&mut self.max_streak, value.parse().ok()),
            "last-streak-date" => first(&mut self.last_streak_date, parse_date(value)),
            "attribute" => first(&mut self.attribute, parse_attribute(value)),
            _ => {}
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Signed integer with an optional explicit `+`
fn parse_signed(value: &str) -> Option<i64> {
    value.parse().ok()
}

fn parse_attribute(value: &str) -> Option<String> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return None;
    }
    Some(value.to_string())
}

/// Resolve all fields of a line
pub fn lex(line: &str) -> Annotations {
    let tokens = tokenize(line);

    let mut bracketed = Layer::default();
    let mut inline = Layer::default();
    let mut shorthand = Layer::default();
    let mut scheduled = None;
    let mut start = None;

    for token in &tokens {
        match &token.kind {
            TokenKind::Tag {
                key,
                value,
                bracketed: true,
            } => bracketed.accept_tag(key, value),
            TokenKind::Tag { key, value, .. } => inline.accept_tag(key, value),
            TokenKind::Glyph(Glyph::Importance) => first(&mut shorthand.importance, Some(Level::High)),
            TokenKind::Glyph(Glyph::Urgency) => first(&mut shorthand.urgency, Some(Level::High)),
            TokenKind::Glyph(Glyph::Habit) => first(&mut shorthand.habit_type, Some(HabitType::Daily)),
            TokenKind::Glyph(Glyph::Accumulated) => first(&mut shorthand.accumulated, Some(true)),
            TokenKind::Duration(minutes) => first(&mut shorthand.duration_minutes, Some(*minutes)),
            TokenKind::LegacyCounter(n) => first(&mut shorthand.counter, Some(*n)),
            TokenKind::Scheduled(date) => first(&mut scheduled, Some(*date)),
            TokenKind::Start(date) => first(&mut start, Some(*date)),
        }
    }

    Annotations {
        importance: bracketed.importance.or(inline.importance).or(shorthand.importance),
        urgency: bracketed.urgency.or(inline.urgency).or(shorthand.urgency),
        duration_minutes: bracketed
            .duration_minutes
            .or(inline.duration_minutes)
            .or(shorthand.duration_minutes),
        habit_type: bracketed.habit_type.or(inline.habit_type).or(shorthand.habit_type),
        accumulated: bracketed.accumulated.or(inline.accumulated).or(shorthand.accumulated),
        counter: bracketed.counter.or(inline.counter).or(shorthand.counter),
        last_done: bracketed.last_done.or(inline.last_done),
        streak: bracketed.streak.or(inline.streak),
        max_streak: bracketed.max_streak.or(inline.max_streak),
        last_streak_date: bracketed.last_streak_date.or(inline.last_streak_date),
        scheduled,
        start,
        attribute: bracketed.attribute.or(inline.attribute),
        boundary: tokens.first().map(|t| t.span.start),
    }
}

/// Line text up to the first annotation token, trailing whitespace removed.
///
/// Used to recognise a line after its annotation suffix has been rewritten.
pub fn content_prefix(line: &str) -> &str {
    let end = tokenize(line)
        .first()
        .map(|t| t.span.start)
        .unwrap_or(line.len());
    line[..end].trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_bracket_tags() {
        let a = lex("- [ ] Report [importance::high] [urgency::LOW] [duration::45]");
        assert_eq!(a.importance, Some(Level::High));
        assert_eq!(a.urgency, Some(Level::Low));
        assert_eq!(a.duration_minutes, Some(45));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let a = lex("- [ ] Report [Importance::High] [HABIT::Weekly]");
        assert_eq!(a.importance, Some(Level::High));
        assert_eq!(a.habit_type, Some(HabitType::Weekly));
    }

    #[test]
    fn test_emoji_shorthands() {
        let a = lex("- [ ] Report 🔥⭐ ⏳30 🔁 📈");
        assert_eq!(a.importance, Some(Level::High));
        assert_eq!(a.urgency, Some(Level::High));
        assert_eq!(a.duration_minutes, Some(30));
        assert_eq!(a.habit_type, Some(HabitType::Daily));
        assert_eq!(a.accumulated, Some(true));
    }

    #[test]
    fn test_variation_selector_is_ignored() {
        let a = lex("- [ ] Report ⭐\u{FE0F} done");
        assert_eq!(a.importance, Some(Level::High));
    }

    #[test]
    fn test_bracket_wins_over_emoji() {
        let a = lex("- [ ] Report ⭐ [importance::low] 🔁 [habit::weekly]");
        assert_eq!(a.importance, Some(Level::Low));
        assert_eq!(a.habit_type, Some(HabitType::Weekly));
    }

    #[test]
    fn test_invalid_bracket_value_falls_back_to_emoji() {
        let a = lex("- [ ] Report ⭐ [importance::medium]");
        assert_eq!(a.importance, Some(Level::High));
    }

    #[test]
    fn test_inline_form() {
        let a = lex("- [ ] Report 🔥⭐ importance::high urgency::high");
        assert_eq!(a.importance, Some(Level::High));
        assert_eq!(a.urgency, Some(Level::High));

        let a = lex("- [ ] Report importance::low [importance::high]");
        assert_eq!(a.importance, Some(Level::High));
    }

    #[test]
    fn test_hourglass_disambiguation() {
        let a = lex("- [ ] Dentist ⏳ 2025-06-10");
        assert_eq!(a.scheduled, Some(date("2025-06-10")));
        assert_eq!(a.duration_minutes, None);

        let a = lex("- [ ] Dentist ⏳2025-06-10");
        assert_eq!(a.scheduled, Some(date("2025-06-10")));
        assert_eq!(a.duration_minutes, None);

        let a = lex("- [ ] Dentist ⏳25");
        assert_eq!(a.scheduled, None);
        assert_eq!(a.duration_minutes, Some(25));

        let a = lex("- [ ] Dentist ⏳ 25");
        assert_eq!(a.scheduled, None);
        assert_eq!(a.duration_minutes, None);
    }

    #[test]
    fn test_both_hourglass_forms_on_one_line() {
        let a = lex("- [ ] Dentist ⏳45 ⏳ 2025-06-10");
        assert_eq!(a.duration_minutes, Some(45));
        assert_eq!(a.scheduled, Some(date("2025-06-10")));
    }

    #[test]
    fn test_start_date() {
        let a = lex("- [ ] Course ➕ 2025-01-15");
        assert_eq!(a.start, Some(date("2025-01-15")));
    }

    #[test]
    fn test_invalid_calendar_date_is_absent() {
        let a = lex("- [ ] Course ➕ 2025-02-30 [last-done::2025-13-01]");
        assert_eq!(a.start, None);
        assert_eq!(a.last_done, None);
    }

    #[test]
    fn test_counter_forms() {
        assert_eq!(lex("- [ ] Pushups [success::-3]").counter, Some(-3));
        assert_eq!(lex("- [ ] Pushups [success::+4]").counter, Some(4));
        assert_eq!(lex("- [ ] Pushups 📈 [12]").counter, Some(12));
        assert_eq!(lex("- [ ] Pushups [12] more text").counter, None);
        assert_eq!(lex("- [ ] Pushups [success::x]").counter, None);
        assert_eq!(lex("- [ ] Pushups [success::-]").counter, None);
    }

    #[test]
    fn test_success_tag_wins_over_legacy() {
        let a = lex("- [ ] Pushups [success::5] [9]");
        assert_eq!(a.counter, Some(5));
    }

    #[test]
    fn test_streak_fields() {
        let a = lex("- [ ] Run 🔁 [last-done::2025-06-07] [last-streak-date::2025-06-07] [streak::4] [max-streak::9]");
        assert_eq!(a.last_done, Some(date("2025-06-07")));
        assert_eq!(a.last_streak_date, Some(date("2025-06-07")));
        assert_eq!(a.streak, Some(4));
        assert_eq!(a.max_streak, Some(9));
    }

    #[test]
    fn test_attribute_name() {
        assert_eq!(lex("- [ ] Read [attribute::pages]").attribute, Some("pages".to_string()));
        assert_eq!(lex("- [ ] Read [attribute::two words]").attribute, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let a = lex("- [ ] Report [importance::high] [importance::low]");
        assert_eq!(a.importance, Some(Level::High));
    }

    #[test]
    fn test_plain_line_has_no_annotations() {
        let a = lex("- [ ] Buy milk");
        assert_eq!(a, Annotations::default());
    }

    #[test]
    fn test_checkbox_is_not_a_token() {
        assert!(tokenize("- [ ] Buy milk").is_empty());
        assert!(tokenize("- [x] Buy milk").is_empty());
    }

    #[test]
    fn test_checkbox() {
        assert_eq!(checkbox("- [ ] Task").map(|c| c.open), Some(true));
        assert_eq!(checkbox("  - [x] Task").map(|c| c.open), Some(false));
        assert_eq!(checkbox("- [X] Task").map(|c| c.mark), Some(2..5));
        assert!(checkbox("* [ ] Task").is_none());
        assert!(checkbox("Task - [ ]").is_none());
    }

    #[test]
    fn test_content_prefix() {
        assert_eq!(
            content_prefix("- [ ] Meditate [accumulated::true] [success::7]"),
            "- [ ] Meditate"
        );
        assert_eq!(content_prefix("- [ ] Report 🔥⭐ importance::high"), "- [ ] Report");
        assert_eq!(content_prefix("- [ ] Buy milk"), "- [ ] Buy milk");
    }

    #[test]
    fn test_unknown_keys_are_plain_text() {
        assert_eq!(content_prefix("- [ ] Learn std::vector ⭐"), "- [ ] Learn std::vector");
        assert_eq!(content_prefix("- [ ] Read [source::book] 🔁"), "- [ ] Read [source::book]");
    }

    #[test]
    fn test_token_spans() {
        let line = "- [ ] Run [streak::4] 🔁";
        let tokens = tokenize(line);
        assert_eq!(tokens.len(), 2);
        assert_eq!(&line[tokens[0].span.clone()], "[streak::4]");
        assert_eq!(&line[tokens[1].span.clone()], "🔁");
    }
}
