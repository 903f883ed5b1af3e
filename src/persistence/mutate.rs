//! Line rewriting.
//!
//! Every mutation replaces only the annotation substrings it targets and
//! keeps the rest of the line verbatim, including unrelated annotations.

use super::lexer::{checkbox, content_prefix, tokenize, Token, TokenKind};
use crate::domain::Quadrant;
use chrono::NaiveDate;

/// How strictly the line found at mutation time must match the scanned one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch {
    /// Whole line identical
    Exact,
    /// Identical up to the first annotation token
    Prefix,
}

impl LineMatch {
    pub fn matches(&self, current: &str, expected: &str) -> bool {
        match self {
            Self::Exact => current == expected,
            Self::Prefix => content_prefix(current) == content_prefix(expected),
        }
    }
}

fn find_tag<'t>(tokens: &'t [Token], wanted: &str) -> Option<(&'t Token, bool)> {
    let mut inline = None;
    for token in tokens {
        if let TokenKind::Tag { key, bracketed, .. } = &token.kind {
            if key == wanted {
                if *bracketed {
                    return Some((token, true));
                }
                inline.get_or_insert((token, false));
            }
        }
    }
    inline
}

fn legacy_counter(tokens: &[Token]) -> Option<&Token> {
    tokens
        .iter()
        .find(|t| matches!(t.kind, TokenKind::LegacyCounter(_)))
}

fn splice(line: &str, token: &Token, replacement: &str) -> String {
    format!(
        "{}{}{}",
        &line[..token.span.start],
        replacement,
        &line[token.span.end..]
    )
}

/// Append a bracketed tag, keeping a trailing legacy `[N]` counter last
fn append_tag(line: &str, tokens: &[Token], tag: &str) -> String {
    if let Some(legacy) = legacy_counter(tokens) {
        let head = line[..legacy.span.start].trim_end();
        return format!("{} {} {}", head, tag, &line[legacy.span.start..]);
    }
    format!("{} {}", line.trim_end(), tag)
}

/// Set `key` to `value`, replacing the existing tag in place (bracketed tags
/// first, then inline ones, keeping their spelling) or appending
/// ` [key::value]`.
pub fn set_tag(line: &str, key: &str, value: &str) -> String {
    let tokens = tokenize(line);
    match find_tag(&tokens, key) {
        Some((token, true)) => splice(line, token, &format!("[{}::{}]", key, value)),
        Some((token, false)) => splice(line, token, &format!("{}::{}", key, value)),
        None => append_tag(line, &tokens, &format!("[{}::{}]", key, value)),
    }
}

/// Write an accumulated counter value.
///
/// A legacy trailing `[N]` is migrated to `[success::N]` in place.
pub fn set_counter(line: &str, value: i64) -> String {
    let tokens = tokenize(line);
    let tag = format!("[success::{}]", value);

    if find_tag(&tokens, "success").is_some() {
        return set_tag(line, "success", &value.to_string());
    }
    if let Some(legacy) = legacy_counter(&tokens) {
        return splice(line, legacy, &tag);
    }
    append_tag(line, &tokens, &tag)
}

/// Record a habit completion date
pub fn set_last_done(line: &str, day: NaiveDate) -> String {
    set_tag(line, "last-done", &day.format("%Y-%m-%d").to_string())
}

/// Write streak fields.
///
/// `streak_date` is omitted on a reset so that a completion later the same
/// day still starts a fresh streak.
pub fn set_streak(line: &str, streak: u32, max_streak: u32, streak_date: Option<NaiveDate>) -> String {
    let mut line = line.to_string();
    if let Some(day) = streak_date {
        line = set_tag(&line, "last-streak-date", &day.format("%Y-%m-%d").to_string());
    }
    line = set_tag(&line, "streak", &streak.to_string());
    set_tag(&line, "max-streak", &max_streak.to_string())
}

/// Rewrite the importance and urgency tags so the line lands in `quadrant`
pub fn set_quadrant(line: &str, quadrant: Quadrant) -> String {
    let (importance, urgency) = quadrant.levels();
    let line = set_tag(line, "importance", importance.to_tag());
    set_tag(&line, "urgency", urgency.to_tag())
}

/// Tick the checkbox of an open checklist line
pub fn mark_done(line: &str) -> Option<String> {
    let mark = checkbox(line)?;
    if !mark.open {
        return None;
    }
    Some(format!(
        "{}[x]{}",
        &line[..mark.mark.start],
        &line[mark.mark.end..]
    ))
}

/// Text of a 1-based line, without its line terminator
pub fn line_at(content: &str, line_number: usize) -> Option<&str> {
    let raw = content.split('\n').nth(line_number.checked_sub(1)?)?;
    Some(raw.strip_suffix('\r').unwrap_or(raw))
}

/// Replace a single 1-based line, keeping every other byte of the document
pub fn replace_line(content: &str, line_number: usize, new_text: &str) -> Option<String> {
    let index = line_number.checked_sub(1)?;
    let mut lines: Vec<&str> = content.split('\n').collect();
    let old = *lines.get(index)?;

    // A trailing newline yields an empty last piece that is not a real line
    if index == lines.len() - 1 && old.is_empty() && content.ends_with('\n') {
        return None;
    }

    let replacement = if old.ends_with('\r') {
        format!("{}\r", new_text)
    } else {
        new_text.to_string()
    };
    lines[index] = &replacement;
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::lexer::lex;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_increment_scenario() {
        let line = "- [ ] Meditate [accumulated::true] [success::7]";
        assert_eq!(set_counter(line, 8), "- [ ] Meditate [accumulated::true] [success::8]");
    }

    #[test]
    fn test_legacy_counter_migrates_in_place() {
        let line = "- [ ] Pushups 📈 [12]";
        assert_eq!(set_counter(line, 13), "- [ ] Pushups 📈 [success::13]");
    }

    #[test]
    fn test_counter_appended_when_missing() {
        let line = "- [ ] Pushups 📈";
        assert_eq!(set_counter(line, 1), "- [ ] Pushups 📈 [success::1]");
    }

    #[test]
    fn test_negative_counter_written() {
        let line = "- [ ] Snacks [accumulated::true] [success::2]";
        assert_eq!(set_counter(line, -1), "- [ ] Snacks [accumulated::true] [success::-1]");
    }

    #[test]
    fn test_set_tag_keeps_other_content() {
        let line = "- [ ] Run **hard** 🔁 [streak::4] ⏳20 #health";
        assert_eq!(
            set_tag(line, "streak", "5"),
            "- [ ] Run **hard** 🔁 [streak::5] ⏳20 #health"
        );
    }

    #[test]
    fn test_set_tag_case_insensitive_key_is_normalised() {
        let line = "- [ ] Run 🔁 [STREAK::4]";
        assert_eq!(set_tag(line, "streak", "5"), "- [ ] Run 🔁 [streak::5]");
    }

    #[test]
    fn test_set_tag_replaces_inline_form() {
        let line = "- [ ] Report importance::low";
        assert_eq!(set_tag(line, "importance", "high"), "- [ ] Report importance::high");
    }

    #[test]
    fn test_append_keeps_legacy_counter_last() {
        let line = "- [ ] Pushups 📈 [12]";
        let updated = set_tag(line, "last-done", "2025-06-08");
        assert_eq!(updated, "- [ ] Pushups 📈 [last-done::2025-06-08] [12]");
        assert_eq!(lex(&updated).counter, Some(12));
    }

    #[test]
    fn test_streak_scenario() {
        let line = "- [ ] Run 🔁 [last-done::2025-06-07] [last-streak-date::2025-06-07] [streak::4]";
        let today = date("2025-06-08");
        let line = set_last_done(line, today);
        let line = set_streak(&line, 5, 5, Some(today));
        assert_eq!(
            line,
            "- [ ] Run 🔁 [last-done::2025-06-08] [last-streak-date::2025-06-08] [streak::5] [max-streak::5]"
        );
    }

    #[test]
    fn test_streak_reset_keeps_streak_date() {
        let line = "- [ ] Run 🔁 [last-done::2025-06-01] [last-streak-date::2025-06-01] [streak::4] [max-streak::4]";
        assert_eq!(
            set_streak(line, 0, 4, None),
            "- [ ] Run 🔁 [last-done::2025-06-01] [last-streak-date::2025-06-01] [streak::0] [max-streak::4]"
        );
    }

    #[test]
    fn test_set_quadrant() {
        let line = "- [ ] Report ⭐ [urgency::high]";
        let moved = set_quadrant(line, Quadrant::Eliminate);
        assert_eq!(moved, "- [ ] Report ⭐ [urgency::low] [importance::low]");
        let a = lex(&moved);
        assert_eq!(Quadrant::from_levels(a.importance.unwrap(), a.urgency.unwrap()), Quadrant::Eliminate);
    }

    #[test]
    fn test_mark_done() {
        assert_eq!(mark_done("  - [ ] Report ⭐").as_deref(), Some("  - [x] Report ⭐"));
        assert_eq!(mark_done("- [x] Report ⭐"), None);
        assert_eq!(mark_done("Report ⭐"), None);
    }

    #[test]
    fn test_line_match() {
        let before = "- [ ] Meditate [accumulated::true] [success::7]";
        let after = "- [ ] Meditate [accumulated::true] [success::9]";
        assert!(LineMatch::Prefix.matches(after, before));
        assert!(!LineMatch::Exact.matches(after, before));
        assert!(!LineMatch::Prefix.matches("- [ ] Meditation 📈", before));
    }

    #[test]
    fn test_line_at() {
        let content = "a\r\nb\nc";
        assert_eq!(line_at(content, 1), Some("a"));
        assert_eq!(line_at(content, 3), Some("c"));
        assert_eq!(line_at(content, 4), None);
        assert_eq!(line_at(content, 0), None);
    }

    #[test]
    fn test_replace_line_preserves_document() {
        let content = "# Habits\r\n- [ ] Run [streak::1]\r\nfooter\r\n";
        let updated = replace_line(content, 2, "- [ ] Run [streak::2]").unwrap();
        assert_eq!(updated, "# Habits\r\n- [ ] Run [streak::2]\r\nfooter\r\n");

        let content = "a\nb";
        assert_eq!(replace_line(content, 2, "c").unwrap(), "a\nc");
        assert_eq!(replace_line("a\n", 2, "x"), None);
        assert_eq!(replace_line("a\n", 5, "x"), None);
    }
}
