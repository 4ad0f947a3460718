use regex::Regex;
use std::sync::OnceLock;

fn users_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\d+)\s*users?\b").unwrap())
}

fn integer_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Infer the virtual-user count embedded in a source's descriptive text,
/// e.g. "5 Users - Ramp-up" -> 5.
///
/// Strategies in priority order:
/// 1. an integer followed by "user"/"users" (case-insensitive, word-bounded);
/// 2. the last integer appearing anywhere in the text;
/// 3. the default of 1.
/// Never fails: unparsable or absent text yields 1, and any matched value is
/// clamped to at least 1.
pub fn infer_concurrency_factor(label_text: Option<&str>) -> u32 {
    let Some(text) = label_text else { return 1 };

    if let Some(caps) = users_pattern().captures(text) {
        return caps[1].parse::<u32>().map_or(1, |n| n.max(1));
    }
    if let Some(last) = integer_pattern().find_iter(text).last() {
        return last.as_str().parse::<u32>().map_or(1, |n| n.max(1));
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_keyword_wins() {
        assert_eq!(infer_concurrency_factor(Some("50 Users - Ramp-up")), 50);
        assert_eq!(infer_concurrency_factor(Some("run with 8 user threads")), 8);
        assert_eq!(infer_concurrency_factor(Some("12USERS")), 12);
    }

    #[test]
    fn falls_back_to_last_integer() {
        assert_eq!(infer_concurrency_factor(Some("Group 3 (x7)")), 7);
        assert_eq!(infer_concurrency_factor(Some("v2 baseline")), 2);
    }

    #[test]
    fn defaults_to_one() {
        assert_eq!(infer_concurrency_factor(Some("no numbers here")), 1);
        assert_eq!(infer_concurrency_factor(Some("")), 1);
        assert_eq!(infer_concurrency_factor(None), 1);
    }

    #[test]
    fn zero_clamps_to_one() {
        assert_eq!(infer_concurrency_factor(Some("0 users")), 1);
        assert_eq!(infer_concurrency_factor(Some("warmup 0")), 1);
    }

    #[test]
    fn overflow_falls_back_to_one() {
        assert_eq!(
            infer_concurrency_factor(Some("99999999999999999999 users")),
            1
        );
    }

    #[test]
    fn users_keyword_beats_later_integers() {
        assert_eq!(infer_concurrency_factor(Some("5 users, attempt 9")), 5);
    }
}
