use once_cell::sync::Lazy;

use super::rules::{ResponseRule, RULES};

/// [`RULES`], most specific first. Built once on first use.
pub static SORTED_RULES: Lazy<Vec<ResponseRule>> = Lazy::new(|| {
    let mut rules = RULES.to_vec();
    // `sort_by` is stable, so equally specific rules keep their table order
    rules.sort_by(|a, b| b.specificity().cmp(&a.specificity()));
    rules
});

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True if `phrase` occurs in `text` with no word character directly before or after it.
pub fn contains_word(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    text.match_indices(phrase).any(|(start, _)| {
        let end = start + phrase.len();
        let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
        let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
        before_ok && after_ok
    })
}

pub fn contains_any_word(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| contains_word(text, p))
}

pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

/// The first rule, in specificity order, with a keyword that appears in `text` as a whole word.
pub fn find_rule(text: &str) -> Option<&'static ResponseRule> {
    SORTED_RULES.iter().find(|rule| contains_any_word(text, rule.keywords))
}
