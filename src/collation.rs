//! Name collation
//!
//! Guest names are mostly Hebrew, with some Latin. Hebrew letters are already
//! in alphabetical order by code point, so a collation key only has to remove
//! vowel points and accents, fold case, and fold final letter forms onto their
//! base letters.
//!
//! Ordering follows the Hebrew locale: non-letters, then Hebrew, then every
//! other script. Names equal up to case put lower case first.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Sort key for `name`.
pub fn collation_key(name: &str) -> String {
    name.trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(fold_final_form)
        .collect()
}

/// Compare two names by script and collation key, then case, then raw text.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (key_a, key_b) = (collation_key(a), collation_key(b));

    weights(&key_a)
        .cmp(weights(&key_b))
        .then_with(|| case_weights(a).cmp(case_weights(b)))
        .then_with(|| a.cmp(b))
}

fn weights(key: &str) -> impl Iterator<Item = (ScriptRank, char)> + '_ {
    key.chars().map(|c| (ScriptRank::of(c), c))
}

fn case_weights(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ScriptRank {
    Other,
    Hebrew,
    Foreign,
}

impl ScriptRank {
    fn of(c: char) -> Self {
        match c {
            '\u{0590}'..='\u{05FF}' | '\u{FB1D}'..='\u{FB4F}' => Self::Hebrew,
            c if c.is_alphabetic() => Self::Foreign,
            _ => Self::Other,
        }
    }
}

fn fold_final_form(c: char) -> char {
    match c {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        other => other,
    }
}
