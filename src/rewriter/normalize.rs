use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static DANGLING_WHERE_AND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bWHERE\s+AND\b").expect("repair pattern is valid"));

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Collapse a `WHERE AND` sequence left behind by clause removal into `WHERE`.
pub fn repair_where_and(text: &str) -> String {
    DANGLING_WHERE_AND.replace_all(text, "WHERE").into_owned()
}

/// Canonical cleanup applied to every rewritten query.
pub fn clean(text: &str) -> String {
    repair_where_and(&collapse_whitespace(text))
}
