use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a currency-equality filter: the `AND` keyword, the `MONEDA` column,
/// `=`, and an integer literal. Case-insensitive, whitespace-tolerant.
pub(crate) static CURRENCY_FILTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bAND\s+MONEDA\s*=\s*([0-9]+)").expect("currency filter pattern is valid")
});

/// A currency-equality filter found in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFilter {
    /// Currency code parsed from the first matching clause.
    pub code: u64,
    /// Total number of matching clauses in the query.
    pub occurrences: usize,
}

impl CurrencyFilter {
    /// True when more than one clause matched; only the first code is used.
    pub fn is_ambiguous(&self) -> bool {
        self.occurrences > 1
    }
}

/// Find the first currency-equality filter in `query`.
///
/// Returns `None` when no clause matches. Leading zeros are accepted and the
/// literal is parsed base-10; a literal too large for `u64` is treated as no
/// match, leaving the query on the unfiltered path with its clause intact.
pub fn detect(query: &str) -> Option<CurrencyFilter> {
    let mut captures = CURRENCY_FILTER.captures_iter(query);
    let first = captures.next()?;
    let code = first[1].parse::<u64>().ok()?;
    Some(CurrencyFilter {
        code,
        occurrences: 1 + captures.count(),
    })
}
