use once_cell::sync::Lazy;
use regex::Regex;

use crate::detector::currency_filter::{self, CurrencyFilter};
use crate::rewriter::columns::{CurrencyColumn, RewriteKind};
use crate::rewriter::normalize;

/// Matches the legacy aggregation expression `SUM(MONTO)`, tolerating any
/// casing and internal whitespace around the column name.
static SUM_MONTO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SUM\(\s*MONTO\s*\)").expect("aggregation pattern is valid"));

const LEGACY_TABLE: &str = "CM_MILES";
const TARGET_TABLE: &str = "CORTES_MILES";

/// A rewritten query together with its derivation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenQuery {
    /// The rewritten SQL text.
    pub sql: String,
    /// Currency code associated with this output: the detected code on the
    /// specific path, or the fixed per-variant code otherwise.
    pub currency_code: u64,
    /// Which rewrite path produced this query.
    pub kind: RewriteKind,
}

/// Result of rewriting one source query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// A currency filter was present: a single query against the column the
    /// detected code selects, with the filter clause removed.
    Specific {
        /// The rewritten query.
        query: RewrittenQuery,
        /// The filter that selected this path.
        filter: CurrencyFilter,
    },
    /// No currency filter was present: one variant per target column.
    Unfiltered {
        /// The local-currency (`MN`) variant, code 14.
        local: RewrittenQuery,
        /// The foreign-currency (`ME`) variant, code 4.
        foreign: RewrittenQuery,
    },
}

impl RewriteOutcome {
    /// The rewritten queries in output order (local before foreign).
    pub fn queries(&self) -> Vec<&RewrittenQuery> {
        match self {
            RewriteOutcome::Specific { query, .. } => vec![query],
            RewriteOutcome::Unfiltered { local, foreign } => vec![local, foreign],
        }
    }

    /// The detected currency filter, when the specific path was taken.
    pub fn filter(&self) -> Option<&CurrencyFilter> {
        match self {
            RewriteOutcome::Specific { filter, .. } => Some(filter),
            RewriteOutcome::Unfiltered { .. } => None,
        }
    }
}

/// Rewrite one legacy query into its `CORTES_MILES` form(s).
///
/// The detector runs exactly once and its result alone selects the path:
/// with a filter, the clause is removed and a single query is produced
/// against the column the code selects; without one, both the `MN` and `ME`
/// variants are produced. Substitutions are best-effort — text without the
/// expected tokens passes through unchanged apart from the canonical cleanup.
pub fn rewrite(query: &str) -> RewriteOutcome {
    match currency_filter::detect(query) {
        Some(filter) => {
            let stripped = currency_filter::CURRENCY_FILTER.replace_all(query, "");
            let column = CurrencyColumn::for_code(filter.code);
            RewriteOutcome::Specific {
                query: RewrittenQuery {
                    sql: normalize::clean(&substitute(&stripped, column)),
                    currency_code: filter.code,
                    kind: RewriteKind::Specific,
                },
                filter,
            }
        }
        None => RewriteOutcome::Unfiltered {
            local: unfiltered_variant(query, CurrencyColumn::Local),
            foreign: unfiltered_variant(query, CurrencyColumn::Foreign),
        },
    }
}

fn unfiltered_variant(query: &str, column: CurrencyColumn) -> RewrittenQuery {
    RewrittenQuery {
        sql: normalize::clean(&substitute(query, column)),
        currency_code: column.code(),
        kind: match column {
            CurrencyColumn::Local => RewriteKind::UnfilteredLocal,
            CurrencyColumn::Foreign => RewriteKind::UnfilteredForeign,
        },
    }
}

/// Apply the table rename and the aggregation-column substitution.
fn substitute(query: &str, column: CurrencyColumn) -> String {
    let renamed = query.replace(LEGACY_TABLE, TARGET_TABLE);
    let replacement = format!("SUM({column})");
    SUM_MONTO.replace_all(&renamed, replacement.as_str()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_path_removes_filter_and_selects_foreign_column() {
        let input =
            "SELECT SUM(MONTO) FROM CM_MILES WHERE CONCEPTO IN ('x') AND MONEDA = 4 AND FECHA_DATOS = '{FD}'";
        let RewriteOutcome::Specific { query, filter } = rewrite(input) else {
            panic!("expected the specific path");
        };
        assert_eq!(
            query.sql,
            "SELECT SUM(ME) FROM CORTES_MILES WHERE CONCEPTO IN ('x') AND FECHA_DATOS = '{FD}'"
        );
        assert_eq!(query.currency_code, 4);
        assert_eq!(query.kind, RewriteKind::Specific);
        assert_eq!(filter.code, 4);
    }

    #[test]
    fn specific_path_maps_code_14_to_local_column() {
        let outcome = rewrite("SELECT SUM(MONTO) FROM CM_MILES WHERE A = 1 AND MONEDA = 14");
        let queries = outcome.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0].sql,
            "SELECT SUM(MN) FROM CORTES_MILES WHERE A = 1"
        );
        assert_eq!(queries[0].currency_code, 14);
    }

    #[test]
    fn unknown_codes_map_to_local_column() {
        let outcome = rewrite("SELECT SUM(MONTO) FROM CM_MILES WHERE A = 1 AND MONEDA = 7");
        assert_eq!(
            outcome.queries()[0].sql,
            "SELECT SUM(MN) FROM CORTES_MILES WHERE A = 1"
        );
        assert_eq!(outcome.queries()[0].currency_code, 7);
    }

    #[test]
    fn unfiltered_path_produces_local_then_foreign() {
        let outcome =
            rewrite("SELECT SUM(MONTO) FROM CM_MILES WHERE CONCEPTO IN ('x')");
        let RewriteOutcome::Unfiltered { local, foreign } = outcome else {
            panic!("expected the unfiltered path");
        };
        assert_eq!(
            local.sql,
            "SELECT SUM(MN) FROM CORTES_MILES WHERE CONCEPTO IN ('x')"
        );
        assert_eq!(local.currency_code, 14);
        assert_eq!(local.kind, RewriteKind::UnfilteredLocal);
        assert_eq!(
            foreign.sql,
            "SELECT SUM(ME) FROM CORTES_MILES WHERE CONCEPTO IN ('x')"
        );
        assert_eq!(foreign.currency_code, 4);
        assert_eq!(foreign.kind, RewriteKind::UnfilteredForeign);
    }

    #[test]
    fn aggregation_pattern_tolerates_spacing_and_case() {
        let outcome = rewrite("SELECT sum(monto) + SUM(  MONTO ) FROM CM_MILES");
        assert_eq!(
            outcome.queries()[0].sql,
            "SELECT SUM(MN) + SUM(MN) FROM CORTES_MILES"
        );
    }

    #[test]
    fn table_rename_is_idempotent() {
        let once = rewrite("SELECT 1 FROM CM_MILES").queries()[0].sql.clone();
        let twice = rewrite(&once).queries()[0].sql.clone();
        assert_eq!(once, twice);
        assert_eq!(once, "SELECT 1 FROM CORTES_MILES");
    }

    #[test]
    fn filter_removal_artifact_is_repaired_on_every_path() {
        let outcome =
            rewrite("SELECT SUM(MONTO) FROM CM_MILES WHERE AND MONEDA = 14 AND F = '{FD}'");
        assert_eq!(
            outcome.queries()[0].sql,
            "SELECT SUM(MN) FROM CORTES_MILES WHERE F = '{FD}'"
        );
    }

    #[test]
    fn non_sql_text_passes_through() {
        let outcome = rewrite("not a query at all");
        assert_eq!(outcome.queries()[0].sql, "not a query at all");
        assert_eq!(outcome.queries()[1].sql, "not a query at all");
    }

    #[test]
    fn empty_input_is_accepted() {
        let outcome = rewrite("");
        assert_eq!(outcome.queries().len(), 2);
        assert_eq!(outcome.queries()[0].sql, "");
    }

    #[test]
    fn every_matching_clause_is_removed_on_the_specific_path() {
        let outcome =
            rewrite("SELECT SUM(MONTO) FROM CM_MILES WHERE A = 1 AND MONEDA = 14 AND MONEDA = 4");
        let RewriteOutcome::Specific { query, filter } = outcome else {
            panic!("expected the specific path");
        };
        assert_eq!(query.sql, "SELECT SUM(MN) FROM CORTES_MILES WHERE A = 1");
        assert_eq!(filter.code, 14);
        assert!(filter.is_ambiguous());
    }
}
