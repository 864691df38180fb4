use std::fmt;

/// Target aggregation column in the `CORTES_MILES` schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyColumn {
    /// Local currency (`MN`), currency code 14.
    Local,
    /// Foreign currency (`ME`), currency code 4.
    Foreign,
}

impl CurrencyColumn {
    /// Currency code reported alongside queries aggregating this column.
    pub fn code(self) -> u64 {
        match self {
            CurrencyColumn::Local => 14,
            CurrencyColumn::Foreign => 4,
        }
    }

    /// Column selected for a detected currency code.
    ///
    /// Code 4 selects the foreign-currency column; every other code maps to
    /// the local-currency column.
    pub fn for_code(code: u64) -> Self {
        if code == 4 {
            CurrencyColumn::Foreign
        } else {
            CurrencyColumn::Local
        }
    }
}

impl fmt::Display for CurrencyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyColumn::Local => write!(f, "MN"),
            CurrencyColumn::Foreign => write!(f, "ME"),
        }
    }
}

/// How a rewritten query was derived from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKind {
    /// The source query carried a currency filter; one query was produced.
    Specific,
    /// No currency filter: the local-currency (`MN`) variant.
    UnfilteredLocal,
    /// No currency filter: the foreign-currency (`ME`) variant.
    UnfilteredForeign,
}

impl fmt::Display for RewriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteKind::Specific => write!(f, "specific"),
            RewriteKind::UnfilteredLocal => write!(f, "unfiltered-MN"),
            RewriteKind::UnfilteredForeign => write!(f, "unfiltered-ME"),
        }
    }
}
