/// SmartTable Row Filtering
///
/// Each column owns a `FilterSpec`: the raw text the user typed plus the
/// expression parsed from it. `RowFilterEngine` keeps a row iff every
/// active column filter matches that row's cell. Filtering never reorders;
/// kept rows appear in the order they were supplied.

use crate::error::FilterError;
use crate::expr::{is_inert, FilterExpr};
use crate::row::Row;
use log::debug;

/// One column's filter: raw text plus its parsed form.
///
/// A spec whose text failed to parse keeps the error and behaves as inert.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    text: String,
    expr: FilterExpr,
    error: Option<FilterError>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            text: String::new(),
            expr: FilterExpr::Any,
            error: None,
        }
    }
}

impl FilterSpec {
    pub fn new(text: &str) -> Self {
        let mut spec = FilterSpec::default();
        spec.set_text(text);
        spec
    }

    /// Replace the text and re-parse. Returns the parse error, if any.
    pub fn set_text(&mut self, text: &str) -> Option<&FilterError> {
        self.text = text.to_string();
        match FilterExpr::parse(text) {
            Ok(expr) => {
                self.expr = expr;
                self.error = None;
            }
            Err(err) => {
                self.expr = FilterExpr::Any;
                self.error = Some(err);
            }
        }
        self.error.as_ref()
    }

    pub fn clear(&mut self) {
        *self = FilterSpec::default();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expr(&self) -> &FilterExpr {
        &self.expr
    }

    pub fn error(&self) -> Option<&FilterError> {
        self.error.as_ref()
    }

    /// True if this spec can reject a row.
    pub fn is_active(&self) -> bool {
        self.error.is_none() && !is_inert(&self.text) && !self.expr.is_any()
    }
}

/// Filter specs for every column of a store, indexed by column.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    specs: Vec<FilterSpec>,
}

impl FilterSet {
    /// An inert spec for each of `columns` columns.
    pub fn new(columns: usize) -> Self {
        FilterSet {
            specs: (0..columns).map(|_| FilterSpec::default()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<&FilterSpec> {
        self.specs.get(column)
    }

    /// Set one column's text. Out-of-range columns are ignored and yield None.
    pub fn set_text(&mut self, column: usize, text: &str) -> Option<Result<(), FilterError>> {
        let spec = self.specs.get_mut(column)?;
        Some(match spec.set_text(text) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        })
    }

    /// Reset every column to inert.
    pub fn clear(&mut self) {
        for spec in &mut self.specs {
            spec.clear();
        }
    }

    /// True if no column can reject a row.
    pub fn is_inert(&self) -> bool {
        !self.specs.iter().any(FilterSpec::is_active)
    }

    /// Columns whose text failed to parse.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &FilterError)> {
        self.specs
            .iter()
            .enumerate()
            .filter_map(|(col, spec)| spec.error().map(|e| (col, e)))
    }

    fn active(&self) -> Vec<(usize, &FilterExpr)> {
        self.specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.is_active())
            .map(|(col, spec)| (col, spec.expr()))
            .collect()
    }
}

/// Applies a `FilterSet` across a row set.
pub struct RowFilterEngine;

impl RowFilterEngine {
    /// True if `row` satisfies every active filter in `filters`.
    pub fn row_matches(row: &Row, filters: &FilterSet) -> bool {
        Self::matches_active(row, &filters.active())
    }

    /// The subsequence of `rows` that passes every active column filter.
    ///
    /// Returned handles share identity with the input rows.
    pub fn apply(rows: &[Row], filters: &FilterSet) -> Vec<Row> {
        let active = filters.active();
        if active.is_empty() {
            return rows.to_vec();
        }

        let kept: Vec<Row> = rows
            .iter()
            .filter(|row| Self::matches_active(row, &active))
            .cloned()
            .collect();

        debug!(
            "filtered {} rows down to {} using {} active column filters",
            rows.len(),
            kept.len(),
            active.len()
        );
        kept
    }

    fn matches_active(row: &Row, active: &[(usize, &FilterExpr)]) -> bool {
        active.iter().all(|(col, expr)| {
            row.with_cell(*col, |value| expr.matches(value))
                .unwrap_or(false)
        })
    }
}
