/// SmartTable Sorting
///
/// Rows are ordered by one column at a time. Cells that read as numbers
/// compare numerically, everything else compares by display text, and
/// numeric cells come before textual ones. That keeps the ordering total,
/// which a plain "numeric if both parse, otherwise text" rule does not:
/// `9 < 10` numerically but `"10" < "1a" < "9"` as text.
///
/// Sorting is stable in both directions; descending reverses the comparator,
/// not the output, so tied rows keep their input order either way.

use crate::row::Row;
use crate::value::CellValue;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort order specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending order (smallest first)
    Ascending,
    /// Descending order (largest first)
    Descending,
}

/// A sort request: column index and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: usize,
    pub order: SortOrder,
}

impl SortKey {
    pub fn ascending(column: usize) -> Self {
        SortKey {
            column,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(column: usize) -> Self {
        SortKey {
            column,
            order: SortOrder::Descending,
        }
    }

    pub fn new(column: usize, ascending: bool) -> Self {
        SortKey {
            column,
            order: if ascending {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            },
        }
    }
}

/// What happens to an active sort when the filtered view is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Re-sort the new filtered view with the last requested key.
    #[default]
    Reapply,
    /// Drop the sort; the new view comes back in authoritative order.
    Reset,
}

/// Pre-computed comparison key for one cell.
#[derive(Debug, Clone, PartialEq)]
enum CellKey {
    Number(f64),
    Text(String),
}

impl CellKey {
    fn of(value: Option<&CellValue>) -> CellKey {
        match value {
            Some(v) => match v.to_number() {
                Some(n) => CellKey::Number(n),
                None => CellKey::Text(v.to_string()),
            },
            None => CellKey::Text(String::new()),
        }
    }

    fn compare(&self, other: &CellKey) -> Ordering {
        match (self, other) {
            (CellKey::Number(a), CellKey::Number(b)) => a.total_cmp(b),
            (CellKey::Number(_), CellKey::Text(_)) => Ordering::Less,
            (CellKey::Text(_), CellKey::Number(_)) => Ordering::Greater,
            (CellKey::Text(a), CellKey::Text(b)) => a.cmp(b),
        }
    }
}

/// Compare two cells with the numeric-first rule.
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    CellKey::of(Some(a)).compare(&CellKey::of(Some(b)))
}

pub struct SortEngine;

impl SortEngine {
    /// Stable sort of `rows` by `key`, in place.
    ///
    /// A column mixing numbers and text does not compare the mixed pairs by
    /// text: every numeric cell sorts before every textual one, and the
    /// descending order puts them after. Rows missing the column sort as
    /// empty text.
    pub fn sort(rows: &mut Vec<Row>, key: SortKey) {
        let mut keyed: Vec<(CellKey, Row)> = rows
            .drain(..)
            .map(|row| {
                let cell = row.with_cell(key.column, |v| CellKey::of(Some(v)));
                (cell.unwrap_or_else(|| CellKey::of(None)), row)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match key.order {
            SortOrder::Ascending => a.compare(b),
            SortOrder::Descending => b.compare(a),
        });

        rows.extend(keyed.into_iter().map(|(_, row)| row));
        debug!(
            "sorted {} rows on column {} {:?}",
            rows.len(),
            key.column,
            key.order
        );
    }

    /// Sorted copy of `rows`; the input is left untouched.
    pub fn sorted(rows: &[Row], key: SortKey) -> Vec<Row> {
        let mut out = rows.to_vec();
        Self::sort(&mut out, key);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(rows: &[Row], column: usize) -> Vec<String> {
        rows.iter().map(|r| r.text(column).unwrap()).collect()
    }

    #[test]
    fn test_numeric_before_lexical() {
        let rows: Vec<Row> = ["10", "9", "abc", "1a", "-2", "2.5"]
            .iter()
            .map(|s| Row::from_values(vec![*s]))
            .collect();

        let sorted = SortEngine::sorted(&rows, SortKey::ascending(0));
        assert_eq!(texts(&sorted, 0), vec!["-2", "2.5", "9", "10", "1a", "abc"]);
    }

    #[test]
    fn test_mixed_column_order_is_consistent_both_ways() {
        let rows: Vec<Row> = ["1a", "10", "9"]
            .iter()
            .map(|s| Row::from_values(vec![*s]))
            .collect();

        let asc = SortEngine::sorted(&rows, SortKey::ascending(0));
        assert_eq!(texts(&asc, 0), vec!["9", "10", "1a"]);

        let desc = SortEngine::sorted(&rows, SortKey::descending(0));
        assert_eq!(texts(&desc, 0), vec!["1a", "10", "9"]);

        // Same result whatever order the rows arrive in.
        for start in 0..rows.len() {
            let mut rotated = rows.clone();
            rotated.rotate_left(start);
            let again = SortEngine::sorted(&rotated, SortKey::ascending(0));
            assert_eq!(texts(&again, 0), texts(&asc, 0));
        }
    }

    #[test]
    fn test_mixed_cell_types_compare_numerically() {
        let rows = vec![
            Row::new(vec![CellValue::Int(60)]),
            Row::new(vec![CellValue::from("30")]),
            Row::new(vec![CellValue::Float(45.5)]),
        ];
        let sorted = SortEngine::sorted(&rows, SortKey::ascending(0));
        assert_eq!(texts(&sorted, 0), vec!["30", "45.5", "60"]);
    }

    #[test]
    fn test_descending_reverses_distinct_keys() {
        let rows: Vec<Row> = [5, -1, 12, 3, 8]
            .iter()
            .map(|v| Row::from_values(vec![*v]))
            .collect();

        let asc = SortEngine::sorted(&rows, SortKey::ascending(0));
        let desc = SortEngine::sorted(&rows, SortKey::descending(0));

        let mut reversed = texts(&asc, 0);
        reversed.reverse();
        assert_eq!(texts(&desc, 0), reversed);
    }

    #[test]
    fn test_ties_keep_input_order_both_ways() {
        let rows: Vec<Row> = [(1, "a"), (0, "b"), (1, "c"), (0, "d"), (1, "e")]
            .iter()
            .map(|(k, tag)| Row::new(vec![CellValue::Int(*k), CellValue::from(*tag)]))
            .collect();

        let asc = SortEngine::sorted(&rows, SortKey::ascending(0));
        assert_eq!(texts(&asc, 1), vec!["b", "d", "a", "c", "e"]);

        let desc = SortEngine::sorted(&rows, SortKey::descending(0));
        assert_eq!(texts(&desc, 1), vec!["a", "c", "e", "b", "d"]);
    }

    #[test]
    fn test_sort_preserves_identity() {
        let rows: Vec<Row> = (0..10).map(|i| Row::from_values(vec![10 - i])).collect();
        let sorted = SortEngine::sorted(&rows, SortKey::ascending(0));
        for (i, row) in sorted.iter().enumerate() {
            assert!(row.ptr_eq(&rows[9 - i]));
        }
    }

    #[test]
    fn test_compare_cells() {
        assert_eq!(compare_cells(&CellValue::Int(2), &CellValue::from("10")), Ordering::Less);
        assert_eq!(compare_cells(&CellValue::from("b"), &CellValue::from("a")), Ordering::Greater);
        assert_eq!(compare_cells(&CellValue::Int(1), &CellValue::from("a")), Ordering::Less);
        assert_eq!(compare_cells(&CellValue::Int(3), &CellValue::Float(3.0)), Ordering::Equal);
    }

    #[test]
    fn test_sort_key_constructors() {
        assert_eq!(SortKey::new(2, true), SortKey::ascending(2));
        assert_eq!(SortKey::new(2, false), SortKey::descending(2));
    }
}
