//! Per-column filter expressions.
//!
//! A filter is typed by the user into the box under a column header and is
//! matched against one cell at a time. Supported forms:
//! - `smith` - regular expression, substring match against the cell text
//! - `> 5`, `>=5`, `< 10`, `<= 10`, `== 7` - numeric comparison
//! - `!expr` - negation
//! - `a && b` - every piece must match
//! - `a || b` - at least one piece must match
//!
//! `&&` is split before `||`, and both before `!`, so `>5&&!7` reads as
//! "greater than five and not containing 7". There are no parentheses.
//! Partially typed input such as `>` or `>=` is inert and matches everything.

use crate::error::FilterError;
use crate::value::{parse_number, CellValue};
use once_cell::sync::Lazy;
use regex::Regex;

static IS_AND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+&&").expect("static pattern"));
static IS_OR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+\|\|").expect("static pattern"));
static IS_MATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([<>=])(=*)\s*(.+)$").expect("static pattern"));

/// Filter texts that are still being typed and must not narrow anything.
pub const INERT_FILTERS: &[&str] = &["", "!", "=", "==", ">", "<", "<=", ">=", ">-", ">=-"];

/// True if `text` is one of the [`INERT_FILTERS`].
pub fn is_inert(text: &str) -> bool {
    INERT_FILTERS.contains(&text)
}

/// A parsed filter, evaluated against a single cell.
#[derive(Debug, Clone)]
pub enum FilterExpr {
    /// Inert input; matches every cell.
    Any,
    /// Logical AND of the `&&`-separated pieces
    And(Vec<FilterExpr>),
    /// Logical OR of the `||`-separated pieces
    Or(Vec<FilterExpr>),
    /// Logical NOT of an expression
    Not(Box<FilterExpr>),
    /// Numeric comparison. `op` is None for operator spellings that are
    /// recognised as a comparison but mean nothing (`=5`, `>==5`); those
    /// never match.
    Compare { op: Option<CompareOp>, operand: String },
    /// Unanchored regular expression search over the cell text
    Regex(Regex),
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq, // ==
    Gt, // >
    Ge, // >=
    Lt, // <
    Le, // <=
}

impl CompareOp {
    /// Resolve the operator character and the run of `=` that follows it.
    fn from_parts(op: &str, equals: &str) -> Option<CompareOp> {
        match (op, equals) {
            ("=", "=") => Some(CompareOp::Eq),
            (">", "") => Some(CompareOp::Gt),
            (">", "=") => Some(CompareOp::Ge),
            ("<", "") => Some(CompareOp::Lt),
            ("<", "=") => Some(CompareOp::Le),
            _ => None,
        }
    }

    fn apply(self, cell: f64, operand: f64) -> bool {
        match self {
            CompareOp::Eq => cell == operand,
            CompareOp::Gt => cell > operand,
            CompareOp::Ge => cell >= operand,
            CompareOp::Lt => cell < operand,
            CompareOp::Le => cell <= operand,
        }
    }
}

impl FilterExpr {
    /// Parse filter text into an expression tree.
    ///
    /// The only failure is a regex piece that does not compile.
    pub fn parse(text: &str) -> Result<FilterExpr, FilterError> {
        if is_inert(text) {
            return Ok(FilterExpr::Any);
        }

        if IS_AND.is_match(text) {
            let pieces = text
                .split("&&")
                .map(FilterExpr::parse)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(FilterExpr::And(pieces));
        }

        if IS_OR.is_match(text) {
            let pieces = text
                .split("||")
                .map(FilterExpr::parse)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(FilterExpr::Or(pieces));
        }

        if let Some(rest) = text.strip_prefix('!') {
            return Ok(FilterExpr::Not(Box::new(FilterExpr::parse(rest)?)));
        }

        if let Some(caps) = IS_MATH.captures(text) {
            let op = CompareOp::from_parts(&caps[1], &caps[2]);
            return Ok(FilterExpr::Compare {
                op,
                operand: caps[3].to_string(),
            });
        }

        let pattern = escape_brackets(text);
        match Regex::new(&pattern) {
            Ok(regex) => Ok(FilterExpr::Regex(regex)),
            Err(source) => Err(FilterError::InvalidRegex { pattern, source }),
        }
    }

    /// True if the expression matches every value without looking at it.
    pub fn is_any(&self) -> bool {
        matches!(self, FilterExpr::Any)
    }

    /// Evaluate against one cell.
    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            FilterExpr::Any => true,
            FilterExpr::And(pieces) => pieces.iter().all(|p| p.matches(value)),
            FilterExpr::Or(pieces) => pieces.iter().any(|p| p.matches(value)),
            FilterExpr::Not(inner) => !inner.matches(value),
            FilterExpr::Compare { op, operand } => {
                let Some(op) = op else {
                    return false;
                };
                match (parse_number(operand), value.to_number()) {
                    (Some(operand), Some(cell)) => op.apply(cell, operand),
                    _ => false,
                }
            }
            FilterExpr::Regex(regex) => regex.is_match(&value.to_string()),
        }
    }
}

/// Parse and evaluate in one step.
pub fn evaluate(text: &str, value: &CellValue) -> Result<bool, FilterError> {
    Ok(FilterExpr::parse(text)?.matches(value))
}

/// Brackets are taken literally so users can search for `[x]`.
fn escape_brackets(text: &str) -> String {
    text.replace('[', r"\[").replace(']', r"\]")
}
