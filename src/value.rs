/// SmartTable Cell Values
///
/// A cell holds one typed value. Filtering and sorting never look at the
/// variant directly: they work on the display string and on the numeric
/// reading of that string, so a `"30"` typed into an editor and an `Int(30)`
/// loaded from data filter and sort the same way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell value enum to support multiple types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    String(String),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric reading of the cell, used by comparisons and sorting.
    ///
    /// Strings are parsed after trimming surrounding whitespace. Dates and
    /// nulls have no numeric reading.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::String(s) => parse_number(s),
            CellValue::Date(_) | CellValue::Null => None,
        }
    }
}

/// Parse user-facing text as a floating point number.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::String(s) => f.write_str(s),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(CellValue::Int(-7).to_string(), "-7");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from("abc").to_string(), "abc");
        assert_eq!(CellValue::Null.to_string(), "");

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2024-03-09");
    }

    #[test]
    fn test_numeric_reading() {
        assert_eq!(CellValue::Int(30).to_number(), Some(30.0));
        assert_eq!(CellValue::from(" 30 ").to_number(), Some(30.0));
        assert_eq!(CellValue::from("1e3").to_number(), Some(1000.0));
        assert_eq!(CellValue::from("thirty").to_number(), None);
        assert_eq!(CellValue::Null.to_number(), None);

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(CellValue::Date(date).to_number(), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CellValue::Int(4).as_i64(), Some(4));
        assert_eq!(CellValue::Int(4).as_f64(), None);
        assert_eq!(CellValue::from("x").as_string(), Some("x"));
        assert!(CellValue::Null.is_null());
    }
}
