use std::fmt;

use chrono::{NaiveDate, NaiveTime};

/// ODIM_H5 date attribute format (`what/date`).
pub const DATE_FORMAT: &str = "%Y%m%d";

/// ODIM_H5 time attribute format (`what/time`).
pub const TIME_FORMAT: &str = "%H%M%S";

/// Scalar held by an attribute leaf.
///
/// ODIM_H5 stores dates, times and booleans as text; those are interpreted on
/// demand through [`as_date`](Self::as_date), [`as_time`](Self::as_time) and
/// [`as_bool`](Self::as_bool).
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Long(i64),
    Double(f64),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value; text is parsed, doubles are not narrowed.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            AttributeValue::Long(n) => Some(*n),
            AttributeValue::Text(s) => s.trim().parse().ok(),
            AttributeValue::Double(_) => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(n) => Some(*n),
            AttributeValue::Long(n) => Some(*n as f64),
            AttributeValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// ODIM booleans are the strings `True` and `False`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Text(s) => match s.trim() {
                "True" | "true" => Some(true),
                "False" | "false" => Some(false),
                _ => None,
            },
            AttributeValue::Long(n) => Some(*n != 0),
            AttributeValue::Double(_) => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        let text = self.as_text()?;
        NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        let text = self.as_text()?;
        NaiveTime::parse_from_str(text.trim(), TIME_FORMAT).ok()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Text(_) => "text",
            AttributeValue::Long(_) => "long",
            AttributeValue::Double(_) => "double",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Long(n) => write!(f, "{}", n),
            AttributeValue::Double(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Long(n)
    }
}

impl From<i32> for AttributeValue {
    fn from(n: i32) -> Self {
        AttributeValue::Long(n.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Double(n)
    }
}

impl From<NaiveDate> for AttributeValue {
    fn from(d: NaiveDate) -> Self {
        AttributeValue::Text(d.format(DATE_FORMAT).to_string())
    }
}

impl From<NaiveTime> for AttributeValue {
    fn from(t: NaiveTime) -> Self {
        AttributeValue::Text(t.format(TIME_FORMAT).to_string())
    }
}
