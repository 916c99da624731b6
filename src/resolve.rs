//! Resolution of attribute references against a metadata tree.
//!
//! A reference is a path plus a type token. Plain paths match by suffix:
//! `where/xsize` matches `/where/xsize` and `/dataset1/where/xsize` alike,
//! and every match contributes one value in level order. Paths of the form
//! `what/source:KEY` (or `_bdb/source:KEY`) pick one key out of the source
//! record stored in that attribute instead of walking the tree.

use std::{fmt, str::FromStr};

use crate::{
    evaluator::EvalError,
    expr::Expression,
    metadata::{AttributeValue, DATE_FORMAT, Metadata, Source, TIME_FORMAT},
};

const SOURCE_ATTRIBUTES: [&str; 2] = ["what/source", "_bdb/source"];

/// Type an attribute value is coerced to when it is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    String,
    Long,
    Double,
    Bool,
    /// Text in ODIM `YYYYMMDD` form, validated
    Date,
    /// Text in ODIM `HHMMSS` form, validated
    Time,
}

impl AttributeType {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Long => "long",
            AttributeType::Double => "double",
            AttributeType::Bool => "bool",
            AttributeType::Date => "date",
            AttributeType::Time => "time",
        }
    }

    /// Converts one attribute value, or reports why it cannot be.
    pub fn coerce(&self, value: &AttributeValue) -> Result<Expression, EvalError> {
        let converted = match self {
            AttributeType::String => Some(Expression::Text(value.to_string())),
            AttributeType::Long => value.as_long().map(Expression::Integer),
            AttributeType::Double => value.as_double().map(Expression::Float),
            AttributeType::Bool => value.as_bool().map(Expression::Boolean),
            AttributeType::Date => value
                .as_date()
                .map(|d| Expression::Text(d.format(DATE_FORMAT).to_string())),
            AttributeType::Time => value
                .as_time()
                .map(|t| Expression::Text(t.format(TIME_FORMAT).to_string())),
        };

        converted.ok_or_else(|| {
            EvalError::TypeError(format!(
                "cannot read {} attribute value '{}' as {}",
                value.type_name(),
                value,
                self.name()
            ))
        })
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeType {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(AttributeType::String),
            "long" => Ok(AttributeType::Long),
            "double" => Ok(AttributeType::Double),
            "bool" | "boolean" => Ok(AttributeType::Bool),
            "date" => Ok(AttributeType::Date),
            "time" => Ok(AttributeType::Time),
            other => Err(EvalError::Configuration(format!(
                "unknown attribute type '{}'",
                other
            ))),
        }
    }
}

/// Splits `what/source:WMO` into (`what/source`, `WMO`).
fn source_reference(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.trim_start_matches('/');
    SOURCE_ATTRIBUTES.iter().find_map(|attribute| {
        let key = trimmed.strip_prefix(attribute)?.strip_prefix(':')?;
        Some((*attribute, key))
    })
}

fn resolve_source_key(
    metadata: &Metadata,
    attribute: &str,
    key: &str,
    value_type: AttributeType,
) -> Result<Vec<Expression>, EvalError> {
    let Some(text) = metadata
        .attribute_value(attribute)
        .and_then(AttributeValue::as_text)
    else {
        return Ok(vec![]);
    };

    let source: Source = text
        .parse()
        .map_err(|e| EvalError::InvalidArgument(format!("{}: {}", attribute, e)))?;

    match source.get(key) {
        Some(value) => Ok(vec![value_type.coerce(&AttributeValue::from(value))?]),
        None => Ok(vec![]),
    }
}

/// Every value in `metadata` that `path` refers to, coerced to `value_type`.
///
/// No match is an empty list, not an error. An empty path matches nothing.
pub fn resolve(
    metadata: &Metadata,
    path: &str,
    value_type: AttributeType,
) -> Result<Vec<Expression>, EvalError> {
    if let Some((attribute, key)) = source_reference(path) {
        return resolve_source_key(metadata, attribute, key, value_type);
    }

    let wanted: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if wanted.is_empty() {
        return Ok(vec![]);
    }

    let mut values = vec![];
    for node in metadata.attributes() {
        if !node.segments().ends_with(&wanted) {
            continue;
        }
        if let Some(value) = node.value() {
            values.push(value_type.coerce(value)?);
        }
    }

    tracing::debug!(path, matches = values.len(), "resolved attribute");
    Ok(values)
}
