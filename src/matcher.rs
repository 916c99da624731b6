use crate::{
    evaluator::{EvalError, Evaluator},
    expr::Expression,
    metadata::Metadata,
    resolve::{self, AttributeType},
};

/// Matches filter expressions against decoded file metadata.
///
/// A `Matcher` holds no state: every call builds an [`Evaluator`] bound to
/// the metadata it was given, so one instance can be shared freely between
/// threads matching independent trees.
///
/// # Examples
///
/// ```
/// use bdb_expr::{Matcher, expr::builders::*, metadata::Metadata};
///
/// let mut meta = Metadata::new();
/// meta.add_group("/", "what").unwrap();
/// meta.add_attribute("/what/object", "PVOL").unwrap();
///
/// let filter = eq(attribute("what/object", "string"), literal("PVOL"));
/// assert!(Matcher::new().is_match(&meta, &filter).unwrap());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Matcher
    }

    /// Evaluates `expr` against `metadata` without reducing the result.
    pub fn evaluate(&self, metadata: &Metadata, expr: &Expression) -> Result<Expression, EvalError> {
        Evaluator::with_metadata(metadata).eval(expr)
    }

    /// Evaluates `expr` against `metadata` and reduces the result to a
    /// boolean; an empty list is false.
    pub fn is_match(&self, metadata: &Metadata, expr: &Expression) -> Result<bool, EvalError> {
        let matched = self.evaluate(metadata, expr)?.is_truthy();
        tracing::debug!(expression = %expr, matched, "matched metadata");
        Ok(matched)
    }

    /// Resolves one attribute reference, as `(attr path value_type)` would.
    pub fn resolve(
        &self,
        metadata: &Metadata,
        path: &str,
        value_type: &str,
    ) -> Result<Vec<Expression>, EvalError> {
        let value_type: AttributeType = value_type.parse()?;
        resolve::resolve(metadata, path, value_type)
    }
}
