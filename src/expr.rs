//! # Query expressions
//!
//! A query is one recursive value, [`Expression`]: a literal (integer, float,
//! boolean, text), a symbol, or a list of expressions. Filters, fetch
//! projections, ordering and grouping all share this shape, so a single
//! evaluator handles every one of them.
//!
//! ## Forms
//!
//! ```text
//! (= (attr "what/object" "string") "PVOL")
//! (and (> (attr "where/elangle" "double") 0.5) (not (= (attr "how/task" "string") "bropo")))
//! (in (attr "what/source:WMO" "string") ("02606" "02588"))
//! (>= (attr "what/date" "date") (date 2024 5 1))
//! ```
//!
//! - A list headed by a symbol is a call: `(op arg...)`.
//! - Any other list is a list literal: `(1 2 3)`.
//! - Literals and bare symbols evaluate to themselves.
//!
//! The canonical rendering (`Display`) is read back by [`crate::Parser`].
//!
//! ## Submodules
//!
//! - **[expression]** - the tree itself, accessors and rendering
//! - **[builders]** - constructors for comparisons, connectives and markers
//! - **[tokens]** - lexical tokens of the text rendering
pub mod builders;
pub mod expression;
pub mod tokens;

pub use expression::{Expression, ExpressionError, ExpressionType};
pub use tokens::Token;
