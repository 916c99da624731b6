pub mod evaluator;
pub mod expr;
pub mod lexer;
pub mod matcher;
pub mod metadata;
pub mod operators;
pub mod parser;
pub mod resolve;

pub use evaluator::{EvalError, Evaluator, Procedure};
pub use expr::{Expression, ExpressionError, ExpressionType, Token};
pub use lexer::{LexError, Lexer, Position};
pub use matcher::Matcher;
pub use metadata::{AttributeValue, Metadata, MetadataError, Node, NodeId, NodeKind, NodeRef, Source};
pub use parser::{ParseError, Parser};
pub use resolve::AttributeType;
