//! SQLVM AST - syntax tree nodes produced by the parser and typed by analysis.
//!
//! Every node records the [`Span`] of source text it came from and exposes
//! its children in source order through [`Node::children`]. Expression nodes
//! additionally implement [`ExprNode`], and declared types resolve to a
//! [`DataType`](sqlvm_types::DataType) through [`TypeNode::data_type`].

mod expr;
mod node;
mod option;
mod span;
mod stmt;
mod type_node;

pub use expr::*;
pub use node::NodeRef;
pub use option::*;
pub use span::{combine_span, Node, Span};
pub use stmt::*;
pub use type_node::*;
