//! Clauses and schema options hanging off statements.

use serde::{Deserialize, Serialize};
use sqlvm_types::{decimal_to_u64, CodecError};

use crate::span::node;
use crate::{Expr, IdentifierNode, IntegerValueNode, Node, NodeRef, Span};

/// `WHERE condition` in SELECT, UPDATE and DELETE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereOptionNode {
    pub span: Span,
    pub condition: Expr,
}

impl WhereOptionNode {
    pub fn new(condition: impl Into<Expr>) -> Self {
        Self {
            span: Span::default(),
            condition: condition.into(),
        }
    }
}

node!(WhereOptionNode, |n| vec![NodeRef::Expr(&n.condition)]);

/// One item of `ORDER BY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOptionNode {
    pub span: Span,
    pub expr: Expr,
    pub desc: bool,
    pub nulls_first: bool,
}

impl OrderOptionNode {
    pub fn new(expr: impl Into<Expr>, desc: bool, nulls_first: bool) -> Self {
        Self {
            span: Span::default(),
            expr: expr.into(),
            desc,
            nulls_first,
        }
    }
}

node!(OrderOptionNode, |n| vec![NodeRef::Expr(&n.expr)]);

/// One item of `GROUP BY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupOptionNode {
    pub span: Span,
    pub expr: Expr,
}

impl GroupOptionNode {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            span: Span::default(),
            expr: expr.into(),
        }
    }
}

node!(GroupOptionNode, |n| vec![NodeRef::Expr(&n.expr)]);

macro_rules! count_option {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub span: Span,
            pub value: IntegerValueNode,
        }

        impl $name {
            pub fn new(value: IntegerValueNode) -> Self {
                Self {
                    span: Span::default(),
                    value,
                }
            }

            /// Row count held by the literal. Negative literals are rejected.
            pub fn count(&self) -> Result<u64, CodecError> {
                decimal_to_u64(&self.value.value)
            }
        }

        node!($name, |n| vec![NodeRef::Integer(&n.value)]);
    };
}

count_option!(
    /// `LIMIT n` in SELECT.
    LimitOptionNode
);
count_option!(
    /// `OFFSET n` in SELECT.
    OffsetOptionNode
);

/// `column = expr` in UPDATE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignOperatorNode {
    pub span: Span,
    pub column: IdentifierNode,
    pub expr: Expr,
}

impl AssignOperatorNode {
    pub fn new(column: IdentifierNode, expr: impl Into<Expr>) -> Self {
        Self {
            span: Span::default(),
            column,
            expr: expr.into(),
        }
    }
}

node!(AssignOperatorNode, |n| vec![
    NodeRef::Identifier(&n.column),
    NodeRef::Expr(&n.expr)
]);

/// `(columns...) VALUES (row...), ...` in INSERT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertWithColumnOptionNode {
    pub span: Span,
    pub columns: Vec<IdentifierNode>,
    pub values: Vec<Vec<Expr>>,
}

impl InsertWithColumnOptionNode {
    pub fn new(columns: Vec<IdentifierNode>, values: Vec<Vec<Expr>>) -> Self {
        Self {
            span: Span::default(),
            columns,
            values,
        }
    }
}

node!(InsertWithColumnOptionNode, |n| {
    n.columns
        .iter()
        .map(NodeRef::Identifier)
        .chain(n.values.iter().flatten().map(NodeRef::Expr))
        .collect()
});

/// `DEFAULT VALUES` in INSERT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertWithDefaultOptionNode {
    pub span: Span,
}

node!(InsertWithDefaultOptionNode);

/// What an INSERT writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertPayload {
    Columns(InsertWithColumnOptionNode),
    Default(InsertWithDefaultOptionNode),
}

impl InsertPayload {
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            InsertPayload::Columns(n) => NodeRef::InsertWithColumn(n),
            InsertPayload::Default(n) => NodeRef::InsertWithDefault(n),
        }
    }
}

impl From<InsertWithColumnOptionNode> for InsertPayload {
    fn from(node: InsertWithColumnOptionNode) -> Self {
        InsertPayload::Columns(node)
    }
}

impl From<InsertWithDefaultOptionNode> for InsertPayload {
    fn from(node: InsertWithDefaultOptionNode) -> Self {
        InsertPayload::Default(node)
    }
}

/// Column constraint in CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// `PRIMARY KEY`
    PrimaryKey,
    /// `NOT NULL`
    NotNull,
    /// `UNIQUE`
    Unique,
    /// `AUTOINCREMENT`
    AutoIncrement,
    /// `DEFAULT expr`
    Default(Expr),
    /// `REFERENCES table(column)`
    Foreign {
        table: IdentifierNode,
        column: IdentifierNode,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintNode {
    pub span: Span,
    pub constraint: Constraint,
}

impl ConstraintNode {
    pub fn new(constraint: Constraint) -> Self {
        Self {
            span: Span::default(),
            constraint,
        }
    }
}

node!(ConstraintNode, |n| match &n.constraint {
    Constraint::Default(value) => vec![NodeRef::Expr(value)],
    Constraint::Foreign { table, column } => {
        vec![NodeRef::Identifier(table), NodeRef::Identifier(column)]
    }
    _ => Vec::new(),
});

/// `UNIQUE` in CREATE INDEX.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueOptionNode {
    pub span: Span,
}

node!(UniqueOptionNode);

#[cfg(test)]
mod tests {
    use super::*;
    use sqlvm_types::{BigDecimal, ErrorCode};
    use std::str::FromStr;

    #[test]
    fn test_limit_count() {
        let limit = LimitOptionNode::new(IntegerValueNode::new(BigDecimal::from(10)));
        assert_eq!(limit.count(), Ok(10));

        let tiny = BigDecimal::from_str("1e-4294967296").unwrap();
        assert_eq!(LimitOptionNode::new(IntegerValueNode::new(tiny)).count(), Ok(0));

        let offset = OffsetOptionNode::new(IntegerValueNode::new(BigDecimal::from(-1)));
        assert_eq!(
            offset.count().unwrap_err().code(),
            ErrorCode::NegDecimalToUint64
        );
    }

    #[test]
    fn test_limit_children() {
        let limit = LimitOptionNode::new(IntegerValueNode::new(BigDecimal::from(3)));
        let children = limit.children();
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0], NodeRef::Integer(_)));
    }

    #[test]
    fn test_insert_children_flatten_rows() {
        let int = |v: i32| Expr::from(IntegerValueNode::new(BigDecimal::from(v)));
        let insert = InsertWithColumnOptionNode::new(
            vec![IdentifierNode::new("a"), IdentifierNode::new("b")],
            vec![vec![int(1), int(2)], vec![int(3), int(4)]],
        );
        let children = insert.children();
        assert_eq!(children.len(), 6);
        assert!(matches!(children[0], NodeRef::Identifier(_)));
        assert!(matches!(children[1], NodeRef::Identifier(_)));
        match children[5] {
            NodeRef::Expr(Expr::Integer(n)) => assert_eq!(n.value, BigDecimal::from(4)),
            other => panic!("unexpected child {other:?}"),
        }
    }

    #[test]
    fn test_constraint_children() {
        assert!(ConstraintNode::new(Constraint::NotNull).children().is_empty());

        let foreign = ConstraintNode::new(Constraint::Foreign {
            table: IdentifierNode::new("t"),
            column: IdentifierNode::new("id"),
        });
        let names: Vec<_> = foreign
            .children()
            .into_iter()
            .map(|c| match c {
                NodeRef::Identifier(n) => n.name.clone(),
                other => panic!("unexpected child {other:?}"),
            })
            .collect();
        assert_eq!(names, vec![b"t".to_vec(), b"id".to_vec()]);

        let default = ConstraintNode::new(Constraint::Default(Expr::Null(Default::default())));
        assert_eq!(default.children().len(), 1);
    }

    #[test]
    fn test_assign_children() {
        let assign = AssignOperatorNode::new(
            IdentifierNode::new("a"),
            IntegerValueNode::new(BigDecimal::from(1)),
        );
        let children = assign.children();
        assert!(matches!(children[0], NodeRef::Identifier(_)));
        assert!(matches!(children[1], NodeRef::Expr(Expr::Integer(_))));
    }
}
