//! Borrowed handle over every node kind, used for generic traversal.

use crate::{
    AssignOperatorNode, ColumnSchemaNode, ConstraintNode, Expr, GroupOptionNode, IdentifierNode,
    InsertWithColumnOptionNode, InsertWithDefaultOptionNode, IntegerValueNode, LimitOptionNode,
    Node, OffsetOptionNode, OrderOptionNode, Span, Stmt, TypeNode, UniqueOptionNode,
    WhereOptionNode,
};

/// A reference to some node in the tree.
///
/// `Identifier` and `Integer` appear where a clause holds the node directly
/// rather than as an [`Expr`].
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Expr(&'a Expr),
    Identifier(&'a IdentifierNode),
    Integer(&'a IntegerValueNode),
    Type(&'a TypeNode),
    Assign(&'a AssignOperatorNode),
    Where(&'a WhereOptionNode),
    Order(&'a OrderOptionNode),
    Group(&'a GroupOptionNode),
    Limit(&'a LimitOptionNode),
    Offset(&'a OffsetOptionNode),
    InsertWithColumn(&'a InsertWithColumnOptionNode),
    InsertWithDefault(&'a InsertWithDefaultOptionNode),
    Constraint(&'a ConstraintNode),
    Unique(&'a UniqueOptionNode),
    ColumnSchema(&'a ColumnSchemaNode),
    Stmt(&'a Stmt),
}

macro_rules! dispatch {
    ($self:expr, $n:ident => $body:expr) => {
        match $self {
            NodeRef::Expr($n) => $body,
            NodeRef::Identifier($n) => $body,
            NodeRef::Integer($n) => $body,
            NodeRef::Type($n) => $body,
            NodeRef::Assign($n) => $body,
            NodeRef::Where($n) => $body,
            NodeRef::Order($n) => $body,
            NodeRef::Group($n) => $body,
            NodeRef::Limit($n) => $body,
            NodeRef::Offset($n) => $body,
            NodeRef::InsertWithColumn($n) => $body,
            NodeRef::InsertWithDefault($n) => $body,
            NodeRef::Constraint($n) => $body,
            NodeRef::Unique($n) => $body,
            NodeRef::ColumnSchema($n) => $body,
            NodeRef::Stmt($n) => $body,
        }
    };
}

impl<'a> NodeRef<'a> {
    pub fn span(self) -> Span {
        dispatch!(self, n => n.span())
    }

    pub fn has_span(self) -> bool {
        dispatch!(self, n => n.has_span())
    }

    pub fn children(self) -> Vec<NodeRef<'a>> {
        dispatch!(self, n => n.children())
    }

    /// Visits this node and then its descendants, depth first.
    pub fn walk<F>(self, visit: &mut F)
    where
        F: FnMut(NodeRef<'a>),
    {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Bare identifiers and integer literals are not wrapped and yield `None`.
    pub fn as_expr(self) -> Option<&'a Expr> {
        match self {
            NodeRef::Expr(e) => Some(e),
            _ => None,
        }
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        NodeRef::Expr(expr)
    }
}

impl<'a> From<&'a Stmt> for NodeRef<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        NodeRef::Stmt(stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinaryOp, BinaryOperatorNode, DeleteStmtNode};

    #[test]
    fn test_walk_is_preorder() {
        let mut delete = DeleteStmtNode::new(IdentifierNode::new("t"));
        delete.where_ = Some(WhereOptionNode::new(BinaryOperatorNode::new(
            BinaryOp::Equal,
            IdentifierNode::new("a").into(),
            IdentifierNode::new("b").into(),
        )));
        let stmt = Stmt::Delete(delete);

        let mut names = Vec::new();
        let mut visited = 0;
        NodeRef::from(&stmt).walk(&mut |node| {
            visited += 1;
            match node {
                NodeRef::Identifier(n) => names.push(n.name.clone()),
                NodeRef::Expr(Expr::Identifier(n)) => names.push(n.name.clone()),
                _ => {}
            }
        });
        // stmt, table, where, binary, a, b
        assert_eq!(visited, 6);
        assert_eq!(names, vec![b"t".to_vec(), b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_span_through_ref() {
        let mut ident = IdentifierNode::new("a");
        assert!(!NodeRef::Identifier(&ident).has_span());
        ident.set_span(Span::new(4, 1));
        assert_eq!(NodeRef::Identifier(&ident).span(), Span::new(4, 1));
    }
}
