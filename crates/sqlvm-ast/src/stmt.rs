//! Statement nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::node;
use crate::{
    AssignOperatorNode, ConstraintNode, Expr, GroupOptionNode, IdentifierNode, InsertPayload,
    LimitOptionNode, Node, NodeRef, OffsetOptionNode, OrderOptionNode, Span, TypeNode,
    UniqueOptionNode, WhereOptionNode,
};

/// Statements remember the keyword token that introduced them.
pub trait StmtNode: Node {
    fn verb(&self) -> &[u8];

    fn set_verb(&mut self, verb: Vec<u8>);
}

macro_rules! stmt {
    ($ty:ty, |$n:tt| $children:expr) => {
        node!($ty, |$n| $children);

        impl StmtNode for $ty {
            fn verb(&self) -> &[u8] {
                &self.verb
            }

            fn set_verb(&mut self, verb: Vec<u8>) {
                self.verb = verb;
            }
        }
    };
}

/// `SELECT`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectStmtNode {
    pub span: Span,
    pub verb: Vec<u8>,
    pub columns: Vec<Expr>,
    pub table: Option<IdentifierNode>,
    pub where_: Option<WhereOptionNode>,
    pub group: Vec<GroupOptionNode>,
    pub order: Vec<OrderOptionNode>,
    pub limit: Option<LimitOptionNode>,
    pub offset: Option<OffsetOptionNode>,
}

impl SelectStmtNode {
    pub fn new(columns: Vec<Expr>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }
}

stmt!(SelectStmtNode, |n| {
    let mut nodes: Vec<NodeRef<'_>> = n.columns.iter().map(NodeRef::Expr).collect();
    nodes.extend(n.table.as_ref().map(NodeRef::Identifier));
    nodes.extend(n.where_.as_ref().map(NodeRef::Where));
    nodes.extend(n.group.iter().map(NodeRef::Group));
    nodes.extend(n.order.iter().map(NodeRef::Order));
    nodes.extend(n.limit.as_ref().map(NodeRef::Limit));
    nodes.extend(n.offset.as_ref().map(NodeRef::Offset));
    nodes
});

/// `UPDATE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStmtNode {
    pub span: Span,
    pub verb: Vec<u8>,
    pub table: IdentifierNode,
    pub assignments: Vec<AssignOperatorNode>,
    pub where_: Option<WhereOptionNode>,
}

impl UpdateStmtNode {
    pub fn new(table: IdentifierNode, assignments: Vec<AssignOperatorNode>) -> Self {
        Self {
            span: Span::default(),
            verb: Vec::new(),
            table,
            assignments,
            where_: None,
        }
    }
}

stmt!(UpdateStmtNode, |n| {
    let mut nodes = vec![NodeRef::Identifier(&n.table)];
    nodes.extend(n.assignments.iter().map(NodeRef::Assign));
    nodes.extend(n.where_.as_ref().map(NodeRef::Where));
    nodes
});

/// `DELETE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStmtNode {
    pub span: Span,
    pub verb: Vec<u8>,
    pub table: IdentifierNode,
    pub where_: Option<WhereOptionNode>,
}

impl DeleteStmtNode {
    pub fn new(table: IdentifierNode) -> Self {
        Self {
            span: Span::default(),
            verb: Vec::new(),
            table,
            where_: None,
        }
    }
}

stmt!(DeleteStmtNode, |n| {
    let mut nodes = vec![NodeRef::Identifier(&n.table)];
    nodes.extend(n.where_.as_ref().map(NodeRef::Where));
    nodes
});

/// `INSERT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStmtNode {
    pub span: Span,
    pub verb: Vec<u8>,
    pub table: IdentifierNode,
    pub payload: InsertPayload,
}

impl InsertStmtNode {
    pub fn new(table: IdentifierNode, payload: impl Into<InsertPayload>) -> Self {
        Self {
            span: Span::default(),
            verb: Vec::new(),
            table,
            payload: payload.into(),
        }
    }
}

stmt!(InsertStmtNode, |n| vec![
    NodeRef::Identifier(&n.table),
    n.payload.as_node_ref()
]);

/// A column definition in CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchemaNode {
    pub span: Span,
    pub column: IdentifierNode,
    pub data_type: TypeNode,
    pub constraints: Vec<ConstraintNode>,
}

impl ColumnSchemaNode {
    pub fn new(column: IdentifierNode, data_type: TypeNode) -> Self {
        Self {
            span: Span::default(),
            column,
            data_type,
            constraints: Vec::new(),
        }
    }
}

node!(ColumnSchemaNode, |n| {
    let mut nodes = vec![NodeRef::Identifier(&n.column), NodeRef::Type(&n.data_type)];
    nodes.extend(n.constraints.iter().map(NodeRef::Constraint));
    nodes
});

/// `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStmtNode {
    pub span: Span,
    pub verb: Vec<u8>,
    pub table: IdentifierNode,
    pub columns: Vec<ColumnSchemaNode>,
}

impl CreateTableStmtNode {
    pub fn new(table: IdentifierNode, columns: Vec<ColumnSchemaNode>) -> Self {
        Self {
            span: Span::default(),
            verb: Vec::new(),
            table,
            columns,
        }
    }
}

stmt!(CreateTableStmtNode, |n| {
    std::iter::once(NodeRef::Identifier(&n.table))
        .chain(n.columns.iter().map(NodeRef::ColumnSchema))
        .collect()
});

/// `CREATE [UNIQUE] INDEX index ON table (columns...)`.
///
/// Children follow source order, so `UNIQUE` comes first rather than after
/// the column list as in the reference layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexStmtNode {
    pub span: Span,
    pub verb: Vec<u8>,
    pub unique: Option<UniqueOptionNode>,
    pub index: IdentifierNode,
    pub table: IdentifierNode,
    pub columns: Vec<IdentifierNode>,
}

impl CreateIndexStmtNode {
    pub fn new(index: IdentifierNode, table: IdentifierNode, columns: Vec<IdentifierNode>) -> Self {
        Self {
            span: Span::default(),
            verb: Vec::new(),
            unique: None,
            index,
            table,
            columns,
        }
    }
}

// UNIQUE precedes INDEX in the source text.
stmt!(CreateIndexStmtNode, |n| {
    let mut nodes: Vec<NodeRef<'_>> = n.unique.iter().map(NodeRef::Unique).collect();
    nodes.push(NodeRef::Identifier(&n.index));
    nodes.push(NodeRef::Identifier(&n.table));
    nodes.extend(n.columns.iter().map(NodeRef::Identifier));
    nodes
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StmtKind {
    Select,
    Update,
    Delete,
    Insert,
    CreateTable,
    CreateIndex,
}

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StmtKind::Select => "SELECT",
            StmtKind::Update => "UPDATE",
            StmtKind::Delete => "DELETE",
            StmtKind::Insert => "INSERT",
            StmtKind::CreateTable => "CREATE TABLE",
            StmtKind::CreateIndex => "CREATE INDEX",
        })
    }
}

/// Any statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Select(SelectStmtNode),
    Update(UpdateStmtNode),
    Delete(DeleteStmtNode),
    Insert(InsertStmtNode),
    CreateTable(CreateTableStmtNode),
    CreateIndex(CreateIndexStmtNode),
}

macro_rules! dispatch {
    ($self:expr, $n:ident => $body:expr) => {
        match $self {
            Stmt::Select($n) => $body,
            Stmt::Update($n) => $body,
            Stmt::Delete($n) => $body,
            Stmt::Insert($n) => $body,
            Stmt::CreateTable($n) => $body,
            Stmt::CreateIndex($n) => $body,
        }
    };
}

impl Stmt {
    pub fn kind(&self) -> StmtKind {
        match self {
            Stmt::Select(_) => StmtKind::Select,
            Stmt::Update(_) => StmtKind::Update,
            Stmt::Delete(_) => StmtKind::Delete,
            Stmt::Insert(_) => StmtKind::Insert,
            Stmt::CreateTable(_) => StmtKind::CreateTable,
            Stmt::CreateIndex(_) => StmtKind::CreateIndex,
        }
    }
}

impl Node for Stmt {
    fn span(&self) -> Span {
        dispatch!(self, n => n.span())
    }

    fn set_span(&mut self, span: Span) {
        dispatch!(self, n => n.set_span(span))
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        dispatch!(self, n => n.children())
    }
}

impl StmtNode for Stmt {
    fn verb(&self) -> &[u8] {
        dispatch!(self, n => n.verb())
    }

    fn set_verb(&mut self, verb: Vec<u8>) {
        dispatch!(self, n => n.set_verb(verb))
    }
}

impl From<SelectStmtNode> for Stmt {
    fn from(node: SelectStmtNode) -> Self {
        Stmt::Select(node)
    }
}

impl From<UpdateStmtNode> for Stmt {
    fn from(node: UpdateStmtNode) -> Self {
        Stmt::Update(node)
    }
}

impl From<DeleteStmtNode> for Stmt {
    fn from(node: DeleteStmtNode) -> Self {
        Stmt::Delete(node)
    }
}

impl From<InsertStmtNode> for Stmt {
    fn from(node: InsertStmtNode) -> Self {
        Stmt::Insert(node)
    }
}

impl From<CreateTableStmtNode> for Stmt {
    fn from(node: CreateTableStmtNode) -> Self {
        Stmt::CreateTable(node)
    }
}

impl From<CreateIndexStmtNode> for Stmt {
    fn from(node: CreateIndexStmtNode) -> Self {
        Stmt::CreateIndex(node)
    }
}
