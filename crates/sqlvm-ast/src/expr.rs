//! Expression nodes.
//!
//! Untagged nodes know their type from the variant alone. Tagged nodes carry
//! a `ty` field that starts as [`DataType::PENDING`] and is assigned once by
//! the analysis pass.

use serde::{Deserialize, Serialize};
use sqlvm_types::{BigDecimal, DataType};

use crate::span::node;
use crate::{Node, NodeRef, Span, TypeNode};

/// Constant folding and typing, shared by all expression nodes.
pub trait ExprNode: Node {
    /// Whether the value is known at compile time.
    fn is_constant(&self) -> bool;

    fn data_type(&self) -> DataType;

    /// Assigns the type resolved by analysis.
    ///
    /// # Panics
    ///
    /// Panics on untagged nodes, whose type is fixed by the variant.
    fn set_type(&mut self, dt: DataType);
}

macro_rules! tagged_expr {
    ($ty:ty, |$n:tt| $constant:expr) => {
        impl ExprNode for $ty {
            fn is_constant(&self) -> bool {
                let $n = self;
                $constant
            }

            fn data_type(&self) -> DataType {
                self.ty
            }

            fn set_type(&mut self, dt: DataType) {
                self.ty = dt;
            }
        }
    };
}

macro_rules! untagged_expr {
    ($ty:ty, |$m:tt| $dt:expr, |$n:tt| $constant:expr) => {
        impl ExprNode for $ty {
            fn is_constant(&self) -> bool {
                let $n = self;
                $constant
            }

            fn data_type(&self) -> DataType {
                let $m = self;
                $dt
            }

            fn set_type(&mut self, _: DataType) {
                panic!("setting type on untagged expression node");
            }
        }
    };
}

/// References a table, column, or function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierNode {
    pub span: Span,
    pub ty: DataType,
    pub name: Vec<u8>,
}

impl IdentifierNode {
    pub fn new(name: impl Into<Vec<u8>>) -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
            name: name.into(),
        }
    }
}

node!(IdentifierNode);
tagged_expr!(IdentifierNode, |_| false);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolValueNode {
    pub span: Span,
    pub value: bool,
}

impl BoolValueNode {
    pub fn new(value: bool) -> Self {
        Self {
            span: Span::default(),
            value,
        }
    }
}

node!(BoolValueNode);
untagged_expr!(BoolValueNode, |_| DataType::BOOL, |_| true);

/// Integer constant. Hex literals of address width set `is_address`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerValueNode {
    pub span: Span,
    pub ty: DataType,
    pub is_address: bool,
    pub value: BigDecimal,
}

impl IntegerValueNode {
    pub fn new(value: BigDecimal) -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
            is_address: false,
            value,
        }
    }

    pub fn address(value: BigDecimal) -> Self {
        Self {
            is_address: true,
            ..Self::new(value)
        }
    }
}

node!(IntegerValueNode);
tagged_expr!(IntegerValueNode, |_| true);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimalValueNode {
    pub span: Span,
    pub ty: DataType,
    pub value: BigDecimal,
}

impl DecimalValueNode {
    pub fn new(value: BigDecimal) -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
            value,
        }
    }
}

node!(DecimalValueNode);
tagged_expr!(DecimalValueNode, |_| true);

/// Fixed or dynamic bytes constant; which one is decided by analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BytesValueNode {
    pub span: Span,
    pub ty: DataType,
    pub value: Vec<u8>,
}

impl BytesValueNode {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
            value: value.into(),
        }
    }
}

node!(BytesValueNode);
tagged_expr!(BytesValueNode, |_| true);

/// `*` in a select list or function call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnyValueNode {
    pub span: Span,
}

node!(AnyValueNode);
untagged_expr!(AnyValueNode, |_| DataType::ANY, |_| false);

/// `DEFAULT` in INSERT and UPDATE.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultValueNode {
    pub span: Span,
}

node!(DefaultValueNode);
untagged_expr!(DefaultValueNode, |_| DataType::DEFAULT, |_| true);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullValueNode {
    pub span: Span,
    pub ty: DataType,
}

impl Default for NullValueNode {
    fn default() -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
        }
    }
}

node!(NullValueNode);
tagged_expr!(NullValueNode, |_| true);

/// `NOT expr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotOperatorNode {
    pub span: Span,
    pub target: Box<Expr>,
}

impl NotOperatorNode {
    pub fn new(target: Expr) -> Self {
        Self {
            span: Span::default(),
            target: Box::new(target),
        }
    }
}

node!(NotOperatorNode, |n| vec![NodeRef::Expr(&n.target)]);
untagged_expr!(NotOperatorNode, |_| DataType::BOOL, |n| n.target.is_constant());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `+expr`
    Pos,
    /// `-expr`
    Neg,
    /// `(expr)`
    Paren,
}

/// Unary operators whose type follows the operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryOperatorNode {
    pub span: Span,
    pub ty: DataType,
    pub op: UnaryOp,
    pub target: Box<Expr>,
}

impl UnaryOperatorNode {
    pub fn new(op: UnaryOp, target: Expr) -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
            op,
            target: Box::new(target),
        }
    }
}

node!(UnaryOperatorNode, |n| vec![NodeRef::Expr(&n.target)]);
tagged_expr!(UnaryOperatorNode, |n| n.target.is_constant());

/// Binary operators producing `bool`, plus `||` producing `bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    And,
    Or,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    /// `||`
    Concat,
    /// `IS NULL`; `IS NOT NULL` wraps this in `NOT`.
    Is,
}

impl BinaryOp {
    pub fn result_type(self) -> DataType {
        match self {
            BinaryOp::Concat => DataType::DYNAMIC_BYTES,
            _ => DataType::BOOL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOperatorNode {
    pub span: Span,
    pub op: BinaryOp,
    pub object: Box<Expr>,
    pub subject: Box<Expr>,
}

impl BinaryOperatorNode {
    pub fn new(op: BinaryOp, object: Expr, subject: Expr) -> Self {
        Self {
            span: Span::default(),
            op,
            object: Box::new(object),
            subject: Box::new(subject),
        }
    }
}

node!(BinaryOperatorNode, |n| vec![
    NodeRef::Expr(&n.object),
    NodeRef::Expr(&n.subject)
]);
untagged_expr!(BinaryOperatorNode, |n| n.op.result_type(), |n| {
    n.object.is_constant() && n.subject.is_constant()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Numeric binary operators; the result type depends on the operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticOperatorNode {
    pub span: Span,
    pub ty: DataType,
    pub op: ArithmeticOp,
    pub object: Box<Expr>,
    pub subject: Box<Expr>,
}

impl ArithmeticOperatorNode {
    pub fn new(op: ArithmeticOp, object: Expr, subject: Expr) -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
            op,
            object: Box::new(object),
            subject: Box::new(subject),
        }
    }
}

node!(ArithmeticOperatorNode, |n| vec![
    NodeRef::Expr(&n.object),
    NodeRef::Expr(&n.subject)
]);
tagged_expr!(ArithmeticOperatorNode, |n| {
    n.object.is_constant() && n.subject.is_constant()
});

/// `object LIKE subject [ESCAPE escape]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeOperatorNode {
    pub span: Span,
    pub object: Box<Expr>,
    pub subject: Box<Expr>,
    pub escape: Option<Box<Expr>>,
}

impl LikeOperatorNode {
    pub fn new(object: Expr, subject: Expr, escape: Option<Expr>) -> Self {
        Self {
            span: Span::default(),
            object: Box::new(object),
            subject: Box::new(subject),
            escape: escape.map(Box::new),
        }
    }
}

node!(LikeOperatorNode, |n| {
    let mut nodes = vec![NodeRef::Expr(&n.object), NodeRef::Expr(&n.subject)];
    nodes.extend(n.escape.as_deref().map(NodeRef::Expr));
    nodes
});
untagged_expr!(LikeOperatorNode, |_| DataType::BOOL, |n| {
    n.object.is_constant()
        && n.subject.is_constant()
        && n.escape.as_ref().map_or(true, |e| e.is_constant())
});

/// `CAST(source AS target)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastOperatorNode {
    pub span: Span,
    pub ty: DataType,
    pub source: Box<Expr>,
    pub target: TypeNode,
}

impl CastOperatorNode {
    pub fn new(source: Expr, target: TypeNode) -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
            source: Box::new(source),
            target,
        }
    }
}

node!(CastOperatorNode, |n| vec![
    NodeRef::Expr(&n.source),
    NodeRef::Type(&n.target)
]);
tagged_expr!(CastOperatorNode, |n| n.source.is_constant());

/// `left IN (right...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InOperatorNode {
    pub span: Span,
    pub left: Box<Expr>,
    pub right: Vec<Expr>,
}

impl InOperatorNode {
    pub fn new(left: Expr, right: Vec<Expr>) -> Self {
        Self {
            span: Span::default(),
            left: Box::new(left),
            right,
        }
    }
}

node!(InOperatorNode, |n| {
    std::iter::once(NodeRef::Expr(&n.left))
        .chain(n.right.iter().map(NodeRef::Expr))
        .collect()
});
untagged_expr!(InOperatorNode, |_| DataType::BOOL, |n| {
    n.left.is_constant() && n.right.iter().all(Expr::is_constant)
});

/// Function call. Never constant, since functions may read context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionOperatorNode {
    pub span: Span,
    pub ty: DataType,
    pub name: IdentifierNode,
    pub args: Vec<Expr>,
}

impl FunctionOperatorNode {
    pub fn new(name: IdentifierNode, args: Vec<Expr>) -> Self {
        Self {
            span: Span::default(),
            ty: DataType::PENDING,
            name,
            args,
        }
    }
}

node!(FunctionOperatorNode, |n| {
    std::iter::once(NodeRef::Identifier(&n.name))
        .chain(n.args.iter().map(NodeRef::Expr))
        .collect()
});
tagged_expr!(FunctionOperatorNode, |_| false);

/// Borrowed view of a literal's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Bool(bool),
    Integer(&'a BigDecimal),
    Decimal(&'a BigDecimal),
    Bytes(&'a [u8]),
    Any,
    Default,
    Null,
}

/// Any expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Identifier(IdentifierNode),
    Bool(BoolValueNode),
    Integer(IntegerValueNode),
    Decimal(DecimalValueNode),
    Bytes(BytesValueNode),
    Any(AnyValueNode),
    Default(DefaultValueNode),
    Null(NullValueNode),
    Not(NotOperatorNode),
    Unary(UnaryOperatorNode),
    Binary(BinaryOperatorNode),
    Arithmetic(ArithmeticOperatorNode),
    Like(LikeOperatorNode),
    Cast(CastOperatorNode),
    In(InOperatorNode),
    Function(FunctionOperatorNode),
}

macro_rules! dispatch {
    ($self:expr, $n:ident => $body:expr) => {
        match $self {
            Expr::Identifier($n) => $body,
            Expr::Bool($n) => $body,
            Expr::Integer($n) => $body,
            Expr::Decimal($n) => $body,
            Expr::Bytes($n) => $body,
            Expr::Any($n) => $body,
            Expr::Default($n) => $body,
            Expr::Null($n) => $body,
            Expr::Not($n) => $body,
            Expr::Unary($n) => $body,
            Expr::Binary($n) => $body,
            Expr::Arithmetic($n) => $body,
            Expr::Like($n) => $body,
            Expr::Cast($n) => $body,
            Expr::In($n) => $body,
            Expr::Function($n) => $body,
        }
    };
}

impl Expr {
    /// Whether the type comes from analysis rather than the variant.
    pub fn is_tagged(&self) -> bool {
        matches!(
            self,
            Expr::Identifier(_)
                | Expr::Integer(_)
                | Expr::Decimal(_)
                | Expr::Bytes(_)
                | Expr::Null(_)
                | Expr::Unary(_)
                | Expr::Arithmetic(_)
                | Expr::Cast(_)
                | Expr::Function(_)
        )
    }

    pub fn literal(&self) -> Option<LiteralValue<'_>> {
        match self {
            Expr::Bool(n) => Some(LiteralValue::Bool(n.value)),
            Expr::Integer(n) => Some(LiteralValue::Integer(&n.value)),
            Expr::Decimal(n) => Some(LiteralValue::Decimal(&n.value)),
            Expr::Bytes(n) => Some(LiteralValue::Bytes(&n.value)),
            Expr::Any(_) => Some(LiteralValue::Any),
            Expr::Default(_) => Some(LiteralValue::Default),
            Expr::Null(_) => Some(LiteralValue::Null),
            _ => None,
        }
    }
}

impl Node for Expr {
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

impl ExprNode for Expr {
    fn is_constant(&self) -> bool {
        dispatch!(self, n => n.is_constant())
    }

    fn data_type(&self) -> DataType {
        dispatch!(self, n => n.data_type())
    }

    fn set_type(&mut self, dt: DataType) {
        dispatch!(self, n => n.set_type(dt))
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(node: $ty) -> Self {
                    Expr::$variant(node)
                }
            }
        )*
    };
}

impl_from!(
    Identifier(IdentifierNode),
    Bool(BoolValueNode),
    Integer(IntegerValueNode),
    Decimal(DecimalValueNode),
    Bytes(BytesValueNode),
    Any(AnyValueNode),
    Default(DefaultValueNode),
    Null(NullValueNode),
    Not(NotOperatorNode),
    Unary(UnaryOperatorNode),
    Binary(BinaryOperatorNode),
    Arithmetic(ArithmeticOperatorNode),
    Like(LikeOperatorNode),
    Cast(CastOperatorNode),
    In(InOperatorNode),
    Function(FunctionOperatorNode),
);
