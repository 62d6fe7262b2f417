//! Whole-tree traversal: span nesting and typing of a parsed-looking tree.
//!
//! Run with: cargo test --package sqlvm-ast --test tree_walk

use sqlvm_ast::*;
use sqlvm_types::{BigDecimal, DataType};

/// Positions an identifier the way a parser would.
fn ident_at(name: &str, offset: u32) -> IdentifierNode {
    let mut node = IdentifierNode::new(name);
    node.set_span(Span::new(offset, name.len() as u32));
    node
}

fn int_at(value: i64, offset: u32, length: u32) -> IntegerValueNode {
    let mut node = IntegerValueNode::new(BigDecimal::from(value));
    node.set_span(Span::new(offset, length));
    node
}

/// `SELECT a FROM t WHERE a > 1 ORDER BY a DESC LIMIT 10`
fn positioned_select() -> Stmt {
    let column = ident_at("a", 7);
    let table = ident_at("t", 14);

    let left: Expr = ident_at("a", 22).into();
    let right: Expr = int_at(1, 26, 1).into();
    let mut condition = BinaryOperatorNode::new(BinaryOp::Greater, left.clone(), right.clone());
    combine_span(&mut condition, &left, &right);
    let mut where_ = WhereOptionNode::new(condition);
    where_.set_span(Span::covering(Span::new(16, 5), where_.condition.span()));

    let mut order = OrderOptionNode::new(ident_at("a", 37), true, false);
    order.set_span(Span::new(37, 6));

    let mut limit = LimitOptionNode::new(int_at(10, 50, 2));
    limit.set_span(Span::new(44, 8));

    let mut select = SelectStmtNode::new(vec![column.into()]);
    select.verb = b"SELECT".to_vec();
    select.table = Some(table);
    select.where_ = Some(where_);
    select.order = vec![order];
    select.limit = Some(limit);
    select.set_span(Span::new(0, 52));
    select.into()
}

fn assert_spans_nest(node: NodeRef<'_>) {
    for child in node.children() {
        if node.has_span() && child.has_span() {
            assert!(
                node.span().contains(child.span()),
                "{:?} does not cover {:?}",
                node.span(),
                child.span()
            );
        }
        assert_spans_nest(child);
    }
}

#[test]
fn test_parent_spans_cover_children() {
    let stmt = positioned_select();
    assert_spans_nest(NodeRef::Stmt(&stmt));
}

#[test]
fn test_combine_span_covers_operands() {
    let stmt = positioned_select();
    let Stmt::Select(select) = &stmt else {
        panic!("expected select");
    };
    let condition = &select.where_.as_ref().unwrap().condition;
    assert_eq!(condition.span(), Span::new(22, 5));
}

#[test]
fn test_walk_visits_every_node() {
    let stmt = positioned_select();
    let mut visited = Vec::new();
    NodeRef::Stmt(&stmt).walk(&mut |node| visited.push(node.span()));
    // stmt, a, t, where, >, a, 1, order, a, limit, 10
    assert_eq!(visited.len(), 11);
    assert_eq!(visited[0], Span::new(0, 52));
}

#[test]
fn test_analysis_assigns_pending_types() {
    let mut stmt = positioned_select();
    let Stmt::Select(select) = &mut stmt else {
        panic!("expected select");
    };
    let uint8 = TypeNode::Int(IntTypeNode::new(true, 8)).data_type().unwrap();

    let condition = &mut select.where_.as_mut().unwrap().condition;
    assert_eq!(condition.data_type(), DataType::BOOL);
    assert!(!condition.is_constant());
    let Expr::Binary(binary) = condition else {
        panic!("expected binary operator");
    };
    for operand in [binary.object.as_mut(), binary.subject.as_mut()] {
        assert_eq!(operand.data_type(), DataType::PENDING);
        operand.set_type(uint8);
        assert_eq!(operand.data_type(), uint8);
    }
    assert_eq!(select.limit.as_ref().unwrap().count(), Ok(10));
}

#[test]
fn test_tree_serializes_with_spans() {
    let stmt = positioned_select();
    let json = serde_json::to_string(&stmt).unwrap();
    let back: Stmt = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stmt);
    assert_eq!(back.kind(), StmtKind::Select);
    assert_eq!(back.verb(), b"SELECT");
}

#[test]
fn test_create_table_declared_types() {
    let declared = ["uint256", "fixed128x18", "bytes32", "bytes", "address", "bool"];
    let columns: Vec<ColumnSchemaNode> = declared
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let dt = match *name {
                "uint256" => TypeNode::Int(IntTypeNode::new(true, 256)),
                "fixed128x18" => TypeNode::Fixed(FixedTypeNode::new(false, 128, 18)),
                "bytes32" => TypeNode::FixedBytes(FixedBytesTypeNode::new(32)),
                "bytes" => TypeNode::DynamicBytes(DynamicBytesTypeNode::default()),
                "address" => TypeNode::Address(AddressTypeNode::default()),
                _ => TypeNode::Bool(BoolTypeNode::default()),
            };
            ColumnSchemaNode::new(IdentifierNode::new(format!("c{i}")), dt)
        })
        .collect();
    let create = CreateTableStmtNode::new(IdentifierNode::new("t"), columns);

    let mut rendered = Vec::new();
    NodeRef::Stmt(&create.into()).walk(&mut |node| {
        if let NodeRef::Type(ty) = node {
            let dt = ty.data_type().unwrap();
            assert_eq!(dt.to_string(), ty.to_string());
            rendered.push(ty.to_string());
        }
    });
    assert_eq!(rendered, declared);
}
