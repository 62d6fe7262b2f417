//! Source positions and the contract shared by every AST node.

use serde::{Deserialize, Serialize};

use crate::NodeRef;

/// Byte range of the source text a node was parsed from.
///
/// A zero length means the position was never set (synthetic node).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub offset: u32,
    pub length: u32,
}

impl Span {
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    pub const fn end(self) -> u32 {
        self.offset.saturating_add(self.length)
    }

    pub const fn is_set(self) -> bool {
        self.length > 0
    }

    /// Span running from the start of `left` to the end of `right`.
    pub fn covering(left: Span, right: Span) -> Span {
        Span::new(left.offset, right.end().saturating_sub(left.offset))
    }

    pub fn contains(self, other: Span) -> bool {
        self.offset <= other.offset && other.end() <= self.end()
    }
}

/// Contract satisfied by all nodes in the AST.
pub trait Node {
    fn span(&self) -> Span;

    fn set_span(&mut self, span: Span);

    fn has_span(&self) -> bool {
        self.span().is_set()
    }

    /// Child nodes in source order. Absent optional parts are omitted.
    fn children(&self) -> Vec<NodeRef<'_>>;
}

/// Sets the span of `dest`, which was built from several tokens, to cover
/// `leftmost` through `rightmost`.
pub fn combine_span<D, L, R>(dest: &mut D, leftmost: &L, rightmost: &R)
where
    D: Node + ?Sized,
    L: Node + ?Sized,
    R: Node + ?Sized,
{
    dest.set_span(Span::covering(leftmost.span(), rightmost.span()));
}

/// Implements [`Node`] for a struct with a `span` field.
macro_rules! node {
    ($ty:ty) => {
        node!($ty, |_| Vec::new());
    };
    ($ty:ty, |$n:tt| $children:expr) => {
        impl $crate::Node for $ty {
            fn span(&self) -> $crate::Span {
                self.span
            }

            fn set_span(&mut self, span: $crate::Span) {
                self.span = span;
            }

            fn children(&self) -> Vec<$crate::NodeRef<'_>> {
                let $n = self;
                $children
            }
        }
    };
}

pub(crate) use node;
