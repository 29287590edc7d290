use std::fmt;

use ecma_ast::{AnyNodeRef, Ranged, TextSize};
use ecma_index::{newtype_index, IndexVec};

newtype_index! {
    /// Index of a basic block in a control-flow graph.
    pub struct BlockId;
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// A node of the control-flow graph: either a basic block or the end sentinel.
///
/// Nodes order blocks by index, with [`Node::End`] last.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, is_macro::Is)]
pub enum Node {
    Block(BlockId),
    End,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Block(block) => write!(f, "{block}"),
            Node::End => f.write_str("END"),
        }
    }
}

/// Outgoing edge of a block under construction.
///
/// A `None` target marks a loop guard whose body has not been built yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MutableEdge {
    Jump(Option<Node>),
    Branch {
        on_true: Option<Node>,
        on_false: Node,
    },
}

/// A block under construction.
///
/// The builder walks statements last to first, so elements are stored in reverse
/// source order and [`MutableBlock::prepend`] is a push.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MutableBlock<'a> {
    reversed_elements: Vec<AnyNodeRef<'a>>,
    pub(crate) edge: MutableEdge,
}

impl<'a> MutableBlock<'a> {
    pub(crate) fn new(edge: MutableEdge) -> Self {
        Self {
            reversed_elements: Vec::new(),
            edge,
        }
    }

    pub(crate) fn prepend(&mut self, element: AnyNodeRef<'a>) {
        self.reversed_elements.push(element);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.reversed_elements.is_empty()
    }

    /// The elements in source order.
    pub(crate) fn elements(&self) -> impl Iterator<Item = AnyNodeRef<'a>> + '_ {
        self.reversed_elements.iter().rev().copied()
    }

    /// Start offset of the first element in source order.
    pub(crate) fn start(&self) -> Option<TextSize> {
        self.reversed_elements.last().map(Ranged::start)
    }

    /// Points the unwired side of a loop guard at the loop body.
    pub(crate) fn enter_loop(&mut self, body: Node) {
        match &mut self.edge {
            MutableEdge::Jump(target @ None)
            | MutableEdge::Branch {
                on_true: target @ None,
                ..
            } => *target = Some(body),
            _ => debug_assert!(false, "loop guard wired twice"),
        }
    }
}

/// The wired blocks produced by the builder, before freezing.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawGraph<'a> {
    pub(crate) blocks: IndexVec<BlockId, MutableBlock<'a>>,
    pub(crate) start: Node,
}

#[cfg(test)]
mod tests {
    use ecma_ast::{AnyNodeRef, Expr, ExprName, TextRange, TextSize};
    use ecma_index::Idx;

    use super::{BlockId, MutableBlock, MutableEdge, Node};

    fn name(id: &str, start: u32) -> Expr {
        let start = TextSize::new(start);
        Expr::Name(ExprName {
            range: TextRange::at(start, TextSize::of(id)),
            id: id.to_string(),
        })
    }

    #[test]
    fn end_sorts_after_blocks() {
        let mut nodes = vec![
            Node::End,
            Node::Block(BlockId::new(3)),
            Node::Block(BlockId::new(1)),
        ];
        nodes.sort();
        assert_eq!(
            nodes,
            [Node::Block(BlockId::new(1)), Node::Block(BlockId::new(3)), Node::End]
        );
        assert_eq!(nodes[2].to_string(), "END");
    }

    #[test]
    fn prepend_keeps_source_order() {
        let a = name("a", 0);
        let b = name("b", 2);
        let mut block = MutableBlock::new(MutableEdge::Jump(Some(Node::End)));
        assert!(block.is_empty());
        assert_eq!(block.start(), None);

        block.prepend(AnyNodeRef::from(&b));
        block.prepend(AnyNodeRef::from(&a));

        let elements: Vec<_> = block.elements().collect();
        assert!(elements[0].ptr_eq(AnyNodeRef::from(&a)));
        assert!(elements[1].ptr_eq(AnyNodeRef::from(&b)));
        assert_eq!(block.start(), Some(TextSize::new(0)));
    }

    #[test]
    fn enter_loop_wires_the_pending_side() {
        let mut guard = MutableBlock::new(MutableEdge::Branch {
            on_true: None,
            on_false: Node::End,
        });
        let body = Node::Block(BlockId::new(2));
        guard.enter_loop(body);
        assert_eq!(
            guard.edge,
            MutableEdge::Branch {
                on_true: Some(body),
                on_false: Node::End
            }
        );
    }
}
