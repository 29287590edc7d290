use ecma_ast::{AnyNodeRef, Ranged, TextRange};
use ecma_index::{Idx, IndexVec};
use smallvec::SmallVec;

use super::block::{BlockId, MutableEdge, Node, RawGraph};
use super::error::InvariantViolation;

/// Read access to a control-flow graph.
pub trait ControlFlowGraph<'a> {
    /// The entry of the graph. Equal to [`Node::End`] iff the graph has no blocks.
    fn start(&self) -> Node;

    fn num_blocks(&self) -> usize;

    /// The elements of `block`, in source order.
    fn elements(&self, block: BlockId) -> &[AnyNodeRef<'a>];

    fn edge(&self, block: BlockId) -> Edge;

    /// The distinct successors of `node`: blocks by index, then [`Node::End`].
    /// Empty for [`Node::End`].
    fn successors(&self, node: Node) -> &[Node];

    /// The distinct blocks with an edge to `node`, by index.
    fn predecessors(&self, node: Node) -> &[BlockId];
}

/// The outgoing edge of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Always(Node),
    /// A two-way branch on the block's last element.
    Branch { on_true: Node, on_false: Node },
}

impl Edge {
    pub fn targets(self) -> impl Iterator<Item = Node> {
        let (first, second) = match self {
            Edge::Always(target) => (target, None),
            Edge::Branch { on_true, on_false } => (on_true, Some(on_false)),
        };
        std::iter::once(first).chain(second)
    }

    pub const fn is_branch(self) -> bool {
        matches!(self, Edge::Branch { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockData<'a> {
    elements: Vec<AnyNodeRef<'a>>,
    edge: Edge,
    successors: SmallVec<[Node; 2]>,
    predecessors: Vec<BlockId>,
}

impl<'a> BlockData<'a> {
    pub fn elements(&self) -> &[AnyNodeRef<'a>] {
        &self.elements
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// The controlling expression of a branching block.
    pub fn condition(&self) -> Option<AnyNodeRef<'a>> {
        if self.edge.is_branch() {
            self.elements.last().copied()
        } else {
            None
        }
    }

    pub fn successors(&self) -> &[Node] {
        &self.successors
    }

    pub fn predecessors(&self) -> &[BlockId] {
        &self.predecessors
    }
}

impl Ranged for BlockData<'_> {
    /// From the start of the first element to the end of the last one.
    fn range(&self) -> TextRange {
        match (self.elements.first(), self.elements.last()) {
            (Some(first), Some(last)) => TextRange::new(first.start(), last.end()),
            _ => TextRange::default(),
        }
    }
}

/// An immutable control-flow graph of one script or function body.
///
/// Blocks are numbered in source order of their first element.
#[derive(Debug, Clone, PartialEq)]
pub struct Cfg<'a> {
    blocks: IndexVec<BlockId, BlockData<'a>>,
    start: Node,
    end_predecessors: Vec<BlockId>,
}

impl<'a> Cfg<'a> {
    /// Freezes wired blocks into a graph, ordering them by source position.
    pub(crate) fn from_raw(raw: RawGraph<'a>) -> Result<Self, InvariantViolation> {
        let RawGraph {
            blocks: raw_blocks,
            start,
        } = raw;

        let mut order = Vec::with_capacity(raw_blocks.len());
        for (id, block) in raw_blocks.iter_enumerated() {
            let Some(position) = block.start() else {
                return Err(InvariantViolation::EmptyBlock { index: id.index() });
            };
            order.push((position, id));
        }
        order.sort_unstable();

        let mut renumbered: IndexVec<BlockId, BlockId> =
            IndexVec::from_raw(vec![BlockId::new(0); raw_blocks.len()]);
        for (index, (_, id)) in order.iter().enumerate() {
            renumbered[*id] = BlockId::new(index);
        }
        let map = |node: Node| match node {
            Node::Block(id) => Node::Block(renumbered[id]),
            Node::End => Node::End,
        };

        let mut blocks: IndexVec<BlockId, BlockData<'a>> = IndexVec::with_capacity(order.len());
        for (_, id) in &order {
            let block = &raw_blocks[*id];
            let edge = match block.edge {
                MutableEdge::Jump(Some(target)) => Edge::Always(map(target)),
                MutableEdge::Branch {
                    on_true: Some(on_true),
                    on_false,
                } => Edge::Branch {
                    on_true: map(on_true),
                    on_false: map(on_false),
                },
                MutableEdge::Jump(None) | MutableEdge::Branch { on_true: None, .. } => {
                    return Err(InvariantViolation::UnwiredLoopGuard { index: id.index() });
                }
            };

            let mut successors: SmallVec<[Node; 2]> = edge.targets().collect();
            successors.sort_unstable();
            successors.dedup();

            blocks.push(BlockData {
                elements: block.elements().collect(),
                edge,
                successors,
                predecessors: Vec::new(),
            });
        }

        let mut end_predecessors = Vec::new();
        for id in blocks.indices() {
            for successor in blocks[id].successors.clone() {
                match successor {
                    Node::Block(target) => blocks[target].predecessors.push(id),
                    Node::End => end_predecessors.push(id),
                }
            }
        }

        Ok(Self {
            blocks,
            start: map(start),
            end_predecessors,
        })
    }

    /// The end sentinel.
    pub const fn end(&self) -> Node {
        Node::End
    }

    pub fn blocks(&self) -> &IndexVec<BlockId, BlockData<'a>> {
        &self.blocks
    }

    pub fn block(&self, block: BlockId) -> &BlockData<'a> {
        &self.blocks[block]
    }

    /// The block ids in source order. The iterator does not borrow the graph.
    pub fn block_ids(&self) -> impl DoubleEndedIterator<Item = BlockId> + ExactSizeIterator {
        (0..self.blocks.len()).map(BlockId::new)
    }
}

impl<'a> ControlFlowGraph<'a> for Cfg<'a> {
    fn start(&self) -> Node {
        self.start
    }

    fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    fn elements(&self, block: BlockId) -> &[AnyNodeRef<'a>] {
        &self.blocks[block].elements
    }

    fn edge(&self, block: BlockId) -> Edge {
        self.blocks[block].edge
    }

    fn successors(&self, node: Node) -> &[Node] {
        match node {
            Node::Block(block) => &self.blocks[block].successors,
            Node::End => &[],
        }
    }

    fn predecessors(&self, node: Node) -> &[BlockId] {
        match node {
            Node::Block(block) => &self.blocks[block].predecessors,
            Node::End => &self.end_predecessors,
        }
    }
}

#[cfg(test)]
mod tests {
    use ecma_ast::{Ranged, TextRange, TextSize};
    use ecma_index::{Idx, IndexVec};
    use ecma_parser::parse_script;

    use super::{Cfg, ControlFlowGraph, Edge};
    use crate::cfg::block::{BlockId, MutableBlock, MutableEdge, Node, RawGraph};
    use crate::cfg::build_cfg;
    use crate::cfg::error::InvariantViolation;

    #[test]
    fn rejects_empty_blocks() {
        let blocks: IndexVec<BlockId, MutableBlock> =
            [MutableBlock::new(MutableEdge::Jump(Some(Node::End)))]
                .into_iter()
                .collect();
        let error = Cfg::from_raw(RawGraph {
            blocks,
            start: Node::Block(BlockId::new(0)),
        })
        .unwrap_err();
        assert_eq!(error, InvariantViolation::EmptyBlock { index: 0 });
        assert_eq!(
            error.to_string(),
            "cannot build block 0 without any element"
        );
    }

    #[test]
    fn predecessors_mirror_successors() {
        let script = parse_script("while (a) { if (b) { f(); } else { g(); } } h();").unwrap();
        let cfg = build_cfg(&script.body).unwrap();

        for block in cfg.block_ids() {
            for successor in cfg.successors(Node::Block(block)) {
                assert!(cfg.predecessors(*successor).contains(&block));
            }
            for predecessor in cfg.predecessors(Node::Block(block)) {
                assert!(cfg
                    .successors(Node::Block(*predecessor))
                    .contains(&Node::Block(block)));
            }
        }
        assert_eq!(cfg.predecessors(Node::End), [BlockId::new(4)]);
    }

    #[test]
    fn block_ids_outlive_the_graph() {
        let script = parse_script("while (a) { f(); } g();").unwrap();
        let block_ids = {
            let cfg = build_cfg(&script.body).unwrap();
            cfg.block_ids()
        };
        assert_eq!(
            block_ids.rev().map(BlockId::index).collect::<Vec<_>>(),
            [2, 1, 0]
        );
    }

    #[test]
    fn branch_to_same_target_has_one_successor() {
        let script = parse_script("if (a) {} f();").unwrap();
        let cfg = build_cfg(&script.body).unwrap();
        let guard = BlockId::new(0);
        assert_eq!(
            cfg.edge(guard),
            Edge::Branch {
                on_true: Node::Block(BlockId::new(1)),
                on_false: Node::Block(BlockId::new(1)),
            }
        );
        assert_eq!(cfg.successors(Node::Block(guard)), [Node::Block(BlockId::new(1))]);
        assert_eq!(cfg.predecessors(Node::Block(BlockId::new(1))), [guard]);
    }

    #[test]
    fn block_range_covers_elements() {
        let source = "a(); b(); if (c) {}";
        let script = parse_script(source).unwrap();
        let cfg = build_cfg(&script.body).unwrap();
        let block = cfg.block(BlockId::new(0));
        assert_eq!(
            block.range(),
            TextRange::new(TextSize::new(0), TextSize::new(15))
        );
        assert_eq!(&source[block.range()], "a(); b(); if (c");
    }
}
