use ecma_index::{Idx, IndexVec};
use rustc_hash::{FxHashMap, FxHashSet};

use super::block::{BlockId, MutableBlock, MutableEdge, Node, RawGraph};
use super::error::InvariantViolation;

/// Removes every block without elements, redirecting edges that pointed at it to
/// the first non-empty block (or the end) along its chain of successors.
///
/// Surviving blocks keep their relative order and are renumbered densely.
pub(crate) fn eliminate_empty_blocks(
    graph: RawGraph<'_>,
) -> Result<RawGraph<'_>, InvariantViolation> {
    let RawGraph { blocks, start } = graph;

    let mut replacements: FxHashMap<BlockId, Node> = FxHashMap::default();
    for (id, block) in blocks.iter_enumerated() {
        if !block.is_empty() {
            continue;
        }
        match block.edge {
            MutableEdge::Jump(Some(target)) => {
                replacements.insert(id, target);
            }
            MutableEdge::Jump(None) => {
                return Err(InvariantViolation::UnwiredLoopGuard { index: id.index() });
            }
            MutableEdge::Branch { .. } => {
                return Err(InvariantViolation::EmptyBranch { index: id.index() });
            }
        }
    }

    if replacements.is_empty() {
        return Ok(RawGraph { blocks, start });
    }

    let mut renumbered: IndexVec<BlockId, Option<BlockId>> =
        IndexVec::with_capacity(blocks.len());
    let mut survivors = 0;
    for block in &blocks {
        if block.is_empty() {
            renumbered.push(None);
        } else {
            renumbered.push(Some(BlockId::new(survivors)));
            survivors += 1;
        }
    }

    let resolve = |node: Node| -> Result<Node, InvariantViolation> {
        let mut node = node;
        let mut seen = FxHashSet::default();
        while let Node::Block(id) = node {
            let Some(&next) = replacements.get(&id) else {
                break;
            };
            if !seen.insert(id) {
                return Err(InvariantViolation::EmptyCycle { index: id.index() });
            }
            node = next;
        }
        match node {
            Node::Block(id) => renumbered[id]
                .map(Node::Block)
                .ok_or(InvariantViolation::EmptyBlock { index: id.index() }),
            Node::End => Ok(Node::End),
        }
    };

    let mut eliminated = IndexVec::with_capacity(survivors);
    for (id, block) in blocks.iter_enumerated() {
        if block.is_empty() {
            tracing::trace!(block = id.index(), "eliminating empty block");
            continue;
        }
        let edge = match block.edge {
            MutableEdge::Jump(target) => MutableEdge::Jump(target.map(resolve).transpose()?),
            MutableEdge::Branch { on_true, on_false } => MutableEdge::Branch {
                on_true: on_true.map(resolve).transpose()?,
                on_false: resolve(on_false)?,
            },
        };
        let mut rewired: MutableBlock<'_> = block.clone();
        rewired.edge = edge;
        eliminated.push(rewired);
    }

    Ok(RawGraph {
        blocks: eliminated,
        start: resolve(start)?,
    })
}

#[cfg(test)]
mod tests {
    use ecma_ast::{AnyNodeRef, Expr, ExprName, TextRange, TextSize};
    use ecma_index::{Idx, IndexVec};

    use super::eliminate_empty_blocks;
    use crate::cfg::block::{BlockId, MutableBlock, MutableEdge, Node, RawGraph};
    use crate::cfg::error::InvariantViolation;

    fn name(id: &str, start: u32) -> Expr {
        Expr::Name(ExprName {
            range: TextRange::at(TextSize::new(start), TextSize::of(id)),
            id: id.to_string(),
        })
    }

    fn block<'a>(element: Option<&'a Expr>, edge: MutableEdge) -> MutableBlock<'a> {
        let mut block = MutableBlock::new(edge);
        if let Some(element) = element {
            block.prepend(AnyNodeRef::from(element));
        }
        block
    }

    fn jump(index: usize) -> MutableEdge {
        MutableEdge::Jump(Some(Node::Block(BlockId::new(index))))
    }

    #[test]
    fn follows_chains_of_empty_blocks() {
        let a = name("a", 0);
        let b = name("b", 2);
        // 0 (empty) -> 1 (empty) -> 2 [a] -> 3 (empty) -> 4 [b] -> END
        let blocks: IndexVec<BlockId, MutableBlock> = [
            block(None, jump(1)),
            block(None, jump(2)),
            block(Some(&a), jump(3)),
            block(None, jump(4)),
            block(Some(&b), MutableEdge::Jump(Some(Node::End))),
        ]
        .into_iter()
        .collect();

        let graph = eliminate_empty_blocks(RawGraph {
            blocks,
            start: Node::Block(BlockId::new(0)),
        })
        .unwrap();

        assert_eq!(graph.start, Node::Block(BlockId::new(0)));
        assert_eq!(graph.blocks.len(), 2);
        assert_eq!(graph.blocks[BlockId::new(0)].edge, jump(1));
        assert_eq!(
            graph.blocks[BlockId::new(1)].edge,
            MutableEdge::Jump(Some(Node::End))
        );
    }

    #[test]
    fn rewrites_each_branch_side() {
        let a = name("a", 0);
        let b = name("b", 2);
        let blocks: IndexVec<BlockId, MutableBlock> = [
            block(
                Some(&a),
                MutableEdge::Branch {
                    on_true: Some(Node::Block(BlockId::new(1))),
                    on_false: Node::Block(BlockId::new(2)),
                },
            ),
            block(None, jump(3)),
            block(None, MutableEdge::Jump(Some(Node::End))),
            block(Some(&b), MutableEdge::Jump(Some(Node::End))),
        ]
        .into_iter()
        .collect();

        let graph = eliminate_empty_blocks(RawGraph {
            blocks,
            start: Node::Block(BlockId::new(0)),
        })
        .unwrap();

        assert_eq!(
            graph.blocks[BlockId::new(0)].edge,
            MutableEdge::Branch {
                on_true: Some(Node::Block(BlockId::new(1))),
                on_false: Node::End,
            }
        );
    }

    #[test]
    fn empty_start_resolves_to_end() {
        let blocks: IndexVec<BlockId, MutableBlock> =
            [block(None, MutableEdge::Jump(Some(Node::End)))]
                .into_iter()
                .collect();
        let graph = eliminate_empty_blocks(RawGraph {
            blocks,
            start: Node::Block(BlockId::new(0)),
        })
        .unwrap();
        assert_eq!(graph.start, Node::End);
        assert!(graph.blocks.is_empty());
    }

    #[test]
    fn is_idempotent() {
        let a = name("a", 0);
        let blocks: IndexVec<BlockId, MutableBlock> = [
            block(None, jump(1)),
            block(Some(&a), MutableEdge::Jump(Some(Node::End))),
        ]
        .into_iter()
        .collect();
        let once = eliminate_empty_blocks(RawGraph {
            blocks,
            start: Node::Block(BlockId::new(0)),
        })
        .unwrap();
        let twice = eliminate_empty_blocks(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_empty_cycles() {
        let blocks: IndexVec<BlockId, MutableBlock> =
            [block(None, jump(1)), block(None, jump(0))].into_iter().collect();
        let error = eliminate_empty_blocks(RawGraph {
            blocks,
            start: Node::Block(BlockId::new(0)),
        })
        .unwrap_err();
        assert!(matches!(error, InvariantViolation::EmptyCycle { .. }));
    }

    #[test]
    fn rejects_empty_branches() {
        let blocks: IndexVec<BlockId, MutableBlock> = [block(
            None,
            MutableEdge::Branch {
                on_true: Some(Node::End),
                on_false: Node::End,
            },
        )]
        .into_iter()
        .collect();
        let error = eliminate_empty_blocks(RawGraph {
            blocks,
            start: Node::Block(BlockId::new(0)),
        })
        .unwrap_err();
        assert_eq!(error, InvariantViolation::EmptyBranch { index: 0 });
    }
}
