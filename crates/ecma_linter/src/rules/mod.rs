pub(crate) use complexity::*;
pub(crate) use never_loops::*;
pub(crate) use unreachable_code::*;

use ecma_index::IndexVec;
use ecma_semantic::cfg::{BlockId, Cfg, ControlFlowGraph, Node};

mod complexity;
mod never_loops;
mod unreachable_code;

/// Marks the blocks reachable from `from`, including `from` itself.
fn reachable_blocks(cfg: &Cfg, from: Node) -> IndexVec<BlockId, bool> {
    let mut reachable: IndexVec<BlockId, bool> =
        IndexVec::from_raw(vec![false; cfg.num_blocks()]);
    let mut stack = vec![from];
    while let Some(node) = stack.pop() {
        let Node::Block(block) = node else {
            continue;
        };
        if reachable[block] {
            continue;
        }
        reachable[block] = true;
        stack.extend_from_slice(cfg.successors(node));
    }
    reachable
}
