//! # Overview
//! A control-flow graph (CFG) splits a script or function body into _basic
//! blocks_: maximal runs of elements that execute one after the other. Each
//! block ends in a single edge to its successor, or in a two-way branch on
//! its last element. A unique _end_ node stands for normal completion.
//!
//! The elements of a block are expressions (`foo()` for the statement
//! `foo();`, a loop test, a `case` test) or whole statements that do not
//! branch themselves (declarations, `return`, `break`, ...).
//!
//! ## Building backwards
//!
//! The builder walks each statement list from the last statement to the
//! first. When a statement is visited, everything that follows it has been
//! built, so its successor is known and edges never need patching later.
//! The one exception is a loop guard, whose body is built after the guard
//! because the body jumps back to it.
//!
//! A cursor (the _current_ block) receives the elements of straight-line
//! statements. Control flow moves the cursor to a fresh block. For example,
//!
//! ```js
//! f0();
//! while (cond) {
//!   f1();
//! }
//! f2();
//! ```
//!
//! produces
//!
//! ```text
//!      +------+
//!      | f0() |
//!      +------+
//!         |
//!         v
//!      +------+ false  +------+
//!  +-->| cond |------->| f2() |
//!  |   +------+        +------+
//!  |      | true          |
//!  |      v               v
//!  |   +------+        +-----+
//!  +---| f1() |        | End |
//!      +------+        +-----+
//! ```
//!
//! ## Jumps
//!
//! `break` and `continue` look up the innermost enclosing loop, `switch` or
//! labeled statement that accepts them. `throw` goes to the innermost
//! enclosing `catch` (or `finally`) block, or to the end. `return` always
//! goes to the end.
//!
//! Statements following a jump in the same list end up in a block nothing
//! points to. Such blocks stay in the graph; they are unreachable code.
//!
//! ## Empty blocks
//!
//! Building leaves behind blocks without elements (the cursor left behind by
//! a jump, an empty loop body, an `if` without statements after it). These
//! are removed before the graph is frozen, and edges into them are redirected
//! to the first block with elements that follows.
//!
//! ## Frozen graph
//!
//! [`Cfg`] numbers its blocks in source order of their first element and
//! precomputes successors and predecessors of every node.
pub use block::{BlockId, Node};
pub use error::{CfgError, InvariantViolation};
pub use graph::{BlockData, Cfg, ControlFlowGraph, Edge};
pub use options::{CfgOptions, UnresolvedLabel};

use ecma_ast::Stmt;

use builder::CfgBuilder;
use eliminate::eliminate_empty_blocks;

mod block;
mod builder;
mod eliminate;
mod error;
mod graph;
mod options;
pub mod visualize;

/// Builds the control-flow graph of `body` with the default options.
pub fn build_cfg(body: &[Stmt]) -> Result<Cfg<'_>, CfgError> {
    build_cfg_with_options(body, &CfgOptions::default())
}

/// Builds the control-flow graph of `body`.
///
/// The graph of a function declaration's body is built separately, by passing
/// that body here; in its enclosing body the declaration is a single element.
pub fn build_cfg_with_options<'a>(
    body: &'a [Stmt],
    options: &CfgOptions,
) -> Result<Cfg<'a>, CfgError> {
    let raw = CfgBuilder::new(*options).build(body)?;
    let raw = eliminate_empty_blocks(raw)?;
    let cfg = Cfg::from_raw(raw)?;
    tracing::debug!(blocks = cfg.num_blocks(), "built control-flow graph");
    Ok(cfg)
}
