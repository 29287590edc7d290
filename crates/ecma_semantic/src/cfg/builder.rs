use ecma_ast::{
    AnyNodeRef, Expr, Identifier, Ranged, Stmt, StmtDoWhile, StmtFor, StmtIf, StmtLabeled,
    StmtSwitch, StmtTry, StmtWhile, TextRange,
};
use ecma_index::IndexVec;
use smallvec::SmallVec;

use super::block::{BlockId, MutableBlock, MutableEdge, Node, RawGraph};
use super::error::{CfgError, InvariantViolation};
use super::options::{CfgOptions, UnresolvedLabel};

type Labels<'a> = SmallVec<[&'a str; 2]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BreakableKind {
    Loop,
    Switch,
    /// A labeled statement that is neither a loop nor a `switch`. Only a labeled
    /// `break` can leave it.
    Labeled,
}

/// Where `break` and `continue` go inside a loop, `switch` or labeled statement.
#[derive(Debug)]
struct Breakable<'a> {
    kind: BreakableKind,
    continue_target: Option<Node>,
    break_target: Node,
    labels: Labels<'a>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Jump {
    Break,
    Continue,
}

impl Jump {
    const fn keyword(self) -> &'static str {
        match self {
            Jump::Break => "break",
            Jump::Continue => "continue",
        }
    }

    /// Whether an unlabeled jump of this kind stops at `breakable`.
    fn stops_at(self, breakable: &Breakable) -> bool {
        match self {
            Jump::Break => breakable.kind != BreakableKind::Labeled,
            Jump::Continue => breakable.kind == BreakableKind::Loop,
        }
    }
}

/// Builds the blocks of a single body, walking its statements from last to first.
///
/// `current` is the block that receives the elements of the statement being
/// visited. Its outgoing edge is always known, since everything after that
/// statement has been built already.
#[derive(Debug)]
pub(crate) struct CfgBuilder<'a> {
    blocks: IndexVec<BlockId, MutableBlock<'a>>,
    current: BlockId,
    breakables: Vec<Breakable<'a>>,
    throw_targets: Vec<Node>,
    options: CfgOptions,
}

impl<'a> CfgBuilder<'a> {
    pub(crate) fn new(options: CfgOptions) -> Self {
        let mut blocks = IndexVec::new();
        let current = blocks.push(MutableBlock::new(MutableEdge::Jump(Some(Node::End))));
        Self {
            blocks,
            current,
            breakables: Vec::new(),
            throw_targets: Vec::new(),
            options,
        }
    }

    pub(crate) fn build(mut self, body: &'a [Stmt]) -> Result<RawGraph<'a>, CfgError> {
        self.visit_body(body)?;
        Ok(RawGraph {
            blocks: self.blocks,
            start: Node::Block(self.current),
        })
    }

    fn new_block(&mut self, edge: MutableEdge) -> BlockId {
        self.blocks.push(MutableBlock::new(edge))
    }

    /// Starts a new current block flowing to `target`.
    fn enter(&mut self, target: Node) {
        self.current = self.new_block(MutableEdge::Jump(Some(target)));
    }

    fn prepend(&mut self, element: impl Into<AnyNodeRef<'a>>) {
        self.blocks[self.current].prepend(element.into());
    }

    fn new_guard(&mut self, test: &'a Expr, on_false: Node) -> BlockId {
        let guard = self.new_block(MutableEdge::Branch {
            on_true: None,
            on_false,
        });
        self.blocks[guard].prepend(test.into());
        guard
    }

    fn visit_body(&mut self, body: &'a [Stmt]) -> Result<(), CfgError> {
        for stmt in body.iter().rev() {
            self.visit_stmt(stmt)?;
        }
        Ok(())
    }

    /// Builds `body` into fresh blocks that flow to `successor`, returning the entry.
    fn build_sub_flow(&mut self, body: &'a [Stmt], successor: Node) -> Result<Node, CfgError> {
        self.enter(successor);
        self.visit_body(body)?;
        Ok(Node::Block(self.current))
    }

    fn with_breakable<T>(
        &mut self,
        breakable: Breakable<'a>,
        f: impl FnOnce(&mut Self) -> Result<T, CfgError>,
    ) -> Result<T, CfgError> {
        self.breakables.push(breakable);
        let result = f(self);
        self.breakables.pop();
        result
    }

    fn with_throw_target<T>(
        &mut self,
        target: Node,
        f: impl FnOnce(&mut Self) -> Result<T, CfgError>,
    ) -> Result<T, CfgError> {
        self.throw_targets.push(target);
        let result = f(self);
        self.throw_targets.pop();
        result
    }

    fn throw_target(&self) -> Node {
        self.throw_targets.last().copied().unwrap_or(Node::End)
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) -> Result<(), CfgError> {
        match stmt {
            Stmt::Expr(stmt_expr) => self.prepend(&*stmt_expr.value),
            Stmt::Var(_) | Stmt::FunctionDef(_) | Stmt::Debugger(_) => self.prepend(stmt),
            Stmt::Empty(_) => {}
            Stmt::Block(block) => self.visit_body(&block.body)?,
            Stmt::If(stmt_if) => self.visit_if(stmt_if)?,
            Stmt::While(stmt_while) => self.visit_while(stmt_while, Labels::new())?,
            Stmt::DoWhile(stmt_do_while) => self.visit_do_while(stmt_do_while, Labels::new())?,
            Stmt::For(stmt_for) => self.visit_for(stmt, stmt_for, Labels::new())?,
            Stmt::ForIn(stmt_for_in) => self.visit_for_each(
                &stmt_for_in.left,
                &stmt_for_in.right,
                &stmt_for_in.body,
                Labels::new(),
            )?,
            Stmt::ForOf(stmt_for_of) => self.visit_for_each(
                &stmt_for_of.left,
                &stmt_for_of.right,
                &stmt_for_of.body,
                Labels::new(),
            )?,
            Stmt::Switch(stmt_switch) => self.visit_switch(stmt_switch, Labels::new())?,
            Stmt::Labeled(stmt_labeled) => self.visit_labeled(stmt_labeled)?,
            Stmt::Try(stmt_try) => self.visit_try(stmt_try)?,
            Stmt::Break(stmt_break) => {
                let target =
                    self.jump_target(Jump::Break, stmt_break.label.as_ref(), stmt_break.range)?;
                self.visit_jump(stmt, target);
            }
            Stmt::Continue(stmt_continue) => {
                let target = self.jump_target(
                    Jump::Continue,
                    stmt_continue.label.as_ref(),
                    stmt_continue.range,
                )?;
                self.visit_jump(stmt, target);
            }
            Stmt::Return(_) => self.visit_jump(stmt, Node::End),
            Stmt::Throw(_) => {
                let target = self.throw_target();
                self.visit_jump(stmt, target);
            }
            Stmt::With(_) => {
                return Err(CfgError::UnsupportedConstruct {
                    kind: stmt.kind_name(),
                    range: stmt.range(),
                });
            }
        }
        Ok(())
    }

    /// Ends straight-line flow at `stmt`. Whatever followed it in source order stays
    /// behind in the previous block, unreachable unless something else jumps there.
    fn visit_jump(&mut self, stmt: &'a Stmt, target: Node) {
        self.enter(target);
        self.prepend(stmt);
    }

    fn visit_if(&mut self, stmt_if: &'a StmtIf) -> Result<(), CfgError> {
        let successor = Node::Block(self.current);
        let on_false = match &stmt_if.orelse {
            Some(orelse) => self.build_sub_flow(std::slice::from_ref(&**orelse), successor)?,
            None => successor,
        };
        let on_true = self.build_sub_flow(std::slice::from_ref(&*stmt_if.body), successor)?;
        self.current = self.new_block(MutableEdge::Branch {
            on_true: Some(on_true),
            on_false,
        });
        self.prepend(&*stmt_if.test);
        Ok(())
    }

    /// Builds a loop body flowing to `successor`, with `break` leaving to `after`.
    fn build_loop_body(
        &mut self,
        body: &'a Stmt,
        continue_target: Node,
        successor: Node,
        after: Node,
        labels: Labels<'a>,
    ) -> Result<Node, CfgError> {
        let breakable = Breakable {
            kind: BreakableKind::Loop,
            continue_target: Some(continue_target),
            break_target: after,
            labels,
        };
        self.with_breakable(breakable, |builder| {
            builder.build_sub_flow(std::slice::from_ref(body), successor)
        })
    }

    fn visit_while(
        &mut self,
        stmt_while: &'a StmtWhile,
        labels: Labels<'a>,
    ) -> Result<(), CfgError> {
        let after = Node::Block(self.current);
        let guard = self.new_guard(&stmt_while.test, after);
        let guard_node = Node::Block(guard);

        let body = self.build_loop_body(&stmt_while.body, guard_node, guard_node, after, labels)?;
        self.blocks[guard].enter_loop(body);

        self.enter(guard_node);
        Ok(())
    }

    fn visit_do_while(
        &mut self,
        stmt_do_while: &'a StmtDoWhile,
        labels: Labels<'a>,
    ) -> Result<(), CfgError> {
        let after = Node::Block(self.current);
        let guard = self.new_guard(&stmt_do_while.test, after);
        let guard_node = Node::Block(guard);

        let body =
            self.build_loop_body(&stmt_do_while.body, guard_node, guard_node, after, labels)?;
        self.blocks[guard].enter_loop(body);

        // The first iteration runs the body before testing.
        self.enter(body);
        Ok(())
    }

    fn visit_for(
        &mut self,
        stmt: &'a Stmt,
        stmt_for: &'a StmtFor,
        labels: Labels<'a>,
    ) -> Result<(), CfgError> {
        let after = Node::Block(self.current);
        let guard = match &stmt_for.test {
            Some(test) => self.new_guard(test, after),
            None => {
                // Without a test the loop is only left by a jump, so the guard has
                // a single edge into the body.
                let guard = self.new_block(MutableEdge::Jump(None));
                self.blocks[guard].prepend(stmt.into());
                guard
            }
        };
        let guard_node = Node::Block(guard);

        let update = match &stmt_for.update {
            Some(update) => {
                self.enter(guard_node);
                self.prepend(&**update);
                Node::Block(self.current)
            }
            None => guard_node,
        };

        let body = self.build_loop_body(&stmt_for.body, update, update, after, labels)?;
        self.blocks[guard].enter_loop(body);

        self.enter(guard_node);
        if let Some(init) = &stmt_for.init {
            self.visit_stmt(init)?;
        }
        Ok(())
    }

    /// `for (left in right) body` and `for (left of right) body`.
    ///
    /// The head holding `left` decides between another iteration and leaving the
    /// loop. `right` is evaluated once, before the head.
    fn visit_for_each(
        &mut self,
        left: &'a Stmt,
        right: &'a Expr,
        body: &'a Stmt,
        labels: Labels<'a>,
    ) -> Result<(), CfgError> {
        let after = Node::Block(self.current);
        let head = self.new_block(MutableEdge::Branch {
            on_true: None,
            on_false: after,
        });
        self.blocks[head].prepend(left.into());
        let head_node = Node::Block(head);

        let entry = self.build_loop_body(body, head_node, head_node, after, labels)?;
        self.blocks[head].enter_loop(entry);

        self.enter(head_node);
        self.prepend(right);
        Ok(())
    }

    fn visit_switch(
        &mut self,
        stmt_switch: &'a StmtSwitch,
        labels: Labels<'a>,
    ) -> Result<(), CfgError> {
        let after = Node::Block(self.current);
        let breakable = Breakable {
            kind: BreakableKind::Switch,
            continue_target: None,
            break_target: after,
            labels,
        };

        // Clause bodies fall through to the next clause's body.
        let mut entries = self.with_breakable(breakable, |builder| {
            let mut entries = Vec::with_capacity(stmt_switch.cases.len());
            let mut next = after;
            for case in stmt_switch.cases.iter().rev() {
                next = builder.build_sub_flow(&case.consequent, next)?;
                entries.push(next);
            }
            Ok(entries)
        })?;
        entries.reverse();

        let mut next_test = stmt_switch
            .cases
            .iter()
            .zip(&entries)
            .find_map(|(case, entry)| case.is_default().then_some(*entry))
            .unwrap_or(after);

        for (case, entry) in stmt_switch.cases.iter().zip(&entries).rev() {
            let Some(test) = &case.test else {
                continue;
            };
            let block = self.new_block(MutableEdge::Branch {
                on_true: Some(*entry),
                on_false: next_test,
            });
            self.blocks[block].prepend((&**test).into());
            next_test = Node::Block(block);
        }

        self.enter(next_test);
        self.prepend(&*stmt_switch.discriminant);
        Ok(())
    }

    fn visit_labeled(&mut self, stmt_labeled: &'a StmtLabeled) -> Result<(), CfgError> {
        let mut labels = Labels::new();
        labels.push(stmt_labeled.label.as_str());
        let mut body: &'a Stmt = &stmt_labeled.body;
        while let Stmt::Labeled(nested) = body {
            labels.push(nested.label.as_str());
            body = &*nested.body;
        }

        match body {
            Stmt::While(stmt_while) => self.visit_while(stmt_while, labels),
            Stmt::DoWhile(stmt_do_while) => self.visit_do_while(stmt_do_while, labels),
            Stmt::For(stmt_for) => self.visit_for(body, stmt_for, labels),
            Stmt::ForIn(stmt_for_in) => self.visit_for_each(
                &stmt_for_in.left,
                &stmt_for_in.right,
                &stmt_for_in.body,
                labels,
            ),
            Stmt::ForOf(stmt_for_of) => self.visit_for_each(
                &stmt_for_of.left,
                &stmt_for_of.right,
                &stmt_for_of.body,
                labels,
            ),
            Stmt::Switch(stmt_switch) => self.visit_switch(stmt_switch, labels),
            _ => {
                let after = Node::Block(self.current);
                let breakable = Breakable {
                    kind: BreakableKind::Labeled,
                    continue_target: None,
                    break_target: after,
                    labels,
                };
                self.with_breakable(breakable, |builder| {
                    builder.build_sub_flow(std::slice::from_ref(body), after)
                })?;
                Ok(())
            }
        }
    }

    fn visit_try(&mut self, stmt_try: &'a StmtTry) -> Result<(), CfgError> {
        let after = Node::Block(self.current);

        let finally_entry = match &stmt_try.finalizer {
            Some(finalizer) => Some(self.build_sub_flow(&finalizer.body, after)?),
            None => None,
        };
        let next = finally_entry.unwrap_or(after);

        let catch_entry = match &stmt_try.handler {
            Some(handler) => {
                let throw_target = finally_entry.unwrap_or_else(|| self.throw_target());
                self.with_throw_target(throw_target, |builder| {
                    builder.build_sub_flow(&handler.body.body, next)
                })?;
                if let Some(param) = &handler.param {
                    self.prepend(&**param);
                }
                Some(Node::Block(self.current))
            }
            None => None,
        };

        let handler_entry = catch_entry.or(finally_entry);
        let throw_target = handler_entry.unwrap_or_else(|| self.throw_target());
        let body_entry = self.with_throw_target(throw_target, |builder| {
            builder.build_sub_flow(&stmt_try.body.body, handler_entry.unwrap_or(after))
        })?;

        self.enter(body_entry);
        Ok(())
    }

    fn jump_target(
        &self,
        jump: Jump,
        label: Option<&'a Identifier>,
        range: TextRange,
    ) -> Result<Node, InvariantViolation> {
        let innermost = || self.breakables.iter().rev().find(|breakable| jump.stops_at(breakable));

        let breakable = match label {
            None => innermost(),
            Some(label) => {
                let labeled = self
                    .breakables
                    .iter()
                    .rev()
                    .find(|breakable| breakable.labels.contains(&label.as_str()));
                match (labeled, self.options.unresolved_label) {
                    (Some(labeled), _) => Some(labeled),
                    (None, UnresolvedLabel::Innermost) => innermost(),
                    (None, UnresolvedLabel::Error) => {
                        return Err(InvariantViolation::UnresolvedLabel {
                            keyword: jump.keyword(),
                            label: label.to_string(),
                            range,
                        })
                    }
                }
            }
        };

        let Some(breakable) = breakable else {
            return Err(InvariantViolation::UnresolvedJump {
                keyword: jump.keyword(),
                range,
            });
        };

        match jump {
            Jump::Break => Ok(breakable.break_target),
            Jump::Continue => {
                breakable
                    .continue_target
                    .ok_or_else(|| InvariantViolation::ContinueToNonLoop {
                        label: label.map(ToString::to_string).unwrap_or_default(),
                        range,
                    })
            }
        }
    }
}
