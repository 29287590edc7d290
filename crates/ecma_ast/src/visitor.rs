//! AST visitor trait and walk functions.

use crate::{
    CatchClause, Expr, ExprArray, ExprAssign, ExprBinary, ExprCall, ExprConditional,
    ExprFunction, ExprMember, ExprNew, ExprSequence, ExprSubscript, ExprUnary, ExprUpdate, Stmt,
    StmtBlock, StmtDoWhile, StmtFor, StmtForIn, StmtForOf, StmtIf, StmtLabeled, StmtReturn,
    StmtSwitch, StmtThrow, StmtTry, StmtVar, StmtWhile, StmtWith, SwitchCase,
};

/// A trait for AST visitors. Visits all nodes in the AST recursively in evaluation-order.
///
/// Prefer [`crate::visitor::walk_stmt`] and friends for the default traversal, and only
/// override the methods for the nodes you are interested in.
pub trait Visitor<'a> {
    fn visit_body(&mut self, body: &'a [Stmt]) {
        walk_body(self, body);
    }
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        walk_stmt(self, stmt);
    }
    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr);
    }
    fn visit_catch_clause(&mut self, catch_clause: &'a CatchClause) {
        walk_catch_clause(self, catch_clause);
    }
    fn visit_switch_case(&mut self, switch_case: &'a SwitchCase) {
        walk_switch_case(self, switch_case);
    }
}

pub fn walk_body<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, body: &'a [Stmt]) {
    for stmt in body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, stmt: &'a Stmt) {
    match stmt {
        Stmt::Expr(expr) => visitor.visit_expr(&expr.value),
        Stmt::Var(StmtVar { declarations, .. }) => {
            for declarator in declarations {
                if let Some(init) = &declarator.init {
                    visitor.visit_expr(init);
                }
            }
        }
        Stmt::FunctionDef(function_def) => visitor.visit_body(&function_def.body),
        Stmt::If(StmtIf {
            test, body, orelse, ..
        }) => {
            visitor.visit_expr(test);
            visitor.visit_stmt(body);
            if let Some(orelse) = orelse {
                visitor.visit_stmt(orelse);
            }
        }
        Stmt::While(StmtWhile { test, body, .. }) => {
            visitor.visit_expr(test);
            visitor.visit_stmt(body);
        }
        Stmt::DoWhile(StmtDoWhile { body, test, .. }) => {
            visitor.visit_stmt(body);
            visitor.visit_expr(test);
        }
        Stmt::For(StmtFor {
            init,
            test,
            update,
            body,
            ..
        }) => {
            if let Some(init) = init {
                visitor.visit_stmt(init);
            }
            if let Some(test) = test {
                visitor.visit_expr(test);
            }
            visitor.visit_stmt(body);
            if let Some(update) = update {
                visitor.visit_expr(update);
            }
        }
        Stmt::ForIn(StmtForIn {
            left, right, body, ..
        })
        | Stmt::ForOf(StmtForOf {
            left, right, body, ..
        }) => {
            visitor.visit_expr(right);
            visitor.visit_stmt(left);
            visitor.visit_stmt(body);
        }
        Stmt::Return(StmtReturn { value, .. }) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Throw(StmtThrow { value, .. }) => visitor.visit_expr(value),
        Stmt::Try(StmtTry {
            body,
            handler,
            finalizer,
            ..
        }) => {
            visitor.visit_body(&body.body);
            if let Some(handler) = handler {
                visitor.visit_catch_clause(handler);
            }
            if let Some(finalizer) = finalizer {
                visitor.visit_body(&finalizer.body);
            }
        }
        Stmt::Switch(StmtSwitch {
            discriminant,
            cases,
            ..
        }) => {
            visitor.visit_expr(discriminant);
            for case in cases {
                visitor.visit_switch_case(case);
            }
        }
        Stmt::Block(StmtBlock { body, .. }) => visitor.visit_body(body),
        Stmt::Labeled(StmtLabeled { body, .. }) => visitor.visit_stmt(body),
        Stmt::With(StmtWith { object, body, .. }) => {
            visitor.visit_expr(object);
            visitor.visit_stmt(body);
        }
        Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) | Stmt::Debugger(_) => {}
    }
}

pub fn walk_expr<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, expr: &'a Expr) {
    match expr {
        Expr::Array(ExprArray { elts, .. }) | Expr::Sequence(ExprSequence { elts, .. }) => {
            for elt in elts {
                visitor.visit_expr(elt);
            }
        }
        Expr::Call(ExprCall {
            func, arguments, ..
        })
        | Expr::New(ExprNew {
            func, arguments, ..
        }) => {
            visitor.visit_expr(func);
            for argument in arguments {
                visitor.visit_expr(argument);
            }
        }
        Expr::Member(ExprMember { object, .. }) => visitor.visit_expr(object),
        Expr::Subscript(ExprSubscript { value, index, .. }) => {
            visitor.visit_expr(value);
            visitor.visit_expr(index);
        }
        Expr::Unary(ExprUnary { operand, .. }) => visitor.visit_expr(operand),
        Expr::Update(ExprUpdate { target, .. }) => visitor.visit_expr(target),
        Expr::Binary(ExprBinary { left, right, .. }) => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Assign(ExprAssign { target, value, .. }) => {
            visitor.visit_expr(value);
            visitor.visit_expr(target);
        }
        Expr::Conditional(ExprConditional {
            test, body, orelse, ..
        }) => {
            visitor.visit_expr(test);
            visitor.visit_expr(body);
            visitor.visit_expr(orelse);
        }
        Expr::Function(ExprFunction { body, .. }) => visitor.visit_body(body),
        Expr::Name(_)
        | Expr::NumberLiteral(_)
        | Expr::StringLiteral(_)
        | Expr::BooleanLiteral(_)
        | Expr::NullLiteral(_) => {}
    }
}

pub fn walk_catch_clause<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    catch_clause: &'a CatchClause,
) {
    if let Some(param) = &catch_clause.param {
        visitor.visit_expr(param);
    }
    visitor.visit_body(&catch_clause.body.body);
}

pub fn walk_switch_case<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, switch_case: &'a SwitchCase) {
    if let Some(test) = &switch_case.test {
        visitor.visit_expr(test);
    }
    visitor.visit_body(&switch_case.consequent);
}
