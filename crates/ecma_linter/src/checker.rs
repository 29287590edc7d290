use ecma_ast::visitor::{self, Visitor};
use ecma_ast::{Expr, ExprFunction, Ranged, Script, Stmt, StmtFunctionDef, TextRange};
use ecma_semantic::cfg::Cfg;

use crate::diagnostic::Diagnostic;
use crate::rule::Rule;
use crate::rules;
use crate::settings::LinterSettings;

/// A statement list with its own control-flow graph.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Body<'a> {
    pub(crate) owner: Owner<'a>,
    /// Where diagnostics about the body as a whole are reported.
    pub(crate) range: TextRange,
    pub(crate) stmts: &'a [Stmt],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Owner<'a> {
    Script,
    Function(Option<&'a str>),
}

impl<'a> Body<'a> {
    pub(crate) fn script(script: &'a Script) -> Self {
        Self {
            owner: Owner::Script,
            range: script.range,
            stmts: &script.body,
        }
    }

    fn function_def(function_def: &'a StmtFunctionDef) -> Self {
        Self {
            owner: Owner::Function(Some(function_def.name.as_str())),
            range: function_def.name.range,
            stmts: &function_def.body,
        }
    }

    fn function_expr(function: &'a ExprFunction) -> Self {
        Self {
            owner: Owner::Function(function.name.as_ref().map(|name| name.as_str())),
            range: function.range(),
            stmts: &function.body,
        }
    }
}

/// Collects the bodies of all functions, including nested ones.
#[derive(Default)]
pub(crate) struct BodyCollector<'a> {
    pub(crate) bodies: Vec<Body<'a>>,
}

impl<'a> Visitor<'a> for BodyCollector<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        if let Stmt::FunctionDef(function_def) = stmt {
            self.bodies.push(Body::function_def(function_def));
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        if let Expr::Function(function) = expr {
            self.bodies.push(Body::function_expr(function));
        }
        visitor::walk_expr(self, expr);
    }
}

pub(crate) struct Checker<'a> {
    pub(crate) settings: &'a LinterSettings,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(settings: &'a LinterSettings) -> Self {
        Self {
            settings,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn enabled(&self, rule: Rule) -> bool {
        self.settings.enabled(rule)
    }

    pub(crate) fn report(&mut self, rule: Rule, message: impl Into<String>, range: TextRange) {
        self.diagnostics.push(Diagnostic::new(rule, message, range));
    }

    /// Runs the enabled rules on one body and its graph.
    pub(crate) fn check_body(&mut self, body: &Body, cfg: &Cfg) {
        if self.enabled(Rule::UnreachableCode) {
            rules::unreachable_code(self, cfg);
        }
        if self.enabled(Rule::NeverLoops) {
            rules::never_loops(self, cfg, body.stmts);
        }
        if self.enabled(Rule::TooComplex) {
            rules::too_complex(self, cfg, body);
        }
    }
}
