use ecma_ast::visitor::{self, Visitor};
use ecma_ast::{AnyNodeRef, Expr, Ranged, Stmt};
use ecma_semantic::cfg::{Cfg, ControlFlowGraph, Edge};

use crate::checker::Checker;
use crate::rule::Rule;
use crate::rules::reachable_blocks;

/// ## What it does
/// Checks for loops whose body executes at most once.
///
/// ## Why is this bad?
/// If the intent was to only use the first element of a collection, this
/// would be clearer if handled directly. Otherwise, a loop that never gets
/// back to its condition may be a sign that there is a bug.
///
/// ## Example
/// ```js
/// function f(items) {
///   for (const item of items) {
///     if (item > 0) {
///       return 1;
///     } else {
///       return 2;
///     }
///   }
/// }
/// ```
///
/// Use instead:
/// ```js
/// function f(items) {
///   const [first] = items;
///   if (first === undefined) {
///     return undefined;
///   }
///   return first > 0 ? 1 : 2;
/// }
/// ```
pub(crate) fn never_loops(checker: &mut Checker, cfg: &Cfg, body: &[Stmt]) {
    let mut loops = LoopCollector::default();
    loops.visit_body(body);

    for (stmt, guard_element) in loops.loops {
        // The guard is the block deciding whether to run the body (again).
        let Some(guard) = cfg.block_ids().find(|&block| {
            cfg.elements(block)
                .last()
                .is_some_and(|last| last.ptr_eq(guard_element))
        }) else {
            continue;
        };
        let entry = match cfg.edge(guard) {
            Edge::Always(entry) | Edge::Branch { on_true: entry, .. } => entry,
        };
        if !reachable_blocks(cfg, entry)[guard] {
            checker.report(
                Rule::NeverLoops,
                "This loop executes at most once",
                stmt.range(),
            );
        }
    }
}

/// Collects the loops of a body, outside of nested functions, with the element
/// their guard block ends in.
#[derive(Default)]
struct LoopCollector<'a> {
    loops: Vec<(&'a Stmt, AnyNodeRef<'a>)>,
}

impl<'a> Visitor<'a> for LoopCollector<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        let guard_element = match stmt {
            Stmt::FunctionDef(_) => return,
            Stmt::While(stmt_while) => Some(AnyNodeRef::from(&*stmt_while.test)),
            Stmt::DoWhile(stmt_do_while) => Some(AnyNodeRef::from(&*stmt_do_while.test)),
            Stmt::For(stmt_for) => Some(match &stmt_for.test {
                Some(test) => AnyNodeRef::from(&**test),
                None => AnyNodeRef::from(stmt),
            }),
            Stmt::ForIn(stmt_for_in) => Some(AnyNodeRef::from(&*stmt_for_in.left)),
            Stmt::ForOf(stmt_for_of) => Some(AnyNodeRef::from(&*stmt_for_of.left)),
            _ => None,
        };
        if let Some(guard_element) = guard_element {
            self.loops.push((stmt, guard_element));
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        if !matches!(expr, Expr::Function(_)) {
            visitor::walk_expr(self, expr);
        }
    }
}

#[cfg(test)]
mod tests {
    use ecma_parser::parse_script;
    use test_case::test_case;

    use crate::{check_script, LinterSettings, Rule};

    fn never_loops(source: &str) -> Vec<&str> {
        let script = parse_script(source).unwrap();
        check_script(&script, &LinterSettings::for_rule(Rule::NeverLoops))
            .into_iter()
            .map(|diagnostic| &source[diagnostic.range])
            .collect()
    }

    #[test_case("while (a) { f(); }", &[]; "while")]
    #[test_case("while (a) {}", &[]; "empty while")]
    #[test_case("while (a) { break; }", &["while (a) { break; }"]; "while break")]
    #[test_case("while (a) { return; }", &["while (a) { return; }"]; "while return")]
    #[test_case("while (a) { throw e; }", &["while (a) { throw e; }"]; "while throw")]
    #[test_case("while (a) { if (b) { break; } }", &[]; "conditional break")]
    #[test_case("while (a) { if (b) { break; } continue; }", &[]; "continue")]
    #[test_case("do { f(); } while (a);", &[]; "do while")]
    #[test_case("do { break; } while (a);", &["do { break; } while (a);"]; "do while break")]
    #[test_case("for (;;) { f(); }", &[]; "for without test")]
    #[test_case("for (;;) { break; }", &["for (;;) { break; }"]; "for without test break")]
    #[test_case("for (i = 0; i < n; i++) { continue; }", &[]; "for continue to update")]
    #[test_case(
        "for (i = 0; i < n; i++) { return i; }",
        &["for (i = 0; i < n; i++) { return i; }"];
        "for return"
    )]
    #[test_case(
        "for (const x of xs) { if (x) { return 1; } else { return 2; } }",
        &["for (const x of xs) { if (x) { return 1; } else { return 2; } }"];
        "for of both branches return"
    )]
    #[test_case("for (k in o) { f(k); }", &[]; "for in")]
    #[test_case(
        "outer: while (a) { while (b) { break outer; } }",
        &["while (b) { break outer; }"];
        "break outer loop"
    )]
    #[test_case(
        "outer: while (a) { while (b) { continue outer; } }",
        &[];
        "continue outer loop reenters inner loop"
    )]
    #[test_case(
        "while (a) { try { throw e; } catch (err) { f(); } }",
        &[];
        "caught throw gets back to the guard"
    )]
    fn fixtures(source: &str, expected: &[&str]) {
        assert_eq!(never_loops(source), expected);
    }

    #[test]
    fn nested_function_is_checked_once() {
        let source = "function f() { while (a) { return; } }";
        assert_eq!(never_loops(source), ["while (a) { return; }"]);
    }
}
