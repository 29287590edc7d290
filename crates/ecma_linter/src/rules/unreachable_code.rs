use ecma_ast::Ranged;
use ecma_semantic::cfg::{Cfg, ControlFlowGraph, Node};

use crate::checker::Checker;
use crate::rule::Rule;
use crate::rules::reachable_blocks;

/// ## What it does
/// Checks for code that can never run, such as statements after a `return`.
///
/// ## Why is this bad?
/// Unreachable code is usually left over from a refactoring, or a sign that
/// a jump ends the function earlier than intended.
///
/// ## Example
/// ```js
/// function f(x) {
///   return x;
///   console.log(x);
/// }
/// ```
///
/// Use instead:
/// ```js
/// function f(x) {
///   console.log(x);
///   return x;
/// }
/// ```
pub(crate) fn unreachable_code(checker: &mut Checker, cfg: &Cfg) {
    let mut covered = reachable_blocks(cfg, cfg.start());

    // A region is entered through a block without predecessors, unless it is a
    // cycle. Report one block per region.
    let entries = cfg
        .block_ids()
        .filter(|&block| cfg.predecessors(Node::Block(block)).is_empty());
    let heads: Vec<_> = entries.chain(cfg.block_ids()).collect();

    for head in heads {
        if covered[head] {
            continue;
        }
        checker.report(
            Rule::UnreachableCode,
            "Unreachable code",
            cfg.block(head).range(),
        );
        for (block, reached) in reachable_blocks(cfg, Node::Block(head)).iter_enumerated() {
            if *reached {
                covered[block] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ecma_parser::parse_script;
    use test_case::test_case;

    use crate::{check_script, LinterSettings, Rule};

    fn unreachable(source: &str) -> Vec<&str> {
        let script = parse_script(source).unwrap();
        check_script(&script, &LinterSettings::for_rule(Rule::UnreachableCode))
            .into_iter()
            .map(|diagnostic| &source[diagnostic.range])
            .collect()
    }

    #[test_case("a(); b();", &[]; "straight line")]
    #[test_case("return; a(); b();", &["a(); b()"]; "after return")]
    #[test_case("throw e; a();", &["a()"]; "after throw")]
    #[test_case("if (x) { return; } else { return; } a();", &["a()"]; "after both branches return")]
    #[test_case("if (x) { return; } a();", &[]; "after one branch returns")]
    #[test_case("while (x) { break; a(); } b();", &["a()"]; "after break")]
    #[test_case("for (;;) { continue; a(); }", &["a()"]; "after continue")]
    #[test_case("for (;;) { a(); } b();", &["b()"]; "after infinite loop")]
    #[test_case("return; while (x) { a(); }", &["x"]; "unreachable loop is one region")]
    #[test_case("return; do { a(); } while (x);", &["a()"]; "unreachable do while is one region")]
    #[test_case(
        "switch (x) { case 1: return; a(); case 2: b(); }",
        &["a()"];
        "inside switch clause"
    )]
    #[test_case("try { a(); } catch (e) { b(); }", &[]; "catch after normal completion")]
    #[test_case("try { throw e; } catch (err) { a(); }", &[]; "catch after throw")]
    fn fixtures(source: &str, expected: &[&str]) {
        assert_eq!(unreachable(source), expected);
    }

    #[test]
    fn separate_regions() {
        let source = "function f() { return; a(); }\nreturn;\nb();";
        assert_eq!(unreachable(source), ["a()", "b()"]);
    }
}
