use ecma_semantic::cfg::{Cfg, ControlFlowGraph, Node};

use crate::checker::{Body, Checker, Owner};
use crate::rule::Rule;

/// ## What it does
/// Checks for functions with a high cyclomatic complexity.
///
/// The complexity is the number of linearly independent paths through the
/// control-flow graph of the function: `E - N + 2` for `E` edges and `N` nodes,
/// counting the end node. Every `if`, loop, `case` test and `catch` reached by
/// a `throw` adds a path.
///
/// ## Why is this bad?
/// Functions with many paths are hard to read and to test exhaustively.
///
/// ## Options
/// - `max-complexity`
pub(crate) fn too_complex(checker: &mut Checker, cfg: &Cfg, body: &Body) {
    let complexity = cyclomatic_complexity(cfg);
    let max_complexity = checker.settings.max_complexity;
    if complexity <= max_complexity {
        return;
    }
    let subject = match body.owner {
        Owner::Script => "Script".to_string(),
        Owner::Function(Some(name)) => format!("`{name}`"),
        Owner::Function(None) => "Function".to_string(),
    };
    checker.report(
        Rule::TooComplex,
        format!("{subject} is too complex ({complexity} > {max_complexity})"),
        body.range,
    );
}

pub(crate) fn cyclomatic_complexity(cfg: &Cfg) -> usize {
    let nodes = cfg.num_blocks() + 1;
    let edges: usize = cfg
        .block_ids()
        .map(|block| cfg.successors(Node::Block(block)).len())
        .sum();
    // Every block has a successor, so there are at least `nodes - 1` edges.
    (edges + 2).saturating_sub(nodes)
}

#[cfg(test)]
mod tests {
    use ecma_parser::parse_script;
    use ecma_semantic::cfg::build_cfg;
    use test_case::test_case;

    use super::cyclomatic_complexity;
    use crate::{check_script, LinterSettings, Rule};

    #[test_case("", 1; "empty")]
    #[test_case("a(); b();", 1; "straight line")]
    #[test_case("if (a) { b(); }", 2; "if")]
    #[test_case("if (a) {} b();", 1; "if with both sides merged")]
    #[test_case("if (a) { b(); } else if (c) { d(); } else { e(); }", 3; "else if")]
    #[test_case("while (a) { b(); }", 2; "while")]
    #[test_case("for (;;) { if (a) { break; } }", 2; "for without test")]
    #[test_case("for (x of xs) { if (x) { continue; } f(x); }", 3; "for of continue")]
    #[test_case("switch (x) { case 1: a(); break; case 2: b(); default: c(); }", 3; "switch")]
    #[test_case("try { if (a) { throw e; } } catch (err) { b(); }", 2; "throw")]
    fn complexity(source: &str, expected: usize) {
        let script = parse_script(source).unwrap();
        let cfg = build_cfg(&script.body).unwrap();
        assert_eq!(cyclomatic_complexity(&cfg), expected);
    }

    fn too_complex(source: &str, max_complexity: usize) -> Vec<String> {
        let script = parse_script(source).unwrap();
        let settings = LinterSettings {
            max_complexity,
            ..LinterSettings::for_rule(Rule::TooComplex)
        };
        check_script(&script, &settings)
            .into_iter()
            .map(|diagnostic| format!("{} {}", &source[diagnostic.range], diagnostic.message))
            .collect()
    }

    #[test]
    fn reports_named_function() {
        let source = "function f(a, b) { if (a) { g(); } if (b) { h(); } }";
        assert_eq!(
            too_complex(source, 2),
            ["f `f` is too complex (3 > 2)"]
        );
        assert!(too_complex(source, 3).is_empty());
    }

    #[test]
    fn reports_anonymous_function() {
        let source = "g(function () { while (a) { b(); } });";
        assert_eq!(
            too_complex(source, 1),
            ["function () { while (a) { b(); } } Function is too complex (2 > 1)"]
        );
    }
}
