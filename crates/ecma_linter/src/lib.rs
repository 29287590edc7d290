//! Lint rules built on the control-flow graphs of `ecma_semantic`.
//!
//! Every function body, and the script body itself, gets its own graph. A
//! function is a single element of the graph it is declared in.
pub use diagnostic::Diagnostic;
pub use rule::Rule;
pub use settings::LinterSettings;

use ecma_ast::visitor::Visitor;
use ecma_ast::{Ranged, Script};
use ecma_semantic::cfg::build_cfg_with_options;

use checker::{Body, BodyCollector, Checker};

mod checker;
mod diagnostic;
mod rule;
mod rules;
mod settings;

/// Checks `script` with the rules selected in `settings`.
///
/// Diagnostics are sorted by the start of their range. A body whose graph
/// cannot be built is skipped.
pub fn check_script(script: &Script, settings: &LinterSettings) -> Vec<Diagnostic> {
    let mut collector = BodyCollector {
        bodies: vec![Body::script(script)],
    };
    collector.visit_body(&script.body);

    let mut checker = Checker::new(settings);
    for body in &collector.bodies {
        match build_cfg_with_options(body.stmts, &settings.cfg) {
            Ok(cfg) => checker.check_body(body, &cfg),
            Err(error) => {
                tracing::warn!(
                    start = u32::from(body.range.start()),
                    "skipping body without a control-flow graph: {error}"
                );
            }
        }
    }

    let mut diagnostics = checker.diagnostics;
    diagnostics.sort_by_key(|diagnostic| (diagnostic.start(), diagnostic.rule));
    diagnostics
}

#[cfg(test)]
mod tests {
    use ecma_parser::parse_script;

    use super::{check_script, LinterSettings, Rule};

    fn check(source: &str, settings: &LinterSettings) -> Vec<String> {
        let script = parse_script(source).unwrap();
        check_script(&script, settings)
            .into_iter()
            .map(|diagnostic| {
                format!(
                    "{} `{}`",
                    diagnostic.rule.code(),
                    &source[diagnostic.range]
                )
            })
            .collect()
    }

    #[test]
    fn clean_script() {
        assert!(check("let a = 1; if (a) { f(a); }", &LinterSettings::default()).is_empty());
    }

    #[test]
    fn diagnostics_are_sorted_across_bodies() {
        let source = "\
function f() { return 1; dead(); }
while (a) { break; }
return;
after();
";
        assert_eq!(
            check(source, &LinterSettings::default()),
            [
                "JS001 `dead()`",
                "JS002 `while (a) { break; }`",
                "JS001 `after()`",
            ]
        );
    }

    #[test]
    fn function_expressions_get_their_own_graph() {
        let source = "run(function () { throw err; cleanup(); });";
        assert_eq!(
            check(source, &LinterSettings::for_rule(Rule::UnreachableCode)),
            ["JS001 `cleanup()`"]
        );
    }

    #[test]
    fn skips_bodies_that_fail_to_build() {
        let source = "\
function f() { with (o) { g(); } }
function h() { return; dead(); }
";
        assert_eq!(
            check(source, &LinterSettings::default()),
            ["JS001 `dead()`"]
        );
    }

    #[test]
    fn respects_cfg_options() {
        let source = "while (a) { continue missing; }";
        assert!(check(source, &LinterSettings::default()).is_empty());

        let mut settings = LinterSettings::default();
        settings.cfg.unresolved_label = ecma_semantic::cfg::UnresolvedLabel::Innermost;
        assert!(check(source, &settings).is_empty());
    }

    #[test]
    fn respects_rule_selection() {
        let source = "return; dead();";
        assert!(check(source, &LinterSettings::for_rule(Rule::NeverLoops)).is_empty());
        assert_eq!(
            check(source, &LinterSettings::for_rule(Rule::UnreachableCode)),
            ["JS001 `dead()`"]
        );
    }
}
