use ecma_ast::TextRange;

/// Reasons a control-flow graph could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CfgError {
    /// The body contains a statement the builder cannot translate.
    #[error("unsupported `{kind}` statement at byte offset {}", u32::from(.range.start()))]
    UnsupportedConstruct {
        kind: &'static str,
        range: TextRange,
    },
    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),
}

/// A broken precondition of the syntax tree, or a bug in the builder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("cannot build block {index} without any element")]
    EmptyBlock { index: usize },
    #[error("`{keyword}` at byte offset {} has no enclosing target", u32::from(.range.start()))]
    UnresolvedJump {
        keyword: &'static str,
        range: TextRange,
    },
    #[error("`{keyword} {label}` at byte offset {} refers to an unknown label", u32::from(.range.start()))]
    UnresolvedLabel {
        keyword: &'static str,
        label: String,
        range: TextRange,
    },
    #[error("`continue {label}` at byte offset {} does not refer to a loop", u32::from(.range.start()))]
    ContinueToNonLoop { label: String, range: TextRange },
    #[error("loop guard {index} was never connected to its body")]
    UnwiredLoopGuard { index: usize },
    #[error("block {index} branches but has no condition")]
    EmptyBranch { index: usize },
    #[error("block {index} is part of a cycle without any element")]
    EmptyCycle { index: usize },
}

#[cfg(test)]
mod tests {
    use ecma_ast::{TextRange, TextSize};

    use super::{CfgError, InvariantViolation};

    #[test]
    fn messages() {
        let range = TextRange::at(TextSize::new(7), TextSize::new(4));
        assert_eq!(
            CfgError::UnsupportedConstruct { kind: "with", range }.to_string(),
            "unsupported `with` statement at byte offset 7"
        );
        assert_eq!(
            CfgError::from(InvariantViolation::EmptyBlock { index: 3 }).to_string(),
            "cannot build block 3 without any element"
        );
        assert_eq!(
            InvariantViolation::UnresolvedLabel {
                keyword: "break",
                label: "outer".to_string(),
                range,
            }
            .to_string(),
            "`break outer` at byte offset 7 refers to an unknown label"
        );
    }
}
