/// How a `break label` or `continue label` without a matching enclosing label is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum UnresolvedLabel {
    /// Fail the build with [`InvariantViolation::UnresolvedLabel`](super::InvariantViolation::UnresolvedLabel).
    #[default]
    Error,
    /// Jump as if the statement had no label.
    Innermost,
}

/// Options for building a control-flow graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct CfgOptions {
    pub unresolved_label: UnresolvedLabel,
}
