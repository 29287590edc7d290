use std::fmt;

/// A lint rule that can be selected in [`LinterSettings`](crate::LinterSettings).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Rule {
    UnreachableCode,
    NeverLoops,
    TooComplex,
}

impl Rule {
    pub const ALL: [Rule; 3] = [Rule::UnreachableCode, Rule::NeverLoops, Rule::TooComplex];

    /// The short code printed with each diagnostic.
    pub const fn code(self) -> &'static str {
        match self {
            Rule::UnreachableCode => "JS001",
            Rule::NeverLoops => "JS002",
            Rule::TooComplex => "JS003",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Rule::UnreachableCode => "unreachable-code",
            Rule::NeverLoops => "never-loops",
            Rule::TooComplex => "too-complex",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
