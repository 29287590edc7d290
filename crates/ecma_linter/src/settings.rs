use ecma_semantic::cfg::CfgOptions;

use crate::rule::Rule;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct LinterSettings {
    /// The rules to run.
    pub select: Vec<Rule>,
    /// The largest cyclomatic complexity a body may have before
    /// [`Rule::TooComplex`] reports it.
    pub max_complexity: usize,
    pub cfg: CfgOptions,
}

impl LinterSettings {
    pub fn for_rule(rule: Rule) -> Self {
        Self {
            select: vec![rule],
            ..Self::default()
        }
    }

    pub fn enabled(&self, rule: Rule) -> bool {
        self.select.contains(&rule)
    }
}

impl Default for LinterSettings {
    fn default() -> Self {
        Self {
            select: Rule::ALL.to_vec(),
            max_complexity: 10,
            cfg: CfgOptions::default(),
        }
    }
}
