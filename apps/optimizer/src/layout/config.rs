//! Layout engine configuration — margins, padding, fallback sizes, wrap policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// When the packer opens a new row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapPolicy {
    /// Wrap only if the current row already holds a component. An oversized
    /// component sits alone at the left margin of its row.
    #[default]
    SkipEmptyRow,
    /// Wrap whenever `x + width > max_width`, even on an empty row.
    /// An oversized component is pushed down by `padding_y` before placement.
    Literal,
}

impl FromStr for WrapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip-empty-row" | "skip_empty_row" => Ok(WrapPolicy::SkipEmptyRow),
            "literal" => Ok(WrapPolicy::Literal),
            other => Err(format!(
                "unknown wrap policy '{other}' (expected 'skip-empty-row' or 'literal')"
            )),
        }
    }
}

impl fmt::Display for WrapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapPolicy::SkipEmptyRow => write!(f, "skip-empty-row"),
            WrapPolicy::Literal => write!(f, "literal"),
        }
    }
}

/// Row-packing parameters. All values are pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Left margin; every row starts here.
    pub grid_x: i64,
    /// Top margin of the first row.
    pub grid_y: i64,
    /// Horizontal gap between neighbours in a row.
    pub padding_x: i64,
    /// Vertical gap between rows.
    pub padding_y: i64,
    /// Used when the document has no `ihm.width`.
    pub default_max_width: i64,
    pub default_component_width: i64,
    pub default_component_height: i64,
    pub wrap_policy: WrapPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_x: 20,
            grid_y: 20,
            padding_x: 10,
            padding_y: 10,
            default_max_width: 800,
            default_component_width: 100,
            default_component_height: 50,
            wrap_policy: WrapPolicy::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_wrap_policy(mut self, policy: WrapPolicy) -> Self {
        self.wrap_policy = policy;
        self
    }
}
