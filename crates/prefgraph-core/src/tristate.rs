use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Checkbox state of a single option.
///
/// `Indeterminate` never comes from a click; it only appears when a group
/// aggregates children that disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    #[serde(alias = "UNSOLVED", alias = "UNDETERMINATED")]
    Indeterminate,
}

impl CheckState {
    /// State after a direct click: `Checked` goes to `Unchecked`, anything else to `Checked`.
    pub fn toggled(self) -> Self {
        match self {
            CheckState::Checked => CheckState::Unchecked,
            CheckState::Unchecked | CheckState::Indeterminate => CheckState::Checked,
        }
    }

    pub fn is_checked(self) -> bool {
        self == CheckState::Checked
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckState::Unchecked => "unchecked",
            CheckState::Checked => "checked",
            CheckState::Indeterminate => "indeterminate",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for CheckState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unchecked" => Ok(CheckState::Unchecked),
            "checked" => Ok(CheckState::Checked),
            // legacy sentinels for the third state
            "indeterminate" | "unsolved" | "undeterminated" => Ok(CheckState::Indeterminate),
            other => Err(format!("unknown check state '{}'", other)),
        }
    }
}
