//! Tie-break policy for argmax selection over rates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Label, Rate};

/// What to do when several treatments share the maximum rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The lexicographically smallest label among the tied treatments wins.
    #[default]
    LowestLabel,
    /// No winner is picked; the level with the tie has no optimum.
    Abstain,
}

/// Outcome of an argmax over a treatment -> rate map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The map was empty.
    Empty,
    /// A single treatment has the highest rate.
    Unique(Label),
    /// Several treatments share the highest rate, listed in label order.
    Tied {
        treatments: Vec<Label>,
        winner: Option<Label>,
    },
}

impl Selection {
    /// Returns the selected treatment, if any.
    pub fn winner(&self) -> Option<&Label> {
        match self {
            Selection::Empty => None,
            Selection::Unique(label) => Some(label),
            Selection::Tied { winner, .. } => winner.as_ref(),
        }
    }
}

impl TieBreak {
    /// Picks the treatment with the highest rate, applying this policy to ties.
    ///
    /// Rates are compared exactly, so only genuinely equal fractions tie.
    pub fn select(&self, rates: &BTreeMap<Label, Rate>) -> Selection {
        let Some(best) = rates.values().max() else {
            return Selection::Empty;
        };

        // BTreeMap iteration keeps the tied labels sorted.
        let mut tied: Vec<Label> = rates
            .iter()
            .filter(|(_, rate)| *rate == best)
            .map(|(label, _)| label.clone())
            .collect();

        if tied.len() == 1 {
            return Selection::Unique(tied.remove(0));
        }

        let winner = match self {
            TieBreak::LowestLabel => tied.first().cloned(),
            TieBreak::Abstain => None,
        };
        Selection::Tied {
            treatments: tied,
            winner,
        }
    }

    /// Returns the configuration name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::LowestLabel => "lowest_label",
            TieBreak::Abstain => "abstain",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowest_label" => Ok(TieBreak::LowestLabel),
            "abstain" => Ok(TieBreak::Abstain),
            other => Err(format!("unknown tie-break policy: {}", other)),
        }
    }
}
