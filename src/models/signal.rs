use serde::{Deserialize, Serialize};
use std::fmt;

/// Where price sits relative to both indicators on one timeframe.
///
/// "No signal" is expressed as `Option::<Condition>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    Above,
    Below,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Above => "ABOVE",
            Condition::Below => "BELOW",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-instrument result of one evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Above,
    Below,
    None,
}

impl Verdict {
    /// The direction to notify about, if any
    pub fn condition(&self) -> Option<Condition> {
        match self {
            Verdict::Above => Some(Condition::Above),
            Verdict::Below => Some(Condition::Below),
            Verdict::None => None,
        }
    }
}

impl From<Condition> for Verdict {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Above => Verdict::Above,
            Condition::Below => Verdict::Below,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Above => f.write_str("ABOVE"),
            Verdict::Below => f.write_str("BELOW"),
            Verdict::None => f.write_str("NONE"),
        }
    }
}
