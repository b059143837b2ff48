use serde::{Deserialize, Serialize};

/// Failure priority carried by a severity marker in a test or suite name.
///
/// Variant order is semantic: `P1` is the most severe and sorts first.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Severity {
    P1,
    #[default]
    P2,
    P3,
}

impl Severity {
    pub const ALL: [Self; 3] = [Self::P1, Self::P2, Self::P3];

    /// Sort rank used by the aggregator: `P1 → 0`, `P2 → 1`, `P3 → 2`.
    pub const fn rank(self) -> u8 {
        match self {
            Self::P1 => 0,
            Self::P2 => 1,
            Self::P3 => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }

    /// Parse a marker token, ignoring case. Unknown tokens yield `None`.
    pub fn from_marker(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "P1" => Some(Self::P1),
            "P2" => Some(Self::P2),
            "P3" => Some(Self::P3),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
