//! Gate decision engine.
//!
//! Derives the final pass/fail verdict from per-severity failure counts.
//!
//! The policy is intentionally simple and explainable:
//!
//!   - Any P1 or P2 failure → FAIL
//!   - Else (only P3, or nothing failed) → PASS
//!
//! The verdict is computed from final counts only, never from raw records.

use serde::{Deserialize, Serialize};

use crate::rules::eval::GateCounts;

/// Two-valued gate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateDecision {
    Pass,
    Fail,
}

impl GateDecision {
    /// CI-compatible exit code: PASS → 0, FAIL → 1.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }

    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply the default gate policy to final counts.
pub fn decide(counts: &GateCounts) -> GateDecision {
    if counts.p1 > 0 || counts.p2 > 0 {
        GateDecision::Fail
    } else {
        GateDecision::Pass
    }
}
