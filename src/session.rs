//! Shared negotiation vocabulary: bargaining sides and session status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one side of the bargaining table.
///
/// A closed two-variant tag rather than free-form strings, so a typo in the
/// actor name cannot silently flip the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    /// The job candidate / employee side.
    Worker,
    /// The employer side.
    Firm,
}

impl Party {
    /// Returns the opposing side.
    pub fn other(self) -> Self {
        match self {
            Party::Worker => Party::Firm,
            Party::Firm => Party::Worker,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Worker => write!(f, "worker"),
            Party::Firm => write!(f, "firm"),
        }
    }
}

/// Terminal status of a negotiation session.
///
/// A session becomes terminal exactly when its status leaves `Ongoing`;
/// terminal states are absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum NegotiationStatus {
    /// The negotiation is still running.
    Ongoing,
    /// The parties agreed on the contained salary.
    Success(f64),
    /// The round budget was exhausted without agreement.
    Failed,
}

impl NegotiationStatus {
    /// Whether the session can still advance.
    pub fn is_ongoing(&self) -> bool {
        matches!(self, NegotiationStatus::Ongoing)
    }

    /// The agreed salary, when the session ended in agreement.
    pub fn final_salary(&self) -> Option<f64> {
        match self {
            NegotiationStatus::Success(salary) => Some(*salary),
            _ => None,
        }
    }
}

/// Clamps `value` into the inclusive interval `[lower, upper]`.
pub(crate) fn clamp_to(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}
