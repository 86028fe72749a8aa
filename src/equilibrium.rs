//! Closed-form bargaining solutions: Rubinstein alternating-offer and Nash.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{BargainError, Result};

/// Share denominators smaller than this make the inverse solve undefined.
const SHARE_EPSILON: f64 = 1e-9;

/// Immutable inputs that fully determine a Rubinstein equilibrium.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BargainingParameters {
    /// Floor salary `B`: the worker's reservation value.
    pub floor: f64,
    /// Ceiling salary `E`: the firm's maximum willingness to pay.
    pub ceiling: f64,
    /// Worker per-round discount factor `δ_w ∈ (0,1)`.
    pub worker_discount: f64,
    /// Firm per-round discount factor `δ_f ∈ (0,1)`.
    pub firm_discount: f64,
}

impl BargainingParameters {
    /// Validates and constructs bargaining parameters.
    pub fn new(floor: f64, ceiling: f64, worker_discount: f64, firm_discount: f64) -> Result<Self> {
        validate_range(floor, ceiling)?;
        validate_discount(worker_discount, "worker discount factor")?;
        validate_discount(firm_discount, "firm discount factor")?;
        Ok(Self {
            floor,
            ceiling,
            worker_discount,
            firm_discount,
        })
    }

    /// Total surplus `π = E − B` available to split.
    pub fn total_surplus(&self) -> f64 {
        self.ceiling - self.floor
    }
}

/// A bargaining split: pure derived value, recomputed on demand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumResult {
    /// Total surplus `π = E − B`.
    pub total_surplus: f64,
    /// The worker's share of the surplus, in `[0,1]`.
    pub worker_share: f64,
    /// The firm's share, `1 − worker_share`.
    pub firm_share: f64,
    /// The implied salary, `B + worker_share × π`.
    pub equilibrium_salary: f64,
    /// What the firm keeps, `E − equilibrium_salary`.
    pub firm_residual: f64,
}

impl EquilibriumResult {
    fn from_share(floor: f64, ceiling: f64, worker_share: f64) -> Self {
        let total_surplus = ceiling - floor;
        let equilibrium_salary = floor + worker_share * total_surplus;
        Self {
            total_surplus,
            worker_share,
            firm_share: 1.0 - worker_share,
            equilibrium_salary,
            firm_residual: ceiling - equilibrium_salary,
        }
    }
}

/// The worker's share in the unique SPE of the infinite-horizon
/// alternating-offer game: `(1 − δ_f) / (1 − δ_w·δ_f)`.
///
/// Clamped to `[0,1]` to guard against floating-point drift at the
/// boundary; the closed form itself stays inside the interval for
/// discounts strictly inside `(0,1)`.
pub fn rubinstein_worker_share(worker_discount: f64, firm_discount: f64) -> f64 {
    let raw = (1.0 - firm_discount) / (1.0 - worker_discount * firm_discount);
    if !(0.0..=1.0).contains(&raw) {
        warn!("rubinstein share {raw} clamped into [0,1]");
    }
    raw.clamp(0.0, 1.0)
}

/// Computes the Rubinstein alternating-offer equilibrium.
///
/// The relatively more patient party (discount factor closer to 1) extracts
/// the larger share, because each round of delay costs the impatient side
/// more.
pub fn rubinstein(params: &BargainingParameters) -> EquilibriumResult {
    let share = rubinstein_worker_share(params.worker_discount, params.firm_discount);
    EquilibriumResult::from_share(params.floor, params.ceiling, share)
}

/// Computes the Nash bargaining split for an exogenous power weight `θ`.
///
/// No discount factors are involved: the worker simply receives fraction
/// `θ` of the surplus.
pub fn nash(floor: f64, ceiling: f64, theta: f64) -> Result<EquilibriumResult> {
    validate_range(floor, ceiling)?;
    if !(0.0..=1.0).contains(&theta) {
        return Err(BargainError::out_of_range(
            "bargaining power θ",
            theta,
            0.0,
            1.0,
        ));
    }
    Ok(EquilibriumResult::from_share(floor, ceiling, theta))
}

/// Inverse problem: recover the floor implied by a desired final salary.
///
/// Given the Rubinstein share `v`, solves `target = B + v(E − B)` for `B`,
/// i.e. `B = (target − v·E) / (1 − v)`.
pub fn solve_floor_for_target(
    target: f64,
    ceiling: f64,
    worker_discount: f64,
    firm_discount: f64,
) -> Result<f64> {
    validate_discount(worker_discount, "worker discount factor")?;
    validate_discount(firm_discount, "firm discount factor")?;
    if ceiling <= 0.0 {
        return Err(BargainError::invalid_parameters("ceiling must be positive"));
    }
    if target > ceiling {
        return Err(BargainError::infeasible("target salary exceeds the ceiling"));
    }

    let share = rubinstein_worker_share(worker_discount, firm_discount);
    if (1.0 - share).abs() < SHARE_EPSILON {
        return Err(BargainError::infeasible(
            "worker share is one, the floor is undefined",
        ));
    }

    let floor = (target - share * ceiling) / (1.0 - share);
    if floor <= 0.0 {
        return Err(BargainError::infeasible("recovered floor is non-positive"));
    }
    if floor >= target {
        return Err(BargainError::infeasible(
            "recovered floor is at or above the target salary",
        ));
    }
    Ok(floor)
}

pub(crate) fn validate_discount(discount: f64, context: &'static str) -> Result<()> {
    if discount > 0.0 && discount < 1.0 {
        Ok(())
    } else {
        Err(BargainError::invalid_parameters(context))
    }
}

pub(crate) fn validate_range(floor: f64, ceiling: f64) -> Result<()> {
    if !(floor.is_finite() && ceiling.is_finite()) || floor <= 0.0 || ceiling <= floor {
        Err(BargainError::invalid_parameters(
            "bargaining range requires E > B > 0",
        ))
    } else {
        Ok(())
    }
}
