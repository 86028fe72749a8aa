//! Round-based negotiation engine with adaptive patience estimates.
//!
//! The engine owns one [`NegotiationSession`] and drives it through an
//! explicit sequence of caller-supplied steps: observe the firm's counter
//! offer, then ask for the worker's next offer. Its belief updates are an
//! exponentially-weighted moving-average heuristic, not a quantity derived
//! from the closed-form game; they are documented as such below.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::equilibrium::validate_discount;
use crate::error::{BargainError, Result};
use crate::session::{clamp_to, NegotiationStatus, Party};
use crate::tables::field_ceiling;

/// EWMA weight given to a new observation of the firm's patience.
const FIRM_PATIENCE_WEIGHT: f64 = 0.3;

/// EWMA weight for the firm's inferred belief about the worker's patience.
const WORKER_BELIEF_WEIGHT: f64 = 0.2;

/// Discount-factor estimates are kept strictly inside (0,1).
const ESTIMATE_FLOOR: f64 = 0.01;
const ESTIMATE_CEILING: f64 = 0.99;

/// Fraction of the remaining gap the worker closes per round, bounded away
/// from both "no movement" and "full capitulation".
const MIN_STEP_RATIO: f64 = 0.1;
const MAX_STEP_RATIO: f64 = 0.9;

/// Initial patience estimates used before any counter offer is observed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Starting estimate of the firm's discount factor.
    pub initial_firm_discount: f64,
    /// Starting estimate of the firm's belief about the worker's discount.
    pub initial_worker_belief: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            initial_firm_discount: 0.9,
            initial_worker_belief: 0.9,
        }
    }
}

/// Mutable state of one round-based negotiation.
///
/// Owned exclusively by the engine that created it; invariants
/// `B < S ≤ E` hold from construction, `current_round` only increases,
/// and the session is terminal exactly when its status leaves `Ongoing`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NegotiationSession {
    /// The worker's target salary `S`.
    pub target: f64,
    /// Floor salary `B` (the worker's reservation value).
    pub floor: f64,
    /// Ceiling salary `E`, resolved from the field→ceiling table.
    pub ceiling: f64,
    /// Which side proposes in round one.
    pub first_mover: Party,
    /// Total round budget.
    pub total_rounds: u32,
    /// Current round, starting at one.
    pub current_round: u32,
    /// The worker's own discount factor.
    pub worker_discount: f64,
    /// Running estimate of the firm's discount factor (heuristic).
    pub firm_discount_estimate: f64,
    /// Running estimate of the firm's belief about the worker's discount
    /// factor (heuristic).
    pub worker_discount_belief: f64,
    /// Ordered history of the worker's offers.
    pub worker_offers: Vec<f64>,
    /// Ordered history of the firm's observed counter offers.
    pub firm_offers: Vec<f64>,
    /// Lifecycle status.
    pub status: NegotiationStatus,
}

impl NegotiationSession {
    /// Which side owns a given round, by parity anchored at the first mover.
    pub fn turn_owner(&self, round: u32) -> Party {
        if round % 2 == 1 {
            self.first_mover
        } else {
            self.first_mover.other()
        }
    }

    /// Rounds left in the budget, counting the current one.
    fn rounds_remaining(&self) -> u32 {
        self.total_rounds.saturating_sub(self.current_round) + 1
    }
}

/// Stateful negotiation driver for the worker's side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundNegotiationEngine {
    session: NegotiationSession,
}

impl RoundNegotiationEngine {
    /// Starts a negotiation for a job `field`, resolving the firm's payment
    /// ceiling from the field→ceiling table.
    ///
    /// Fails with `UnknownCategory` for an unrecognized field, with
    /// `InvalidParameters` for a degenerate floor or discount factor, and
    /// with `OutOfRange` when the target's implied share `(S−B)/(E−B)`
    /// falls outside `[0,1]`.
    pub fn start(
        field: &str,
        target: f64,
        floor: f64,
        first_mover: Party,
        total_rounds: u32,
        worker_discount: f64,
        options: EngineOptions,
    ) -> Result<Self> {
        let ceiling = field_ceiling(field)?;
        validate_discount(worker_discount, "worker discount factor")?;
        if !floor.is_finite() || floor <= 0.0 || floor >= ceiling {
            return Err(BargainError::invalid_parameters(
                "floor must satisfy 0 < B < E",
            ));
        }
        if total_rounds == 0 {
            return Err(BargainError::invalid_parameters(
                "round budget must be at least one",
            ));
        }

        let target_share = (target - floor) / (ceiling - floor);
        if !target_share.is_finite() || !(0.0..=1.0).contains(&target_share) || target <= floor {
            return Err(BargainError::out_of_range(
                "target salary",
                target,
                floor,
                ceiling,
            ));
        }

        Ok(Self {
            session: NegotiationSession {
                target,
                floor,
                ceiling,
                first_mover,
                total_rounds,
                current_round: 1,
                worker_discount,
                firm_discount_estimate: options.initial_firm_discount,
                worker_discount_belief: options.initial_worker_belief,
                worker_offers: Vec::new(),
                firm_offers: Vec::new(),
                status: NegotiationStatus::Ongoing,
            },
        })
    }

    /// Read-only view of the owned session.
    pub fn session(&self) -> &NegotiationSession {
        &self.session
    }

    /// Records the firm's counter offer and updates the patience estimates.
    ///
    /// Heuristic belief update, not an equilibrium quantity: a counter
    /// offer close to the worker's target is read as a generous early
    /// concession, which signals an impatient firm, so the firm-patience
    /// estimate moves toward low values (EWMA, 0.3 new / 0.7 old). The
    /// same proximity signal nudges the estimate of the firm's belief
    /// about the worker's patience upward (EWMA, 0.2 new / 0.8 old).
    ///
    /// The offer is accepted as-is, even outside `[B,E]`, so callers can
    /// observe out-of-range behavior; only the engine's own suggestions
    /// are clamped.
    pub fn observe_counter_offer(&mut self, offer: f64) {
        let session = &mut self.session;
        session.firm_offers.push(offer);

        let span = session.target - session.floor;
        let proximity = clamp_to((offer - session.floor) / span, 0.0, 1.0);

        let firm_sample = 1.0 - proximity;
        session.firm_discount_estimate = clamp_to(
            (1.0 - FIRM_PATIENCE_WEIGHT) * session.firm_discount_estimate
                + FIRM_PATIENCE_WEIGHT * firm_sample,
            ESTIMATE_FLOOR,
            ESTIMATE_CEILING,
        );
        session.worker_discount_belief = clamp_to(
            (1.0 - WORKER_BELIEF_WEIGHT) * session.worker_discount_belief
                + WORKER_BELIEF_WEIGHT * proximity,
            ESTIMATE_FLOOR,
            ESTIMATE_CEILING,
        );
        debug!(
            "observed counter offer {offer}: proximity {proximity}, firm δ estimate {}, worker δ belief {}",
            session.firm_discount_estimate, session.worker_discount_belief
        );
    }

    /// Advances to the worker's next turn and suggests an offer.
    ///
    /// Optionally records `counter_offer` first. Rounds owned by the firm
    /// are skipped; once the budget is exhausted the session fails and the
    /// static target is returned as a terminal fallback. Otherwise the
    /// worker closes a fraction of the gap between the firm's last offer
    /// and the target: a larger fraction when the worker is impatient or
    /// few rounds remain.
    pub fn advance_and_suggest(&mut self, counter_offer: Option<f64>) -> Result<f64> {
        if !self.session.status.is_ongoing() {
            return Err(BargainError::SessionClosed);
        }
        if let Some(offer) = counter_offer {
            self.observe_counter_offer(offer);
        }

        let session = &mut self.session;
        while session.current_round <= session.total_rounds
            && session.turn_owner(session.current_round) != Party::Worker
        {
            session.current_round += 1;
        }
        if session.current_round > session.total_rounds {
            session.status = NegotiationStatus::Failed;
            return Ok(session.target);
        }

        let anchor = session.firm_offers.last().copied().unwrap_or(session.floor);
        let rounds_remaining = session.rounds_remaining() as f64;
        let step_ratio = clamp_to(
            0.5 * (1.0 - session.worker_discount) + 0.5 / rounds_remaining,
            MIN_STEP_RATIO,
            MAX_STEP_RATIO,
        );
        let suggestion = clamp_to(
            anchor + step_ratio * (session.target - anchor),
            session.floor,
            session.ceiling,
        );
        debug!(
            "round {}: step ratio {step_ratio}, suggesting {suggestion}",
            session.current_round
        );

        session.worker_offers.push(suggestion);
        session.current_round += 1;
        Ok(suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine(first_mover: Party, total_rounds: u32) -> RoundNegotiationEngine {
        RoundNegotiationEngine::start(
            "it_telecom",
            80_000_000.0,
            50_000_000.0,
            first_mover,
            total_rounds,
            0.9,
            EngineOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn unknown_field_fails_construction() {
        let result = RoundNegotiationEngine::start(
            "astronaut",
            80_000_000.0,
            50_000_000.0,
            Party::Worker,
            6,
            0.9,
            EngineOptions::default(),
        );
        assert!(matches!(result, Err(BargainError::UnknownCategory { .. })));
    }

    #[test]
    fn target_outside_the_bargaining_range_fails_construction() {
        // it_telecom ceiling is 90,000,000; a target above it is infeasible.
        let above = RoundNegotiationEngine::start(
            "it_telecom",
            95_000_000.0,
            50_000_000.0,
            Party::Worker,
            6,
            0.9,
            EngineOptions::default(),
        );
        assert!(matches!(above, Err(BargainError::OutOfRange { .. })));

        let below = RoundNegotiationEngine::start(
            "it_telecom",
            40_000_000.0,
            50_000_000.0,
            Party::Worker,
            6,
            0.9,
            EngineOptions::default(),
        );
        assert!(matches!(below, Err(BargainError::OutOfRange { .. })));
    }

    #[test]
    fn turn_owner_alternates_from_the_first_mover() {
        let engine = engine(Party::Firm, 6);
        let session = engine.session();
        assert_eq!(session.turn_owner(1), Party::Firm);
        assert_eq!(session.turn_owner(2), Party::Worker);
        assert_eq!(session.turn_owner(3), Party::Firm);
    }

    #[test]
    fn first_suggestion_anchors_on_the_floor_when_nothing_was_observed() {
        let mut engine = engine(Party::Worker, 10);
        let suggestion = engine.advance_and_suggest(None).unwrap();
        // δ_w = 0.9 and 10 rounds remaining: step = 0.5×0.1 + 0.5/10 = 0.1.
        let expected = 50_000_000.0 + 0.1 * 30_000_000.0;
        assert_relative_eq!(suggestion, expected, epsilon = 1e-6);
        assert_eq!(engine.session().current_round, 2);
        assert_eq!(engine.session().worker_offers, vec![suggestion]);
    }

    #[test]
    fn suggestion_closes_the_gap_from_the_firms_last_offer() {
        let mut engine = engine(Party::Firm, 10);
        let suggestion = engine.advance_and_suggest(Some(60_000_000.0)).unwrap();
        assert!(suggestion > 60_000_000.0);
        assert!(suggestion <= 80_000_000.0);
        // The firm's round was skipped before the worker's turn.
        assert_eq!(engine.session().current_round, 3);
    }

    #[test]
    fn exhausted_budget_returns_the_target_and_fails_the_session() {
        let mut engine = engine(Party::Worker, 1);
        engine.advance_and_suggest(None).unwrap();
        // Round 2 exceeds the budget of one.
        let fallback = engine.advance_and_suggest(None).unwrap();
        assert_relative_eq!(fallback, 80_000_000.0);
        assert_eq!(engine.session().status, NegotiationStatus::Failed);
        assert!(matches!(
            engine.advance_and_suggest(None),
            Err(BargainError::SessionClosed)
        ));
    }

    #[test]
    fn near_target_counter_offer_lowers_the_firm_patience_estimate() {
        let mut engine = engine(Party::Firm, 10);
        let before = engine.session().firm_discount_estimate;
        engine.observe_counter_offer(79_000_000.0);
        let after = engine.session().firm_discount_estimate;
        assert!(after < before);
        assert!(engine.session().worker_discount_belief > 0.9);
    }

    #[test]
    fn lowball_counter_offer_raises_the_firm_patience_estimate() {
        let mut engine = engine(Party::Firm, 10);
        engine.observe_counter_offer(50_000_000.0);
        // Proximity zero: sample is 1.0, pulling the estimate upward.
        assert!(engine.session().firm_discount_estimate > 0.9);
    }

    #[test]
    fn out_of_range_counter_offers_are_recorded_unclamped() {
        let mut engine = engine(Party::Firm, 10);
        engine.observe_counter_offer(120_000_000.0);
        assert_eq!(engine.session().firm_offers, vec![120_000_000.0]);
    }

    #[test]
    fn identical_call_sequences_produce_identical_sessions() {
        let mut a = engine(Party::Firm, 8);
        let mut b = engine(Party::Firm, 8);
        for offer in [55_000_000.0, 62_000_000.0, 68_000_000.0] {
            let sa = a.advance_and_suggest(Some(offer)).unwrap();
            let sb = b.advance_and_suggest(Some(offer)).unwrap();
            assert_eq!(sa, sb);
        }
        assert_eq!(a.session(), b.session());
    }
}
