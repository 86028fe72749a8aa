//! Turn-based bargaining simulator with explicit accept/reject/counter moves.
//!
//! The firm plays a fixed rule converging toward a precomputed equilibrium
//! salary; the user drives the session one action at a time. Terminal
//! states are absorbing and the round budget is irreversible.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::equilibrium::{nash, rubinstein, BargainingParameters, EquilibriumResult};
use crate::error::{BargainError, Result};
use crate::session::{clamp_to, Party};

/// Which closed-form solution anchors the firm's concession rule.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EquilibriumMode {
    /// Discount-factor based Rubinstein solution (primary mode).
    Rubinstein {
        worker_discount: f64,
        firm_discount: f64,
    },
    /// Exogenous bargaining-power Nash split (secondary mode).
    Nash { theta: f64 },
}

/// Immutable configuration for one simulator session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Floor salary `B`.
    pub floor: f64,
    /// Ceiling salary `E`.
    pub ceiling: f64,
    /// Round budget; every reject or out-of-range counter consumes one.
    pub max_rounds: u32,
    /// Which side moves first.
    pub first_mover: Party,
    /// Equilibrium anchor for the firm's offers.
    pub mode: EquilibriumMode,
}

/// Observable state of the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimulatorState {
    /// The firm's offer is on the table; the user accepts or rejects.
    AwaitingFirmTurn,
    /// The user proposes a salary.
    AwaitingWorkerTurn,
    /// Agreement at the contained salary.
    Success(f64),
    /// Round budget exhausted without agreement.
    Failed,
}

/// Interactive finite-state negotiation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnBasedBargainingSimulator {
    config: SimulatorConfig,
    equilibrium: EquilibriumResult,
    state: SimulatorState,
    rounds_used: u32,
    last_worker_offer: Option<f64>,
}

impl TurnBasedBargainingSimulator {
    /// Starts a session, computing the equilibrium salary once up front.
    ///
    /// The equilibrium is immutable for the session's lifetime; parameter
    /// validation follows the chosen mode's calculator.
    pub fn start(config: SimulatorConfig) -> Result<Self> {
        if config.max_rounds == 0 {
            return Err(BargainError::invalid_parameters(
                "round budget must be at least one",
            ));
        }
        let equilibrium = match config.mode {
            EquilibriumMode::Rubinstein {
                worker_discount,
                firm_discount,
            } => {
                let params = BargainingParameters::new(
                    config.floor,
                    config.ceiling,
                    worker_discount,
                    firm_discount,
                )?;
                rubinstein(&params)
            }
            EquilibriumMode::Nash { theta } => nash(config.floor, config.ceiling, theta)?,
        };
        let state = match config.first_mover {
            Party::Firm => SimulatorState::AwaitingFirmTurn,
            Party::Worker => SimulatorState::AwaitingWorkerTurn,
        };
        Ok(Self {
            config,
            equilibrium,
            state,
            rounds_used: 0,
            last_worker_offer: None,
        })
    }

    /// Current state of the session.
    pub fn state(&self) -> SimulatorState {
        self.state
    }

    /// The precomputed equilibrium anchoring the firm's offers.
    pub fn equilibrium(&self) -> &EquilibriumResult {
        &self.equilibrium
    }

    /// Rounds consumed so far.
    pub fn rounds_used(&self) -> u32 {
        self.rounds_used
    }

    /// The firm's offer currently on the table, when it is the firm's turn.
    ///
    /// First move is the pure equilibrium salary; subsequent moves split
    /// the gap between the worker's last offer and the equilibrium, clamped
    /// to the bargaining range.
    pub fn current_firm_offer(&self) -> Option<f64> {
        match self.state {
            SimulatorState::AwaitingFirmTurn => Some(self.firm_offer_rule()),
            _ => None,
        }
    }

    /// Accepts the firm's offer, ending the session in agreement.
    pub fn accept(&mut self) -> Result<f64> {
        let offer = self.require_firm_turn()?;
        self.state = SimulatorState::Success(offer);
        debug!("worker accepted {offer}");
        Ok(offer)
    }

    /// Rejects the firm's offer, consuming one round.
    ///
    /// Exhausting the budget is terminal and irreversible; otherwise the
    /// turn passes to the worker.
    pub fn reject(&mut self) -> Result<SimulatorState> {
        self.require_firm_turn()?;
        self.state = if self.consume_round() {
            SimulatorState::Failed
        } else {
            SimulatorState::AwaitingWorkerTurn
        };
        Ok(self.state)
    }

    /// Submits the worker's proposed salary.
    ///
    /// Any proposal inside `[B,E]` is acceptable to the firm and succeeds
    /// immediately. An out-of-range proposal consumes a round and, if the
    /// budget survives, hands the turn back to the firm, which counters
    /// from this proposal.
    pub fn propose(&mut self, salary: f64) -> Result<SimulatorState> {
        match self.state {
            SimulatorState::AwaitingWorkerTurn => {}
            SimulatorState::AwaitingFirmTurn => {
                return Err(BargainError::WrongTurn { expected: "worker" });
            }
            _ => return Err(BargainError::SessionClosed),
        }

        if (self.config.floor..=self.config.ceiling).contains(&salary) {
            self.state = SimulatorState::Success(salary);
            debug!("firm accepted in-range proposal {salary}");
            return Ok(self.state);
        }

        self.last_worker_offer = Some(salary);
        self.state = if self.consume_round() {
            SimulatorState::Failed
        } else {
            SimulatorState::AwaitingFirmTurn
        };
        Ok(self.state)
    }

    fn firm_offer_rule(&self) -> f64 {
        let offer = match self.last_worker_offer {
            None => self.equilibrium.equilibrium_salary,
            Some(last) => last + 0.5 * (self.equilibrium.equilibrium_salary - last),
        };
        clamp_to(offer, self.config.floor, self.config.ceiling)
    }

    fn require_firm_turn(&self) -> Result<f64> {
        match self.state {
            SimulatorState::AwaitingFirmTurn => Ok(self.firm_offer_rule()),
            SimulatorState::AwaitingWorkerTurn => {
                Err(BargainError::WrongTurn { expected: "firm" })
            }
            _ => Err(BargainError::SessionClosed),
        }
    }

    fn consume_round(&mut self) -> bool {
        self.rounds_used += 1;
        let exhausted = self.rounds_used >= self.config.max_rounds;
        if exhausted {
            debug!("round budget of {} exhausted", self.config.max_rounds);
        }
        exhausted
    }
}
