//! Closed-form bargaining solutions and round-based salary negotiation.
//!
//! This crate packages the computational core of a career-decision and
//! salary-negotiation advisor. It offers tools to
//!
//! - score whether a job change is worthwhile from salary, tenure,
//!   industry growth, and company metrics (`scoring` module),
//! - compute the Rubinstein alternating-offer and Nash bargaining
//!   solutions in closed form (`equilibrium` module),
//! - reconstruct the backward-induction equilibrium path of the
//!   alternating-offer game (`projection` module),
//! - drive a stateful round-based negotiation that adapts its offers to
//!   observed counter offers (`engine` module), and
//! - play out an interactive accept/reject/counter negotiation against a
//!   rule-based firm (`simulator` module).
//!
//! All computation is scalar, synchronous, and deterministic: given the
//! same inputs and the same sequence of observed counter offers, every
//! component reproduces the same results. The only external collaborator,
//! the company-metrics provider, is a trait seam (`metrics` module) whose
//! failures degrade to fallback values and carried warnings.
//!
//! # Quick start
//!
//! ```
//! use bargain::equilibrium::{rubinstein, BargainingParameters};
//! use bargain::session::Party;
//! use bargain::simulator::{
//!     EquilibriumMode, SimulatorConfig, SimulatorState, TurnBasedBargainingSimulator,
//! };
//!
//! // The unique SPE of the alternating-offer game for a 30M surplus.
//! let params = BargainingParameters::new(50_000_000.0, 80_000_000.0, 0.95, 0.90)
//!     .expect("validated parameters");
//! let solution = rubinstein(&params);
//! assert!(solution.equilibrium_salary > 70_000_000.0);
//!
//! // Play one round against the rule-based firm.
//! let mut sim = TurnBasedBargainingSimulator::start(SimulatorConfig {
//!     floor: 50_000_000.0,
//!     ceiling: 80_000_000.0,
//!     max_rounds: 5,
//!     first_mover: Party::Firm,
//!     mode: EquilibriumMode::Rubinstein {
//!         worker_discount: 0.95,
//!         firm_discount: 0.90,
//!     },
//! })
//! .expect("well-formed session");
//!
//! let agreed = sim.accept().expect("firm turn");
//! assert_eq!(sim.state(), SimulatorState::Success(agreed));
//! ```

pub mod engine;
pub mod equilibrium;
pub mod error;
pub mod metrics;
pub mod projection;
pub mod scoring;
pub mod session;
pub mod simulator;
pub mod tables;

pub use engine::{EngineOptions, NegotiationSession, RoundNegotiationEngine};
pub use equilibrium::{
    nash, rubinstein, solve_floor_for_target, BargainingParameters, EquilibriumResult,
};
pub use error::{BargainError, Result};
pub use metrics::{CompanyMetrics, CompanyMetricsProvider, FetchOutcome, StaticProvider};
pub use projection::{project, PathPoint};
pub use scoring::{evaluate, evaluate_with_provider, JobChangeInput, JobChangeResult, Verdict};
pub use session::{NegotiationStatus, Party};
pub use simulator::{
    EquilibriumMode, SimulatorConfig, SimulatorState, TurnBasedBargainingSimulator,
};
