//! Backward induction over the alternating-offer game tree.
//!
//! Reconstructs the equilibrium shares of the rounds preceding a terminal
//! round: the standard "shrinking pie" rollback, where a proposer-responder
//! pair at round `t−1` agrees only if the responder gets at least the
//! discounted value of waiting until round `t`.

use serde::{Deserialize, Serialize};

use crate::equilibrium::validate_discount;
use crate::error::{BargainError, Result};
use crate::session::Party;

/// One point on the projected equilibrium path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Offset from the terminal round: `0` is terminal, negative is earlier.
    pub round_offset: i32,
    /// Which side proposes at this round.
    pub proposer: Party,
    /// The worker's equilibrium share at this round.
    pub worker_share: f64,
}

/// Projects the equilibrium path backward from a terminal worker share.
///
/// Walks `horizon_rounds` steps back from round offset `0`, alternating the
/// proposer each step. When the earlier round's proposer is the worker, the
/// firm's share there is `1 − δ_w × worker_share_next`; symmetric with
/// `δ_f` when the firm proposes. Answers "what should have been offered N
/// rounds ago to be consistent with today's equilibrium."
///
/// The returned sequence is sorted by ascending round offset, oldest first.
pub fn project(
    final_worker_share: f64,
    worker_discount: f64,
    firm_discount: f64,
    horizon_rounds: u32,
    final_proposer: Party,
) -> Result<Vec<PathPoint>> {
    validate_discount(worker_discount, "worker discount factor")?;
    validate_discount(firm_discount, "firm discount factor")?;
    if !(0.0..=1.0).contains(&final_worker_share) {
        return Err(BargainError::out_of_range(
            "final worker share",
            final_worker_share,
            0.0,
            1.0,
        ));
    }

    let mut path = Vec::with_capacity(horizon_rounds as usize + 1);
    path.push(PathPoint {
        round_offset: 0,
        proposer: final_proposer,
        worker_share: final_worker_share,
    });

    let mut worker_share = final_worker_share;
    let mut proposer = final_proposer;
    for step in 1..=horizon_rounds {
        proposer = proposer.other();
        worker_share = match proposer {
            // The worker proposes: the firm's share makes it indifferent to
            // waiting one round, leaving the worker the discounted remainder.
            Party::Worker => worker_discount * worker_share,
            Party::Firm => 1.0 - firm_discount * (1.0 - worker_share),
        };
        path.push(PathPoint {
            round_offset: -(step as i32),
            proposer,
            worker_share,
        });
    }

    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn terminal_point_carries_the_given_share() {
        let path = project(0.6, 0.9, 0.8, 0, Party::Worker).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].round_offset, 0);
        assert_eq!(path[0].proposer, Party::Worker);
        assert_relative_eq!(path[0].worker_share, 0.6);
    }

    #[test]
    fn proposers_alternate_and_offsets_ascend() {
        let path = project(0.5, 0.9, 0.8, 3, Party::Firm).unwrap();
        assert_eq!(path.len(), 4);
        let offsets: Vec<i32> = path.iter().map(|p| p.round_offset).collect();
        assert_eq!(offsets, vec![-3, -2, -1, 0]);
        let proposers: Vec<Party> = path.iter().map(|p| p.proposer).collect();
        assert_eq!(
            proposers,
            vec![Party::Firm, Party::Worker, Party::Firm, Party::Worker]
        );
    }

    #[test]
    fn rollback_applies_the_indifference_recurrence() {
        let (dw, df) = (0.9, 0.8);
        let path = project(0.7, dw, df, 2, Party::Firm).unwrap();

        // One step back the worker proposes: worker keeps δ_w × 0.7.
        let minus_one = &path[1];
        assert_eq!(minus_one.proposer, Party::Worker);
        assert_relative_eq!(minus_one.worker_share, dw * 0.7, epsilon = 1e-12);

        // Two steps back the firm proposes: worker gets 1 − δ_f × firm share.
        let minus_two = &path[0];
        assert_eq!(minus_two.proposer, Party::Firm);
        assert_relative_eq!(
            minus_two.worker_share,
            1.0 - df * (1.0 - dw * 0.7),
            epsilon = 1e-12
        );
    }

    #[test]
    fn shares_stay_inside_the_unit_interval() {
        let path = project(1.0, 0.99, 0.01, 50, Party::Worker).unwrap();
        for point in &path {
            assert!((0.0..=1.0).contains(&point.worker_share));
        }
    }

    #[test]
    fn rejects_invalid_share_and_discounts() {
        assert!(project(1.5, 0.9, 0.8, 3, Party::Worker).is_err());
        assert!(project(0.5, 1.0, 0.8, 3, Party::Worker).is_err());
        assert!(project(0.5, 0.9, 0.0, 3, Party::Worker).is_err());
    }
}
