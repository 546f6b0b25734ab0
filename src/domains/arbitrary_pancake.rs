//! Arbitrary-cost pancake flipping (`original_source/src/search/domains/
//! arbitrary_pancake.py`). Same state and successor topology as
//! [`crate::domains::unit_pancake`] (leftmost slot is the fixed base), but
//! the cost of a flip is the number of pancakes it moves rather than a flat
//! 1, computed generically from any two states so it stays consistent
//! between `successors` and a standalone `cost`.

use crate::search::{Cost, Degradation, Domain, HeuristicFn, HeuristicPair};
use std::rc::Rc;

pub type PancakeState = Vec<u32>;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArbitraryPancakeDomain;

impl Domain for ArbitraryPancakeDomain {
    type State = PancakeState;

    fn successors(&self, state: &PancakeState) -> Vec<(PancakeState, Cost)> {
        let n = state.len();
        if n < 3 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(n - 2);
        for i in 1..n - 1 {
            let mut child = state[..i].to_vec();
            child.extend(state[i..].iter().rev());
            let edge_cost = cost(state, &child);
            out.push((child, edge_cost));
        }
        out
    }

    fn heuristic(&self, name: &str) -> Option<HeuristicPair<PancakeState>> {
        match name {
            "zero" => Some(HeuristicPair::zero()),
            "largest_pancake" => {
                let fw: HeuristicFn<PancakeState> =
                    Rc::new(|s: &PancakeState, goal: &PancakeState, degradation: Degradation| {
                        largest_pancake_heuristic(s, goal, degradation)
                    });
                Some(HeuristicPair {
                    forward: Rc::clone(&fw),
                    backward: fw,
                })
            }
            _ => None,
        }
    }

    fn heuristic_names(&self) -> Vec<&'static str> {
        vec!["zero", "largest_pancake"]
    }
}

/// The number of pancakes that differ between `from` and `to`, counted from
/// the first position they diverge (`original_source`'s generic `cost`):
/// the length of the flip needed to turn one into the other.
pub fn cost(from: &PancakeState, to: &PancakeState) -> Cost {
    let first_diff = from
        .iter()
        .zip(to.iter())
        .position(|(a, b)| a != b)
        .unwrap_or(from.len());
    (from.len() - first_diff) as Cost
}

/// The value of the highest-indexed out-of-place pancake, within the
/// `degradation`-limited window (`original_source`'s
/// `largest_pancake_heuristic_fw`): a lower bound on remaining cost, since
/// fixing that pancake's position requires a flip at least that large.
fn largest_pancake_heuristic(state: &PancakeState, goal: &PancakeState, degradation: Degradation) -> Cost {
    if state == goal {
        return 0;
    }
    let len = goal.len() as f64;
    let stop = (len - ((degradation as f64 / 10.0) * len).floor()) as usize;
    let stop = stop.min(goal.len());
    (1..stop)
        .filter(|&i| state[i] != goal[i])
        .next_back()
        .map(|i| state[i] as Cost)
        .unwrap_or(0)
}

pub use super::unit_pancake::parse_problem_line;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_counts_the_flip_size() {
        assert_eq!(cost(&vec![3, 1, 2], &vec![3, 2, 1]), 2);
        assert_eq!(cost(&vec![5, 1, 4, 2, 3], &vec![5, 1, 4, 3, 2]), 2);
    }

    #[test]
    fn cost_of_identical_states_is_zero() {
        let state = vec![3u32, 1, 2];
        assert_eq!(cost(&state, &state), 0);
    }

    #[test]
    fn successors_costs_match_standalone_cost_fn() {
        let domain = ArbitraryPancakeDomain;
        let state = vec![5u32, 1, 4, 2, 3];
        for (child, edge_cost) in domain.successors(&state) {
            assert_eq!(edge_cost, cost(&state, &child));
            assert!(edge_cost >= 1);
        }
    }

    #[test]
    fn single_flip_reaches_goal_for_three_pancakes() {
        let domain = ArbitraryPancakeDomain;
        let state = vec![3u32, 1, 2];
        let successors = domain.successors(&state);
        assert_eq!(successors, vec![(vec![3, 2, 1], 2)]);
    }

    #[test]
    fn largest_pancake_heuristic_is_zero_at_goal() {
        let goal = vec![3u32, 2, 1];
        assert_eq!(largest_pancake_heuristic(&goal, &goal, 0), 0);
    }

    #[test]
    fn largest_pancake_heuristic_is_admissible_for_single_flip() {
        let state = vec![3u32, 1, 2];
        let goal = vec![3u32, 2, 1];
        let h = largest_pancake_heuristic(&state, &goal, 0);
        assert!(h <= cost(&state, &goal));
    }
}
