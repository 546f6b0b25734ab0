//! Unit-cost pancake flipping (`original_source/src/search/domains/
//! unit_pancake.py`). A state is a stack of pancakes, leftmost slot fixed as
//! the base; every flip reverses a suffix of length >= 2, so a stack of `n`
//! pancakes has `n - 2` successors, each costing exactly 1.

use crate::search::{Cost, Degradation, Domain, HeuristicFn, HeuristicPair};
use itertools::Itertools;
use std::rc::Rc;

/// A pancake stack, leftmost element the fixed base (§6, "Problem file").
pub type PancakeState = Vec<u32>;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnitPancakeDomain;

impl Domain for UnitPancakeDomain {
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
            out.push((child, 1));
        }
        out
    }

    fn heuristic(&self, name: &str) -> Option<HeuristicPair<PancakeState>> {
        match name {
            "zero" => Some(HeuristicPair::zero()),
            "gap" => {
                let fw: HeuristicFn<PancakeState> =
                    Rc::new(|s: &PancakeState, goal: &PancakeState, degradation: Degradation| {
                        gap_heuristic(s, goal, degradation)
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
        vec!["zero", "gap"]
    }
}

/// `1` for every unit-pancake transition (§4.1, "cost").
pub fn cost(_from: &PancakeState, _to: &PancakeState) -> Cost {
    1
}

fn not_adjacent(p1: u32, p2: u32, state: &[u32]) -> bool {
    state
        .iter()
        .copied()
        .tuple_windows()
        .all(|(a, b)| !((a == p1 && b == p2) || (a == p2 && b == p1)))
}

/// Counts pairs of pancakes adjacent in `state` but not in `goal`
/// (`original_source`'s `gap_heuristic_fw`), windowed by `degradation`: at
/// degradation 10 the window collapses to nothing and the heuristic becomes
/// the zero heuristic.
fn gap_heuristic(state: &PancakeState, goal: &PancakeState, degradation: Degradation) -> Cost {
    let len = goal.len() as f64;
    let stop = (len - 1.0) - ((degradation as f64 / 10.0) * len).floor();
    if stop <= 0.0 {
        return 0;
    }
    let stop = (stop as usize).min(state.len().saturating_sub(1));
    (0..stop)
        .filter(|&i| not_adjacent(state[i], state[i + 1], goal))
        .count() as Cost
}

/// Parses a whitespace-separated pancake problem line (§6, "Problem file"):
/// the leftmost integer is the base, the goal is the same multiset sorted
/// descending.
pub fn parse_problem_line(line: &str) -> Result<(PancakeState, PancakeState), crate::config::ProblemParseError> {
    let initial: PancakeState = line
        .split_whitespace()
        .map(|tok| {
            tok.parse::<u32>()
                .map_err(|_| crate::config::ProblemParseError::Malformed(format!("not an integer: {tok:?}")))
        })
        .collect::<Result<_, _>>()?;
    if initial.is_empty() {
        return Err(crate::config::ProblemParseError::Malformed("empty pancake line".into()));
    }
    let mut goal = initial.clone();
    goal.sort_unstable_by(|a, b| b.cmp(a));
    Ok((initial, goal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successors_count_matches_n_minus_two() {
        let domain = UnitPancakeDomain;
        let state = vec![5, 1, 4, 2, 3];
        assert_eq!(domain.successors(&state).len(), 3);
    }

    #[test]
    fn base_is_never_touched() {
        let domain = UnitPancakeDomain;
        let state = vec![9, 1, 2, 3, 4];
        for (child, edge_cost) in domain.successors(&state) {
            assert_eq!(child[0], 9);
            assert_eq!(edge_cost, 1);
        }
    }

    #[test]
    fn successors_are_deterministic_across_calls() {
        let domain = UnitPancakeDomain;
        let state = vec![5, 1, 4, 2, 3];
        assert_eq!(domain.successors(&state), domain.successors(&state));
    }

    #[test]
    fn single_flip_reaches_goal_for_three_pancakes() {
        let domain = UnitPancakeDomain;
        let state = vec![3u32, 1, 2];
        let successors = domain.successors(&state);
        assert_eq!(successors, vec![(vec![3, 2, 1], 1)]);
    }

    #[test]
    fn gap_heuristic_is_zero_at_goal() {
        let goal = vec![3u32, 2, 1];
        assert_eq!(gap_heuristic(&goal, &goal, 0), 0);
    }

    #[test]
    fn gap_heuristic_fully_degraded_is_zero() {
        let state = vec![1u32, 2, 3];
        let goal = vec![3u32, 2, 1];
        assert_eq!(gap_heuristic(&state, &goal, 10), 0);
    }

    #[test]
    fn parse_problem_line_orders_goal_descending() {
        let (initial, goal) = parse_problem_line("6 4 3 2 1 5").unwrap();
        assert_eq!(initial, vec![6, 4, 3, 2, 1, 5]);
        assert_eq!(goal, vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn parse_problem_line_rejects_non_integers() {
        assert!(parse_problem_line("1 two 3").is_err());
    }
}
