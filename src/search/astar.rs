use crate::search::{ClosedSet, Cost, Degradation, Direction, Domain, ExpandMode, HeuristicPair};
use crate::search::{Node, OpenSet, Problem, SuccessorCache, INFINITE_COST};
use std::rc::Rc;
use tracing::{debug, info};

/// Settings for a single A* run (§4.5). `heuristic_weighting` multiplies the
/// heuristic value; values above 1 yield weighted A*, admissible only up to
/// that bound and only when the base heuristic already is.
#[derive(Debug, Clone)]
pub struct AStarConfig {
    pub heuristic_weighting: f64,
    pub degradation: Degradation,
}

impl Default for AStarConfig {
    fn default() -> Self {
        AStarConfig {
            heuristic_weighting: 1.0,
            degradation: 0,
        }
    }
}

/// The statistics table of §6 for an A* run, plus the winning node (if any)
/// so a caller can reconstruct the path via [`Node::path`].
#[derive(Debug, Clone)]
pub struct AStarResult<S> {
    pub nodes_expanded: u64,
    pub nodes_generated: u64,
    pub best: Cost,
    pub open_size: usize,
    pub closed_size: usize,
    pub heuristic_weighting: f64,
    pub solution: Option<Rc<Node<S>>>,
}

impl<S> AStarResult<S> {
    pub fn is_solved(&self) -> bool {
        self.best < INFINITE_COST
    }
}

/// Uniform-cost best-first search over a single direction (§4.5).
pub struct AStarSearch<'d, D: Domain> {
    domain: &'d D,
    config: AStarConfig,
}

impl<'d, D: Domain> AStarSearch<'d, D> {
    pub fn new(domain: &'d D, config: AStarConfig) -> Self {
        AStarSearch { domain, config }
    }

    fn weighted_h(&self, raw: Cost) -> Cost {
        ((raw as f64) * self.config.heuristic_weighting).round() as Cost
    }

    pub fn search(
        &self,
        problem: &Problem<D::State>,
        heuristics: &HeuristicPair<D::State>,
    ) -> AStarResult<D::State> {
        let cache: SuccessorCache<D::State> = SuccessorCache::new();
        let mut open: OpenSet<D::State> = OpenSet::new();
        let mut closed: ClosedSet<D::State> = ClosedSet::new();

        let degradation = self.config.degradation;
        let h0 = self.weighted_h((heuristics.forward)(
            problem.initial.as_ref(),
            problem.goal.as_ref(),
            degradation,
        ));
        let root = Rc::new(Node::root(
            Rc::clone(&problem.initial),
            0,
            h0,
            Direction::Forward,
        ));
        open.append(root);

        let mut nodes_expanded: u64 = 0;
        let mut nodes_generated: u64 = 1;

        while let Some(n) = open.peek().cloned() {
            if n.get_state() == problem.goal.as_ref() {
                info!(nodes_expanded, nodes_generated, best = n.get_g(), "A* solved");
                return AStarResult {
                    nodes_expanded,
                    nodes_generated,
                    best: n.get_g(),
                    open_size: open.len(),
                    closed_size: closed.len(),
                    heuristic_weighting: self.config.heuristic_weighting,
                    solution: Some(n),
                };
            }

            open.remove(n.get_state(), Direction::Forward);
            closed.add(n.get_state(), Direction::Forward);
            nodes_expanded += 1;

            let successors = cache.get_or_compute(self.domain, n.get_state(), Direction::Forward);
            for (child, child_g) in n.expand(&successors, ExpandMode::Eager) {
                if closed.contains(&child, Direction::Forward) {
                    continue;
                }
                if let Some(existing_g) = open.get_g(&child, Direction::Forward) {
                    if child_g >= existing_g {
                        continue;
                    }
                }
                let h = self.weighted_h((heuristics.forward)(&child, problem.goal.as_ref(), degradation));
                let child_node = Rc::new(Node::child(Rc::new(child.clone()), child_g, h, Rc::clone(&n)));
                nodes_generated += 1;
                debug!(?child, child_g, h, "A* generated node");
                if open.contains(&child, Direction::Forward) {
                    open.replace(&child, Direction::Forward, child_node);
                } else {
                    open.append(child_node);
                }
            }
        }

        info!(nodes_expanded, nodes_generated, "A* exhausted open set without a solution");
        AStarResult {
            nodes_expanded,
            nodes_generated,
            best: INFINITE_COST,
            open_size: open.len(),
            closed_size: closed.len(),
            heuristic_weighting: self.config.heuristic_weighting,
            solution: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Problem;

    /// A tiny line graph 0-1-2-3-4, unit edges, used to exercise the loop
    /// without pulling in a full domain module.
    struct LineDomain;

    impl Domain for LineDomain {
        type State = i32;

        fn successors(&self, state: &i32) -> Vec<(i32, Cost)> {
            let mut out = Vec::new();
            if *state > 0 {
                out.push((state - 1, 1));
            }
            if *state < 4 {
                out.push((state + 1, 1));
            }
            out
        }

        fn heuristic(&self, name: &str) -> Option<HeuristicPair<i32>> {
            match name {
                "zero" => Some(HeuristicPair::zero()),
                "abs_diff" => {
                    let fwd: crate::search::HeuristicFn<i32> =
                        Rc::new(|s: &i32, goal: &i32, _d: Degradation| (goal - s).unsigned_abs() as Cost);
                    Some(HeuristicPair {
                        forward: Rc::clone(&fwd),
                        backward: fwd,
                    })
                }
                _ => None,
            }
        }

        fn heuristic_names(&self) -> Vec<&'static str> {
            vec!["zero", "abs_diff"]
        }
    }

    #[test]
    fn trivial_problem_expands_one_node() {
        let domain = LineDomain;
        let problem = Problem::new(2, 2, 1);
        let search = AStarSearch::new(&domain, AStarConfig::default());
        let result = search.search(&problem, &domain.heuristic("zero").unwrap());
        assert_eq!(result.best, 0);
        assert_eq!(result.nodes_expanded, 1);
        assert_eq!(result.nodes_generated, 1);
    }

    #[test]
    fn finds_optimal_cost_with_zero_heuristic() {
        let domain = LineDomain;
        let problem = Problem::new(0, 4, 1);
        let search = AStarSearch::new(&domain, AStarConfig::default());
        let result = search.search(&problem, &domain.heuristic("zero").unwrap());
        assert_eq!(result.best, 4);
        assert!(result.is_solved());
    }

    #[test]
    fn admissible_heuristic_matches_zero_heuristic_cost() {
        let domain = LineDomain;
        let problem = Problem::new(0, 4, 1);
        let search = AStarSearch::new(&domain, AStarConfig::default());
        let with_h = search.search(&problem, &domain.heuristic("abs_diff").unwrap());
        assert_eq!(with_h.best, 4);
    }

    #[test]
    fn weighted_search_never_exceeds_weight_times_optimal() {
        let domain = LineDomain;
        let problem = Problem::new(0, 4, 1);
        let base = AStarSearch::new(&domain, AStarConfig::default())
            .search(&problem, &domain.heuristic("abs_diff").unwrap());
        let weighted = AStarSearch::new(
            &domain,
            AStarConfig {
                heuristic_weighting: 2.0,
                degradation: 0,
            },
        )
        .search(&problem, &domain.heuristic("abs_diff").unwrap());
        assert!(weighted.best <= 2 * base.best);
    }

    #[test]
    fn unreachable_goal_reports_infinite_cost() {
        struct IslandDomain;
        impl Domain for IslandDomain {
            type State = i32;
            fn successors(&self, _state: &i32) -> Vec<(i32, Cost)> {
                Vec::new()
            }
            fn heuristic(&self, name: &str) -> Option<HeuristicPair<i32>> {
                (name == "zero").then(HeuristicPair::zero)
            }
            fn heuristic_names(&self) -> Vec<&'static str> {
                vec!["zero"]
            }
        }

        let domain = IslandDomain;
        let problem = Problem::new(0, 1, 1);
        let search = AStarSearch::new(&domain, AStarConfig::default());
        let result = search.search(&problem, &domain.heuristic("zero").unwrap());
        assert_eq!(result.best, INFINITE_COST);
        assert!(!result.is_solved());
    }

    // Concrete scenarios pinned against the real pancake domains, rather than
    // `LineDomain`, to exercise the domain-facing parts of the contract too.
    mod scenarios {
        use super::*;
        use crate::domains::arbitrary_pancake::ArbitraryPancakeDomain;
        use crate::domains::unit_pancake::UnitPancakeDomain;

        #[test]
        fn trivial_pancake_expands_exactly_one_node() {
            let domain = UnitPancakeDomain;
            let state = vec![3u32, 2, 1];
            let problem = Problem::new(state.clone(), state, 1);
            let search = AStarSearch::new(&domain, AStarConfig::default());
            let result = search.search(&problem, &domain.heuristic("zero").unwrap());
            assert_eq!(result.best, 0);
            assert_eq!(result.nodes_expanded, 1);
            assert_eq!(result.nodes_generated, 1);
        }

        #[test]
        fn three_pancake_unit_with_gap_heuristic_finds_the_one_flip_solution() {
            // (3,1,2) -> (3,2,1) is reachable in exactly one flip of the
            // trailing two pancakes; the base (3) is never touched.
            let domain = UnitPancakeDomain;
            let problem = Problem::new(vec![3u32, 1, 2], vec![3u32, 2, 1], 1);
            let search = AStarSearch::new(&domain, AStarConfig::default());
            let result = search.search(&problem, &domain.heuristic("gap").unwrap());
            assert_eq!(result.best, 1);
            assert!(result.is_solved());
        }

        #[test]
        fn five_pancake_arbitrary_cost_with_largest_pancake_heuristic_matches_the_pinned_optimum() {
            // initial (5,1,4,2,3) -> goal (5,4,3,2,1), base 5 fixed.
            //
            // Optimal sequence (hand-traced against the domain's flip/cost
            // rules, `cost(from, to) = n - i` for a flip keeping the first
            // `i` pancakes fixed):
            //   (5,1,4,2,3) --flip i=3, cost 2--> (5,1,4,3,2)
            //                --flip i=2, cost 3--> (5,1,2,3,4)
            //                --flip i=1, cost 4--> (5,4,3,2,1)
            // for a total of 2 + 3 + 4 = 9, confirmed optimal by exhaustive
            // shortest-path search over the 24 reachable permutations of the
            // four non-base pancakes.
            let domain = ArbitraryPancakeDomain;
            let problem = Problem::new(vec![5u32, 1, 4, 2, 3], vec![5u32, 4, 3, 2, 1], 1);
            let search = AStarSearch::new(&domain, AStarConfig::default());
            let result = search.search(&problem, &domain.heuristic("largest_pancake").unwrap());
            assert_eq!(result.best, 9);
            assert!(result.is_solved());
        }

        #[test]
        fn weighted_astar_never_exceeds_weight_times_unweighted_optimum() {
            let domain = UnitPancakeDomain;
            let problem = Problem::new(vec![5u32, 1, 4, 2, 3], vec![5u32, 4, 3, 2, 1], 1);

            let unweighted = AStarSearch::new(&domain, AStarConfig::default())
                .search(&problem, &domain.heuristic("gap").unwrap());
            let weighted = AStarSearch::new(
                &domain,
                AStarConfig {
                    heuristic_weighting: 2.0,
                    degradation: 0,
                },
            )
            .search(&problem, &domain.heuristic("gap").unwrap());

            assert!(weighted.is_solved());
            assert!(weighted.best <= 2 * unweighted.best);
        }
    }
}
