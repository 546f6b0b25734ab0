use crate::search::{ClosedSet, Cost, Degradation, Direction, Domain, ExpandMode, HeuristicPair};
use crate::search::{Node, OpenSet, Problem, SuccessorCache, INFINITE_COST};
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::info;

/// Settings for a single B# run (§4.6). `split` is the configured
/// forward-share ratio consumed by `split_fn`.
#[derive(Debug, Clone)]
pub struct BSharpConfig {
    pub split: f64,
    pub degradation: Degradation,
}

impl Default for BSharpConfig {
    fn default() -> Self {
        BSharpConfig {
            split: 0.5,
            degradation: 0,
        }
    }
}

/// The statistics table of §6 for a B# run, plus the spliced solution path
/// (forward segment, the shared meeting state once, reverse backward
/// segment) when one was found.
#[derive(Debug, Clone)]
pub struct BSharpResult<S> {
    pub initial_state: Rc<S>,
    pub nodes_expanded: u64,
    pub nodes_generated: u64,
    pub attempted_expansions: u64,
    pub open_size_forward: usize,
    pub open_size_backward: usize,
    pub closed_size_forward: usize,
    pub closed_size_backward: usize,
    pub best: Cost,
    pub solution: Option<Vec<(Cost, Rc<S>)>>,
}

impl<S> BSharpResult<S> {
    pub fn is_solved(&self) -> bool {
        self.best < INFINITE_COST
    }
}

struct GLim {
    forward: Cost,
    backward: Cost,
}

impl GLim {
    fn get(&self, d: Direction) -> Cost {
        match d {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
        }
    }
}

/// Bidirectional layered search under joint cost limits (§4.6), meeting in
/// the middle with a proven-optimal cost.
pub struct BSharpSearch<'d, D: Domain> {
    domain: &'d D,
    config: BSharpConfig,
}

impl<'d, D: Domain> BSharpSearch<'d, D> {
    pub fn new(domain: &'d D, config: BSharpConfig) -> Self {
        BSharpSearch { domain, config }
    }

    /// Advances `gLim[+1]`/`gLim[-1]` one unit at a time until their sum
    /// equals `target`, favoring whichever direction is currently under its
    /// configured share.
    fn split_fn(&self, g_lim: &mut GLim, target: Cost) {
        while g_lim.forward + g_lim.backward < target {
            let ratio = if target == 0 {
                0.0
            } else {
                g_lim.forward as f64 / target as f64
            };
            if ratio < self.config.split {
                g_lim.forward += 1;
            } else {
                g_lim.backward += 1;
            }
        }
    }

    fn heuristic_for(
        heuristics: &HeuristicPair<D::State>,
        d: Direction,
    ) -> &crate::search::HeuristicFn<D::State> {
        match d {
            Direction::Forward => &heuristics.forward,
            Direction::Backward => &heuristics.backward,
        }
    }

    pub fn search(
        &self,
        problem: &Problem<D::State>,
        heuristics: &HeuristicPair<D::State>,
    ) -> BSharpResult<D::State> {
        let degradation = self.config.degradation;
        let cache: SuccessorCache<D::State> = SuccessorCache::new();
        let mut open: OpenSet<D::State> = OpenSet::new();
        let mut closed: ClosedSet<D::State> = ClosedSet::new();

        let h_fwd_root = (heuristics.forward)(problem.initial.as_ref(), problem.goal.as_ref(), degradation);
        let h_bwd_root = (heuristics.backward)(problem.goal.as_ref(), problem.initial.as_ref(), degradation);

        let forward_root = Rc::new(Node::root(
            Rc::clone(&problem.initial),
            0,
            h_fwd_root,
            Direction::Forward,
        ));
        let backward_root = Rc::new(Node::root(
            Rc::clone(&problem.goal),
            0,
            h_bwd_root,
            Direction::Backward,
        ));

        let mut nodes_generated: u64 = 2;
        let mut nodes_expanded: u64 = 0;
        let mut attempted_expansions: u64 = 0;
        let mut best: Cost = INFINITE_COST;
        let mut collision_nodes: Option<(Rc<Node<D::State>>, Rc<Node<D::State>>)> = None;

        open.append(Rc::clone(&forward_root));
        open.append(Rc::clone(&backward_root));

        // Edge case: initial == goal. `fLim >= epsilon > 0` always, so
        // `best == fLim` can never trigger the ordinary termination check
        // for a solution of cost 0 — detect the collision during seeding
        // and return immediately instead of entering the main loop (§4.6
        // "Trivial problem").
        if *problem.initial == *problem.goal {
            best = 0;
            collision_nodes = Some((Rc::clone(&forward_root), Rc::clone(&backward_root)));
            let solution = collision_nodes.map(|(fwd, bwd)| {
                let mut path = fwd.path(false);
                let bwd_chain = bwd.path(true);
                path.extend(bwd_chain.into_iter().skip(1));
                path
            });
            return BSharpResult {
                initial_state: Rc::clone(&problem.initial),
                nodes_expanded,
                nodes_generated,
                attempted_expansions,
                open_size_forward: 1,
                open_size_backward: 1,
                closed_size_forward: 0,
                closed_size_backward: 0,
                best,
                solution,
            };
        }

        let mut f_lim: Cost = h_fwd_root.max(h_bwd_root).max(problem.epsilon);
        let mut g_lim = GLim {
            forward: 0,
            backward: 0,
        };

        'outer: while !open.is_empty() {
            if best == f_lim {
                break;
            }

            self.split_fn(&mut g_lim, f_lim - problem.epsilon + 1);

            let mut worklist: VecDeque<Rc<Node<D::State>>> = open
                .iter()
                .filter(|n| n.get_f() <= f_lim && n.get_g() < g_lim.get(n.get_direction()))
                .cloned()
                .collect();

            'layer: while let Some(n) = worklist.pop_front() {
                let d = n.get_direction();
                if closed.contains(n.get_state(), d) {
                    // Reopened and re-expanded elsewhere in this layer already.
                    continue 'layer;
                }
                match open.get(n.get_state(), d) {
                    // A cheaper path to this state was generated elsewhere in
                    // the layer after `n` was queued; `n` is a stale handle
                    // that no longer owns the open entry for its state, so
                    // expanding it would remove and close the *replacement*
                    // node instead of itself.
                    Some(current) if Rc::ptr_eq(current, &n) => {}
                    _ => continue 'layer,
                }

                if !n.has_started_expansion() {
                    n.mark_expansion_started();
                    attempted_expansions += 1;
                }

                let successors = cache.get_or_compute(self.domain, n.get_state(), d);
                let heuristic = Self::heuristic_for(heuristics, d);
                let pivot: &D::State = match d {
                    Direction::Forward => problem.goal.as_ref(),
                    Direction::Backward => problem.initial.as_ref(),
                };

                for (child_state, child_g) in n.expand(&successors, ExpandMode::Eager) {
                    if closed.contains(&child_state, d) {
                        continue;
                    }
                    if let Some(existing_g) = open.get_g(&child_state, d) {
                        if child_g >= existing_g {
                            continue;
                        }
                    }

                    if open.contains(&child_state, d) {
                        open.remove(&child_state, d);
                    }
                    if closed.contains(&child_state, d) {
                        closed.remove(&child_state, d);
                    }

                    let h = heuristic(&child_state, pivot, degradation);
                    let child_node = Rc::new(Node::child(
                        Rc::new(child_state.clone()),
                        child_g,
                        h,
                        Rc::clone(&n),
                    ));
                    nodes_generated += 1;
                    open.append(Rc::clone(&child_node));

                    if child_node.get_g() < g_lim.get(d) && child_node.get_f() <= f_lim {
                        worklist.push_back(Rc::clone(&child_node));
                    }

                    let opposite = d.opposite();
                    if let Some(other_g) = open.get_g(&child_state, opposite) {
                        let candidate = child_g + other_g;
                        if candidate < best {
                            best = candidate;
                            let other_node = open
                                .get(&child_state, opposite)
                                .expect("just checked open.get_g for this key")
                                .clone();
                            collision_nodes = Some(match d {
                                Direction::Forward => (Rc::clone(&child_node), other_node),
                                Direction::Backward => (other_node, Rc::clone(&child_node)),
                            });
                        }
                        if best <= f_lim {
                            break 'layer;
                        }
                    }
                }

                if n.is_fully_expanded() {
                    open.remove(n.get_state(), d);
                    closed.add(n.get_state(), d);
                    nodes_expanded += 1;
                }
            }

            if best == f_lim {
                break 'outer;
            }
            f_lim += 1;
        }

        info!(
            f_lim,
            best,
            nodes_expanded,
            nodes_generated,
            attempted_expansions,
            "B# terminated"
        );

        let solution = collision_nodes.map(|(fwd, bwd)| {
            let mut path = fwd.path(false);
            let bwd_chain = bwd.path(true);
            path.extend(bwd_chain.into_iter().skip(1));
            path
        });

        BSharpResult {
            initial_state: Rc::clone(&problem.initial),
            nodes_expanded,
            nodes_generated,
            attempted_expansions,
            open_size_forward: open.iter().filter(|n| n.get_direction() == Direction::Forward).count(),
            open_size_backward: open.iter().filter(|n| n.get_direction() == Direction::Backward).count(),
            closed_size_forward: closed
                .iter()
                .filter(|(_, d)| *d == Direction::Forward)
                .count(),
            closed_size_backward: closed
                .iter()
                .filter(|(_, d)| *d == Direction::Backward)
                .count(),
            best,
            solution,
        }
    }
}
