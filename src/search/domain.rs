use crate::search::Cost;
use crate::search::Degradation;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

/// A concrete problem instance: the two endpoints a search connects, plus
/// the slack `epsilon` the specification allows a bidirectional meeting
/// heuristic to be short of admissible (§3, "Problem").
#[derive(Debug, Clone)]
pub struct Problem<S> {
    pub initial: Rc<S>,
    pub goal: Rc<S>,
    pub epsilon: Cost,
}

impl<S> Problem<S> {
    pub fn new(initial: S, goal: S, epsilon: Cost) -> Self {
        Problem {
            initial: Rc::new(initial),
            goal: Rc::new(goal),
            epsilon,
        }
    }
}

/// A heuristic estimate from `state` toward `target`, parameterized by the
/// 0-10 degradation knob (§3, "Heuristic degradation"). Stored behind `Rc`
/// so both searchers and domain-supplied defaults (e.g. the zero heuristic)
/// can share one closure cheaply.
pub type HeuristicFn<S> = Rc<dyn Fn(&S, &S, Degradation) -> Cost>;

/// The pair of heuristics a bidirectional search needs: one estimating
/// distance-to-goal for forward nodes, one estimating distance-to-initial
/// for backward nodes.
#[derive(Clone)]
pub struct HeuristicPair<S> {
    pub forward: HeuristicFn<S>,
    pub backward: HeuristicFn<S>,
}

impl<S: 'static> HeuristicPair<S> {
    /// The always-admissible, always-consistent fallback every domain must
    /// be able to provide (§4.1).
    pub fn zero() -> Self {
        let zero: HeuristicFn<S> = Rc::new(|_from: &S, _to: &S, _degradation: Degradation| 0);
        HeuristicPair {
            forward: Rc::clone(&zero),
            backward: zero,
        }
    }
}

/// The contract every search domain implements (§4.1): a successor
/// generator with edge costs, and a named registry of heuristics a harness
/// can select between by name. `State` stands in for the Python original's
/// per-domain `State` namedtuples.
pub trait Domain {
    type State: Clone + Eq + Hash + Ord + Debug;

    /// All `(successor, edge_cost)` pairs reachable from `state` in one
    /// step, in a domain-chosen but stable order (successor caching and
    /// deferred expansion both depend on the order being stable across
    /// calls for the same state).
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, Cost)>;

    /// The heuristic registered under `name`, if any. Every domain must
    /// recognize at least `"zero"`.
    fn heuristic(&self, name: &str) -> Option<HeuristicPair<Self::State>>;

    /// Names of every heuristic this domain registers, for CLI/config
    /// validation and error messages.
    fn heuristic_names(&self) -> Vec<&'static str>;
}
