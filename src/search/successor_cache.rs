use crate::search::{Cost, Direction, Domain};
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Memoizes a domain's successor generation per state (§9, "Memoized
/// successor enumeration"). The Python original cached this per-state on
/// the state object itself; here the cache lives alongside the domain and
/// is shared via `Rc` so every node referencing the same state reuses one
/// computed, cost-sorted successor list instead of recomputing or storing
/// it redundantly.
///
/// Keyed by `(state, direction)` rather than bare `state`: most domains'
/// successors are direction-independent, but a domain is free to fold the
/// search direction into its own state representation (the TSP domain does,
/// see `domains::tsp`) and compute a different successor set for the same
/// state value depending which frontier produced it. Keying on direction
/// too keeps that safe without forcing every other domain to care.
pub struct SuccessorCache<S: Eq + Hash + Clone> {
    cache: RefCell<HashMap<(S, Direction), Rc<Vec<(S, Cost)>>>>,
}

impl<S: Eq + Hash + Clone> SuccessorCache<S> {
    pub fn new() -> Self {
        SuccessorCache {
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the cost-sorted successor list for `state` under `direction`,
    /// computing and memoizing it via `domain` on first access.
    pub fn get_or_compute<D>(&self, domain: &D, state: &S, direction: Direction) -> Rc<Vec<(S, Cost)>>
    where
        D: Domain<State = S>,
    {
        let key = (state.clone(), direction);
        if let Some(hit) = self.cache.borrow().get(&key) {
            return Rc::clone(hit);
        }
        let mut successors = domain.successors(state);
        successors.sort_by_key(|(_, cost)| *cost);
        let entry = Rc::new(successors);
        self.cache.borrow_mut().insert(key, Rc::clone(&entry));
        entry
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

impl<S: Eq + Hash + Clone> Default for SuccessorCache<S> {
    fn default() -> Self {
        Self::new()
    }
}
