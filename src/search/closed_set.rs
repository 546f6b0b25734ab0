use crate::search::Direction;
use std::collections::HashSet;

/// The set of states a searcher has finished expanding, per direction
/// (§4.3). Membership is by `(state, direction)`, matching `Node` identity.
pub struct ClosedSet<S: Eq + std::hash::Hash> {
    states: HashSet<(S, Direction)>,
}

impl<S: Eq + std::hash::Hash + Clone> ClosedSet<S> {
    pub fn new() -> Self {
        ClosedSet {
            states: HashSet::new(),
        }
    }

    pub fn add(&mut self, state: &S, direction: Direction) -> bool {
        self.states.insert((state.clone(), direction))
    }

    pub fn remove(&mut self, state: &S, direction: Direction) -> bool {
        self.states.remove(&(state.clone(), direction))
    }

    pub fn contains(&self, state: &S, direction: Direction) -> bool {
        self.states.contains(&(state.clone(), direction))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(S, Direction)> {
        self.states.iter()
    }
}

impl<S: Eq + std::hash::Hash + Clone> Default for ClosedSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_contains_remove_round_trip() {
        let mut closed: ClosedSet<u32> = ClosedSet::new();
        assert!(!closed.contains(&1, Direction::Forward));
        assert!(closed.add(&1, Direction::Forward));
        assert!(closed.contains(&1, Direction::Forward));
        assert!(!closed.contains(&1, Direction::Backward));

        assert!(closed.remove(&1, Direction::Forward));
        assert!(!closed.contains(&1, Direction::Forward));
    }

    #[test]
    fn add_is_idempotent() {
        let mut closed: ClosedSet<u32> = ClosedSet::new();
        assert!(closed.add(&1, Direction::Forward));
        assert!(!closed.add(&1, Direction::Forward));
        assert_eq!(closed.len(), 1);
    }
}
