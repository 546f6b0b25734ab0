use crate::search::{Cost, Direction};
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Which successors `Node::expand` hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// Emit every not-yet-emitted successor in one call.
    Eager,
    /// Emit only successors whose `g` equals the node's current deferred
    /// tier (`G`); stop as soon as a successor with a larger `g` is seen,
    /// recording it as the next tier.
    Deferred,
}

/// A search record owned by the searcher, not the domain (§3). `state` is
/// reference-counted so a node can be cheaply shared as another node's
/// `parent`, forming an immutable forest rooted at the seeded initial/goal
/// nodes (see DESIGN.md, "Cyclic structure prevention").
pub struct Node<S> {
    state: Rc<S>,
    g: Cost,
    h: Cost,
    direction: Direction,
    parent: Option<Rc<Node<S>>>,
    depth: u32,
    n_expanded: Cell<usize>,
    /// The `G` field of the specification: the next g-value at which further
    /// successors would be produced under deferred expansion. `None` once
    /// the node is fully expanded.
    g_next: Cell<Option<Cost>>,
    expanded_nonce: Cell<bool>,
}

impl<S> Node<S> {
    /// Construct a root node (no parent), as used to seed an open set.
    pub fn root(state: Rc<S>, g: Cost, h: Cost, direction: Direction) -> Self {
        Node {
            state,
            g,
            h,
            direction,
            parent: None,
            depth: 0,
            n_expanded: Cell::new(0),
            g_next: Cell::new(Some(g)),
            expanded_nonce: Cell::new(false),
        }
    }

    /// Construct a node reached from `parent`.
    pub fn child(state: Rc<S>, g: Cost, h: Cost, parent: Rc<Node<S>>) -> Self {
        let direction = parent.direction;
        let depth = parent.depth + 1;
        Node {
            state,
            g,
            h,
            direction,
            parent: Some(parent),
            depth,
            n_expanded: Cell::new(0),
            g_next: Cell::new(Some(g)),
            expanded_nonce: Cell::new(false),
        }
    }

    pub fn get_state(&self) -> &S {
        &self.state
    }

    pub fn state_rc(&self) -> Rc<S> {
        Rc::clone(&self.state)
    }

    pub fn get_g(&self) -> Cost {
        self.g
    }

    pub fn get_h(&self) -> Cost {
        self.h
    }

    pub fn get_f(&self) -> Cost {
        self.g + self.h
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn get_parent(&self) -> Option<&Rc<Node<S>>> {
        self.parent.as_ref()
    }

    pub fn get_depth(&self) -> u32 {
        self.depth
    }

    pub fn get_n_expanded(&self) -> usize {
        self.n_expanded.get()
    }

    /// True iff `G` is null, i.e. every successor has already been emitted.
    pub fn is_fully_expanded(&self) -> bool {
        self.g_next.get().is_none()
    }

    pub fn has_started_expansion(&self) -> bool {
        self.n_expanded.get() > 0 || self.expanded_nonce.get()
    }

    /// Marks this node as having begun expansion during the current B# layer
    /// (the one-shot `expanded_nonce` flag of §3).
    pub fn mark_expansion_started(&self) {
        self.expanded_nonce.set(true);
    }

    /// Walks parent pointers to the root. With `reverse = false` (the
    /// default per §4.4) the chain is returned in forward order (root first,
    /// `self` last); with `reverse = true` it is left in the order it was
    /// built (`self` first, root last) — used to splice the backward
    /// segment of a B# solution without re-reversing it.
    pub fn path(&self, reverse: bool) -> Vec<(Cost, Rc<S>)> {
        let mut chain = vec![(self.g, Rc::clone(&self.state))];
        let mut cursor = self.parent.as_ref();
        while let Some(node) = cursor {
            chain.push((node.g, Rc::clone(&node.state)));
            cursor = node.parent.as_ref();
        }
        if !reverse {
            chain.reverse();
        }
        chain
    }
}

impl<S: Clone> Node<S> {
    /// Expands the node against its domain's successor list, which the
    /// caller resolves (and memoizes) separately — see
    /// [`crate::search::SuccessorCache`]. Returns `(child_state, child_g)`
    /// pairs and mutates `n_expanded`/`G` exactly as specified for the
    /// chosen mode.
    pub fn expand(&self, successors: &[(S, Cost)], mode: ExpandMode) -> Vec<(S, Cost)> {
        let already = self.n_expanded.get();
        let mut out = Vec::new();
        match mode {
            ExpandMode::Eager => {
                for (child, edge_cost) in &successors[already..] {
                    self.n_expanded.set(self.n_expanded.get() + 1);
                    out.push((child.clone(), self.g + edge_cost));
                }
                self.g_next.set(None);
            }
            ExpandMode::Deferred => {
                let tier = self
                    .g_next
                    .get()
                    .expect("Node::expand(Deferred) called on a fully expanded node");
                for (child, edge_cost) in &successors[already..] {
                    let child_g = self.g + edge_cost;
                    if child_g == tier {
                        self.n_expanded.set(self.n_expanded.get() + 1);
                        out.push((child.clone(), child_g));
                    } else {
                        self.g_next.set(Some(child_g));
                        return out;
                    }
                }
                self.g_next.set(None);
            }
        }
        out
    }
}

/// Two nodes compare equal iff their states compare equal and they share the
/// same direction — the identity used for open/closed set membership (§3).
impl<S: PartialEq> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.direction == other.direction
    }
}

impl<S: Eq> Eq for Node<S> {}

/// Hash derived from `(state, direction)`, matching `PartialEq`.
impl<S: Hash> Hash for Node<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
        self.direction.hash(state);
    }
}

/// Ordering is by `f` ascending (tie-break arbitrary but stable).
impl<S> PartialOrd for Node<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Node<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get_f().cmp(&other.get_f())
    }
}

impl<S: fmt::Debug> fmt::Debug for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("state", &self.state)
            .field("g", &self.g)
            .field("h", &self.h)
            .field("f", &self.get_f())
            .field("direction", &self.direction)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_is_g_plus_h() {
        let node = Node::root(Rc::new(42u32), 3, 4, Direction::Forward);
        assert_eq!(node.get_f(), 7);
    }

    #[test]
    fn equality_ignores_g_h_but_not_direction() {
        let a = Node::root(Rc::new(1u32), 3, 4, Direction::Forward);
        let b = Node::root(Rc::new(1u32), 99, 0, Direction::Forward);
        let c = Node::root(Rc::new(1u32), 3, 4, Direction::Backward);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn root_has_depth_zero_and_child_increments() {
        let root = Rc::new(Node::root(Rc::new(1u32), 0, 0, Direction::Forward));
        let child = Node::child(Rc::new(2u32), 1, 0, Rc::clone(&root));
        assert_eq!(root.get_depth(), 0);
        assert_eq!(child.get_depth(), 1);
    }

    #[test]
    fn path_default_is_root_to_self() {
        let root = Rc::new(Node::root(Rc::new(0u32), 0, 0, Direction::Forward));
        let mid = Rc::new(Node::child(Rc::new(1u32), 1, 0, Rc::clone(&root)));
        let leaf = Node::child(Rc::new(2u32), 2, 0, Rc::clone(&mid));

        let forward = leaf.path(false);
        let states: Vec<u32> = forward.iter().map(|(_, s)| **s).collect();
        assert_eq!(states, vec![0, 1, 2]);

        let unreversed = leaf.path(true);
        let states: Vec<u32> = unreversed.iter().map(|(_, s)| **s).collect();
        assert_eq!(states, vec![2, 1, 0]);
    }

    #[test]
    fn eager_expand_drains_all_successors_and_closes_g() {
        let node = Node::root(Rc::new(0u32), 10, 0, Direction::Forward);
        let successors = vec![(1u32, 1i64), (2u32, 2i64)];
        let out = node.expand(&successors, ExpandMode::Eager);
        assert_eq!(out, vec![(1u32, 11i64), (2u32, 12i64)]);
        assert!(node.is_fully_expanded());
        assert_eq!(node.get_n_expanded(), 2);
    }

    #[test]
    fn deferred_expand_stops_at_next_tier() {
        let node = Node::root(Rc::new(0u32), 0, 0, Direction::Forward);
        let successors = vec![(1u32, 1i64), (2u32, 1i64), (3u32, 2i64)];
        let first = node.expand(&successors, ExpandMode::Deferred);
        assert_eq!(first, vec![(1u32, 1i64), (2u32, 1i64)]);
        assert!(!node.is_fully_expanded());
        assert_eq!(node.get_n_expanded(), 2);

        let second = node.expand(&successors, ExpandMode::Deferred);
        assert_eq!(second, vec![(3u32, 2i64)]);
        assert!(node.is_fully_expanded());
    }
}
