//! Travelling salesman, built so the forward and backward searches meet in
//! the middle on a shared tour (`original_source/src/search/domains/
//! tsp.py`). A state is one slot per city (the start city appears twice, at
//! the front and the back) labelled `+1`/`-1`/`0`: `0` marks the current
//! city, and whichever of `+1`/`-1` means "already placed" depends on which
//! end built the state — tracked by the state's own `direction`, which
//! mirrors (but is independent of) the search engine's direction.
//!
//! `direction` is deliberately excluded from `PartialEq`/`Hash`/`Ord`: a
//! forward-built and a backward-built state with the same label vector
//! *are* the same tour-in-progress, and the bidirectional searcher relies on
//! that to detect a meeting (§4.6). [`crate::search::SuccessorCache`] keys
//! its memoization on `(state, Direction)` for exactly this reason — two
//! direction-tagged states that compare equal can still need different
//! successor sets.

use crate::search::{Cost, Degradation, Domain, HeuristicFn, HeuristicPair};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A partially-built tour: one label per slot, plus the direction that grew
/// it (excluded from identity — see module docs).
#[derive(Debug, Clone)]
pub struct TspState {
    labels: Vec<i8>,
    direction: i8,
}

impl TspState {
    fn slot_city(slot: usize, n_cities: usize) -> usize {
        if slot == 0 || slot == n_cities {
            0
        } else {
            slot
        }
    }
}

impl PartialEq for TspState {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for TspState {}

impl Hash for TspState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.labels.hash(state);
    }
}

impl PartialOrd for TspState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TspState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.labels.cmp(&other.labels)
    }
}

#[derive(Debug, Clone)]
pub struct TspDomain {
    cities: Vec<Point>,
}

impl TspDomain {
    pub fn new(cities: Vec<Point>) -> Self {
        TspDomain { cities }
    }

    pub fn epsilon(&self) -> Cost {
        let mut min = Cost::MAX;
        for i in 0..self.cities.len() {
            for j in 0..self.cities.len() {
                if i != j {
                    min = min.min(dist(self.cities[i], self.cities[j]));
                }
            }
        }
        min
    }

    /// The root state for forward search: every non-start city unplaced
    /// (`-1`), start city current (`0`) at the front and unplaced (`-1`) at
    /// the duplicated back slot.
    pub fn initial_state(&self) -> TspState {
        let n = self.cities.len();
        let mut labels = vec![-1i8; n + 1];
        labels[0] = 0;
        TspState { labels, direction: 1 }
    }

    /// The root state for backward search: every city already placed (`1`),
    /// current (`0`) at the duplicated back slot.
    pub fn goal_state(&self) -> TspState {
        let n = self.cities.len();
        let mut labels = vec![1i8; n + 1];
        labels[n] = 0;
        TspState { labels, direction: -1 }
    }

    fn current_slot(state: &TspState) -> usize {
        state
            .labels
            .iter()
            .position(|&l| l == 0)
            .expect("TSP state always has exactly one current slot")
    }

    fn city_point(&self, slot: usize) -> Point {
        self.cities[TspState::slot_city(slot, self.cities.len())]
    }
}

fn dist(a: Point, b: Point) -> Cost {
    (((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()).ceil() as Cost
}

impl Domain for TspDomain {
    type State = TspState;

    fn successors(&self, state: &TspState) -> Vec<(TspState, Cost)> {
        let current_slot = Self::current_slot(state);
        let current_point = self.city_point(current_slot);
        let eligible_label = -state.direction;

        let mut out = Vec::new();
        for (slot, &label) in state.labels.iter().enumerate() {
            if label == eligible_label {
                let mut labels = state.labels.clone();
                labels[current_slot] = state.direction;
                labels[slot] = 0;
                let child = TspState {
                    labels,
                    direction: state.direction,
                };
                let edge_cost = dist(current_point, self.city_point(slot));
                out.push((child, edge_cost));
            }
        }
        out
    }

    fn heuristic(&self, name: &str) -> Option<HeuristicPair<TspState>> {
        match name {
            "zero" => Some(HeuristicPair::zero()),
            "edges_in" => {
                // Capturing `self` by raw pointer would be unsound once the
                // domain moves; instead the closures borrow the city list by
                // value, matching `statics` being domain-owned (see
                // DESIGN.md).
                let cities = self.cities.clone();
                let fw: HeuristicFn<TspState> = Rc::new(move |s: &TspState, _goal: &TspState, _d: Degradation| {
                    edges_in_heuristic(s, &cities, -1)
                });
                let cities = self.cities.clone();
                let bw: HeuristicFn<TspState> = Rc::new(move |s: &TspState, _goal: &TspState, _d: Degradation| {
                    edges_in_heuristic(s, &cities, 1)
                });
                Some(HeuristicPair { forward: fw, backward: bw })
            }
            _ => None,
        }
    }

    fn heuristic_names(&self) -> Vec<&'static str> {
        vec!["zero", "edges_in"]
    }
}

/// Sum of each not-yet-settled-in-`direction` city's minimum incident edge
/// (`original_source`'s `edges_in_heuristic_{fw,bw}`): a lower bound on the
/// remaining cost to settle every such city.
fn edges_in_heuristic(state: &TspState, cities: &[Point], unsettled_label: i8) -> Cost {
    let mut h = 0;
    for (slot, &label) in state.labels.iter().enumerate() {
        if label == unsettled_label {
            let city_idx = TspState::slot_city(slot, cities.len());
            let min_edge = (0..cities.len())
                .filter(|&j| j != city_idx)
                .map(|j| dist(cities[city_idx], cities[j]))
                .min()
                .unwrap_or(0);
            h += min_edge;
        }
    }
    h
}

/// Parses comma-separated `x y` city coordinates, the first being the start
/// (§6, "Problem file").
pub fn parse_problem_text(text: &str) -> Result<Vec<Point>, crate::config::ProblemParseError> {
    let mut cities = Vec::new();
    for coords in text.split(',') {
        let coords = coords.trim();
        if coords.is_empty() {
            continue;
        }
        let mut parts = coords.split_whitespace();
        let x = parts
            .next()
            .ok_or_else(|| crate::config::ProblemParseError::Malformed(format!("missing x in {coords:?}")))?
            .parse::<f64>()
            .map_err(|_| crate::config::ProblemParseError::Malformed(format!("bad x in {coords:?}")))?;
        let y = parts
            .next()
            .ok_or_else(|| crate::config::ProblemParseError::Malformed(format!("missing y in {coords:?}")))?
            .parse::<f64>()
            .map_err(|_| crate::config::ProblemParseError::Malformed(format!("bad y in {coords:?}")))?;
        if parts.next().is_some() {
            return Err(crate::config::ProblemParseError::Malformed(format!(
                "too many fields in {coords:?}"
            )));
        }
        cities.push(Point { x, y });
    }
    if cities.len() < 2 {
        return Err(crate::config::ProblemParseError::Malformed(
            "TSP instance needs at least 2 cities".into(),
        ));
    }
    Ok(cities)
}
