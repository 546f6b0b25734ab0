//! The search engine core: nodes, frontiers, the domain contract, and the
//! two searchers (A* and the B#-style bidirectional layered search).

mod astar;
mod bsharp;
mod closed_set;
mod direction;
mod domain;
mod node;
mod open_set;
mod successor_cache;
mod verbosity;

pub use astar::{AStarConfig, AStarResult, AStarSearch};
pub use bsharp::{BSharpConfig, BSharpResult, BSharpSearch};
pub use closed_set::ClosedSet;
pub use direction::Direction;
pub use domain::{Domain, HeuristicFn, HeuristicPair, Problem};
pub use node::{ExpandMode, Node};
pub use open_set::OpenSet;
pub use successor_cache::SuccessorCache;
pub use verbosity::Verbosity;

/// The common currency of the search core: edge costs, `g`/`h`/`f` values,
/// and the cost limits `fLim`/`gLim`. All costs in this engine are integral
/// (see §3 of the specification); `Cost::MAX` stands in for +∞.
pub type Cost = i64;

/// Sentinel standing in for the "no solution" / "+∞" cost.
pub const INFINITE_COST: Cost = Cost::MAX;

/// Degradation knob interpreted by each heuristic: 0 is unchanged, 10 is the
/// most relaxed.
pub type Degradation = u8;
