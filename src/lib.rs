#![warn(missing_debug_implementations)]
#![deny(non_ascii_idents)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unit_bindings)]
#![warn(unused_qualifications)]

// Used by the `experiment` binary but not the library itself. Cargo has no
// way to scope a dependency to a single binary target yet.
use tracing_subscriber as _;

pub mod config;
pub mod domains;
pub mod search;
pub mod stats;
