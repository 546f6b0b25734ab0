//! The three problem domains wired into the experiment harness (§1): unit-
//! and arbitrary-cost pancake flipping, and the travelling salesman problem.
//! Each is a [`crate::search::Domain`] implementation plus the problem-file
//! parsing and random-instance generation §6/§9b ask for.

pub mod arbitrary_pancake;
pub mod tsp;
pub mod unit_pancake;

use crate::config::{ProblemParseError, Settings};
use crate::search::Problem;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::fs;

pub use arbitrary_pancake::ArbitraryPancakeDomain;
pub use tsp::TspDomain;
pub use unit_pancake::UnitPancakeDomain;

/// Registry name for a domain, selected by the config's `domain` key (§6).
/// Mirrors the teacher's `clap::ValueEnum`-backed name registries (§9,
/// "Dynamic domain dispatch").
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DomainName {
    UnitPancake,
    ArbitraryPancake,
    Tsp,
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DomainName::UnitPancake => "unit_pancake",
            DomainName::ArbitraryPancake => "arbitrary_pancake",
            DomainName::Tsp => "tsp",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for DomainName {
    type Err = ProblemParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unit_pancake" => Ok(DomainName::UnitPancake),
            "arbitrary_pancake" => Ok(DomainName::ArbitraryPancake),
            "tsp" => Ok(DomainName::Tsp),
            other => Err(ProblemParseError::Malformed(format!("unknown domain {other:?}"))),
        }
    }
}

/// Generates a pancake problem set from `settings` (§4.1, `generate_problems`
/// §9b): either the precompiled files it names, or `n_problems` random
/// shuffles of size `param` seeded by `settings.seed`.
pub fn generate_pancake_problems(
    settings: &Settings,
    arbitrary: bool,
) -> Result<Vec<Problem<Vec<u32>>>, ProblemParseError> {
    let mut problems = Vec::new();
    if let Some(paths) = &settings.precompiled {
        for path in paths {
            let text = fs::read_to_string(path)
                .map_err(|e| ProblemParseError::Malformed(format!("reading {path:?}: {e}")))?;
            for line in text.lines().filter(|l| !l.trim().is_empty()) {
                let (initial, goal) = if arbitrary {
                    arbitrary_pancake::parse_problem_line(line)?
                } else {
                    unit_pancake::parse_problem_line(line)?
                };
                problems.push(Problem::new(initial, goal, 1));
            }
        }
        return Ok(problems);
    }

    let n_problems = settings
        .n_problems
        .ok_or_else(|| ProblemParseError::Malformed("n_problems required without precompiled".into()))?;
    let param = settings
        .param
        .ok_or_else(|| ProblemParseError::Malformed("param required without precompiled".into()))?;
    let mut rng = settings.rng();
    for _ in 0..n_problems {
        let mut rest: Vec<u32> = (1..param as u32).collect();
        rest.shuffle(&mut rng);
        let mut initial = vec![param as u32];
        initial.extend(rest);
        let mut goal = initial.clone();
        goal.sort_unstable_by(|a, b| b.cmp(a));
        problems.push(Problem::new(initial, goal, 1));
    }
    Ok(problems)
}

/// Generates a TSP problem set (§9b): either the precompiled instance files
/// it names, or `n_problems` random instances of `param` cities uniformly
/// sampled in `[0, 1000]^2`.
pub fn generate_tsp_problems(settings: &Settings) -> Result<Vec<(TspDomain, Problem<tsp::TspState>)>, ProblemParseError> {
    let mut out = Vec::new();
    if let Some(paths) = &settings.precompiled {
        for path in paths {
            let text = fs::read_to_string(path)
                .map_err(|e| ProblemParseError::Malformed(format!("reading {path:?}: {e}")))?;
            let joined = text.lines().collect::<Vec<_>>().join(",");
            out.push(build_tsp_instance(tsp::parse_problem_text(&joined)?));
        }
        return Ok(out);
    }

    let n_problems = settings
        .n_problems
        .ok_or_else(|| ProblemParseError::Malformed("n_problems required without precompiled".into()))?;
    let param = settings
        .param
        .ok_or_else(|| ProblemParseError::Malformed("param required without precompiled".into()))?;
    let mut rng = settings.rng();
    for _ in 0..n_problems {
        let cities = (0..param)
            .map(|_| tsp::Point {
                x: (rng.gen_range(0.0..1000.0) * 1000.0).round() / 1000.0,
                y: (rng.gen_range(0.0..1000.0) * 1000.0).round() / 1000.0,
            })
            .collect::<Vec<_>>();
        out.push(build_tsp_instance(cities));
    }
    Ok(out)
}

fn build_tsp_instance(cities: Vec<tsp::Point>) -> (TspDomain, Problem<tsp::TspState>) {
    let domain = TspDomain::new(cities);
    let epsilon = domain.epsilon();
    let initial = domain.initial_state();
    let goal = domain.goal_state();
    (domain, Problem::new(initial, goal, epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_name_round_trips_through_display_and_parse() {
        use std::str::FromStr;
        for name in [DomainName::UnitPancake, DomainName::ArbitraryPancake, DomainName::Tsp] {
            assert_eq!(DomainName::from_str(&name.to_string()).unwrap(), name);
        }
    }

    #[test]
    fn unknown_domain_name_is_a_parse_error() {
        use std::str::FromStr;
        assert!(DomainName::from_str("nonexistent").is_err());
    }

    #[test]
    fn random_pancake_generation_respects_n_problems_and_param() {
        let settings = Settings {
            domain: "unit_pancake".into(),
            heuristic: None,
            precompiled: None,
            n_problems: Some(3),
            param: Some(6),
            seed: Some(42),
        };
        let problems = generate_pancake_problems(&settings, false).unwrap();
        assert_eq!(problems.len(), 3);
        for p in &problems {
            assert_eq!(p.initial.len(), 6);
            assert_eq!(p.initial[0], 6);
            assert_eq!(*p.goal, vec![6, 5, 4, 3, 2, 1]);
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_random_instances() {
        let settings = Settings {
            domain: "unit_pancake".into(),
            heuristic: None,
            precompiled: None,
            n_problems: Some(2),
            param: Some(7),
            seed: Some(7),
        };
        let a = generate_pancake_problems(&settings, false).unwrap();
        let b = generate_pancake_problems(&settings, false).unwrap();
        assert_eq!(
            a.iter().map(|p| p.initial.clone()).collect::<Vec<_>>(),
            b.iter().map(|p| p.initial.clone()).collect::<Vec<_>>()
        );
    }
}
