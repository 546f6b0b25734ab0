//! Configuration file parsing (§6, §7): the `[settings]`/`[searchers.*]` TOML
//! document the harness binary reads, and the typed errors surfaced when it
//! or a problem file is malformed.

use crate::domains::DomainName;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Failures that stop the harness before any search begins (§7,
/// "Configuration error"): missing required fields, malformed TOML, or a
/// domain/searcher name the binary doesn't recognize.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown domain {0:?}")]
    UnknownDomain(String),
    #[error("unknown searcher kind {0:?} (expected \"astar\" or \"bsharp\")")]
    UnknownSearcherKind(String),
    #[error("searcher {name:?} is missing required field {field:?}")]
    MissingField { name: String, field: &'static str },
}

/// Failures parsing a single problem file or instance list (§7, "Problem
/// parsing error"): the harness skips the offending problem and continues
/// with the rest.
#[derive(Debug, thiserror::Error)]
pub enum ProblemParseError {
    #[error("malformed problem data: {0}")]
    Malformed(String),
}

/// The `[settings]` table (§6): the domain to search plus the common
/// problem-generation knobs every domain's `generate_problems` reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub domain: String,
    pub heuristic: Option<String>,
    pub precompiled: Option<Vec<String>>,
    pub n_problems: Option<usize>,
    pub param: Option<usize>,
    pub seed: Option<u64>,
}

impl Settings {
    /// The domain name, validated against the registry (§7,
    /// "unknown domain/searcher name").
    pub fn domain_name(&self) -> Result<DomainName, ConfigError> {
        self.domain
            .parse()
            .map_err(|_| ConfigError::UnknownDomain(self.domain.clone()))
    }

    /// A `rand::SmallRng` seeded from `seed`, or from entropy if absent, for
    /// reproducible random problem generation (§9b).
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

/// Degradation may be configured as a single value or a list to sweep over
/// several runs of the same searcher (§6, "degradation (int or list)").
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DegradationSetting {
    Single(u8),
    Sweep(Vec<u8>),
}

impl DegradationSetting {
    pub fn values(&self) -> Vec<u8> {
        match self {
            DegradationSetting::Single(d) => vec![*d],
            DegradationSetting::Sweep(ds) => ds.clone(),
        }
    }
}

/// The kind of searcher a `[searchers.<name>]` table selects (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearcherKind {
    AStar,
    BSharp,
}

/// One `[searchers.<name>]` table (§6): the table name becomes `name`, the
/// remaining keys configure which searcher runs and how.
#[derive(Debug, Clone)]
pub struct SearcherConfig {
    pub name: String,
    pub kind: SearcherKind,
    pub heuristic: String,
    pub degradation: DegradationSetting,
    pub heuristic_weighting: f64,
    pub split: f64,
}

#[derive(Debug, Deserialize)]
struct RawSearcherConfig {
    searcher: String,
    heuristic: String,
    degradation: DegradationSetting,
    #[serde(default)]
    heuristic_weighting: Option<f64>,
    #[serde(default)]
    split: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    settings: Settings,
    searchers: BTreeMap<String, RawSearcherConfig>,
}

/// A fully parsed and validated configuration: the problem settings plus
/// every configured searcher, in the order TOML's table map yields them.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub searchers: Vec<SearcherConfig>,
}

impl Config {
    /// Reads and validates a configuration file from disk.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a configuration document already in memory.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        raw.settings.domain_name()?;

        let mut searchers = Vec::with_capacity(raw.searchers.len());
        for (name, raw_searcher) in raw.searchers {
            let kind = match raw_searcher.searcher.as_str() {
                "astar" => SearcherKind::AStar,
                "bsharp" => SearcherKind::BSharp,
                other => return Err(ConfigError::UnknownSearcherKind(other.to_string())),
            };
            if kind == SearcherKind::BSharp && raw_searcher.split.is_none() {
                return Err(ConfigError::MissingField {
                    name: name.clone(),
                    field: "split",
                });
            }
            searchers.push(SearcherConfig {
                name,
                kind,
                heuristic: raw_searcher.heuristic,
                degradation: raw_searcher.degradation,
                heuristic_weighting: raw_searcher.heuristic_weighting.unwrap_or(1.0),
                split: raw_searcher.split.unwrap_or(0.5),
            });
        }

        Ok(Config {
            settings: raw.settings,
            searchers,
        })
    }
}
