use bsharp_search::config::{Config, SearcherKind};
use bsharp_search::domains::{self, DomainName};
use bsharp_search::search::{
    AStarConfig, AStarSearch, BSharpConfig, BSharpSearch, Domain, HeuristicPair, Problem, Verbosity,
};
use bsharp_search::stats::{write_json, AStarStats, BSharpStats};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version)]
/// Run a batch of A* / B# searches over one configured domain.
struct Args {
    #[arg(help = "The TOML configuration file (settings + searchers)")]
    config: PathBuf,
    #[arg(
        help = "Directory to write per-run JSON statistics into",
        short = 'o',
        long = "output",
        id = "OUTPUT",
        default_value = "."
    )]
    output_dir: PathBuf,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
}

fn main() {
    let args = Args::parse();

    let level: tracing::Level = args.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match Config::from_path(&args.config) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = std::fs::create_dir_all(&args.output_dir) {
        tracing::error!(%err, "failed to create output directory");
        std::process::exit(1);
    }

    let domain_name = config
        .settings
        .domain_name()
        .expect("Config::from_toml_str already validated the domain name");

    match domain_name {
        DomainName::UnitPancake => {
            let domain = domains::UnitPancakeDomain;
            match domains::generate_pancake_problems(&config.settings, false) {
                Ok(problems) => run_all(&domain, &problems, &config, &args.output_dir),
                Err(err) => tracing::error!(%err, "failed to generate pancake problems"),
            }
        }
        DomainName::ArbitraryPancake => {
            let domain = domains::ArbitraryPancakeDomain;
            match domains::generate_pancake_problems(&config.settings, true) {
                Ok(problems) => run_all(&domain, &problems, &config, &args.output_dir),
                Err(err) => tracing::error!(%err, "failed to generate pancake problems"),
            }
        }
        DomainName::Tsp => match domains::generate_tsp_problems(&config.settings) {
            Ok(instances) => {
                for (problem_idx, (domain, problem)) in instances.iter().enumerate() {
                    run_problem(domain, problem, problem_idx, &config, &args.output_dir);
                }
            }
            Err(err) => tracing::error!(%err, "failed to generate TSP problems"),
        },
    }
}

/// Runs every configured searcher over every generated problem for domains
/// whose [`Domain`] instance is the same for all problems (the pancake
/// domains). TSP's per-instance city list means it instead builds one
/// `TspDomain` per problem and calls [`run_problem`] directly.
fn run_all<D: Domain>(domain: &D, problems: &[Problem<D::State>], config: &Config, output_dir: &std::path::Path) {
    for (problem_idx, problem) in problems.iter().enumerate() {
        run_problem(domain, problem, problem_idx, config, output_dir);
    }
}

fn run_problem<D: Domain>(
    domain: &D,
    problem: &Problem<D::State>,
    problem_idx: usize,
    config: &Config,
    output_dir: &std::path::Path,
) {
    for searcher in &config.searchers {
        let heuristics = resolve_heuristic(domain, &searcher.heuristic);
        for degradation in searcher.degradation.values() {
            let run_label = format!("{}_problem{}_deg{}", searcher.name, problem_idx, degradation);
            match searcher.kind {
                SearcherKind::AStar => {
                    let astar_config = AStarConfig {
                        heuristic_weighting: searcher.heuristic_weighting,
                        degradation,
                    };
                    let result = AStarSearch::new(domain, astar_config).search(problem, &heuristics);
                    let stats = AStarStats::from_result(&run_label, &result);
                    stats.log();
                    if let Err(err) = write_json(output_dir, &run_label, &stats) {
                        tracing::error!(%err, run_label = %run_label, "failed to write run statistics");
                    }
                }
                SearcherKind::BSharp => {
                    let bsharp_config = BSharpConfig {
                        split: searcher.split,
                        degradation,
                    };
                    let result = BSharpSearch::new(domain, bsharp_config).search(problem, &heuristics);
                    let stats = BSharpStats::from_result(&run_label, &searcher.heuristic, &result);
                    stats.log();
                    if let Err(err) = write_json(output_dir, &run_label, &stats) {
                        tracing::error!(%err, run_label = %run_label, "failed to write run statistics");
                    }
                }
            }
        }
    }
}

/// Looks up `name` in `domain`'s heuristic registry, falling back to the
/// zero heuristic (with a warning) when the name is unrecognized (§7,
/// "Unknown heuristic name").
fn resolve_heuristic<D: Domain>(domain: &D, name: &str) -> HeuristicPair<D::State> {
    domain.heuristic(name).unwrap_or_else(|| {
        tracing::warn!(heuristic = name, "unknown heuristic name, falling back to zero");
        HeuristicPair::zero()
    })
}
