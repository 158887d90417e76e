use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use krk_tablebase::export::{export_table, RunSummary};
use krk_tablebase::solve::{run, Relaxation};
use krk_tablebase::strategy::{Rule, Strategy};
use krk_tablebase::table::Objective;
use krk_tablebase::SolverConfig;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Solve king and rook versus king on an N x M board and verify the mating strategy"
)]
struct Cli {
    /// Number of files
    #[arg(long, default_value_t = 8)]
    files: u32,

    /// Number of ranks (defaults to the number of files)
    #[arg(long)]
    ranks: Option<u32>,

    /// Pass ordering: gauss-seidel or jacobi
    #[arg(long, default_value_t = Relaxation::GaussSeidel)]
    relaxation: Relaxation,

    /// Skip the optimal fixed point
    #[arg(long)]
    no_optimal: bool,

    /// Skip strategy verification
    #[arg(long)]
    no_strategy: bool,

    /// Check that the strategy makes progress along every three-move line
    #[arg(long)]
    termination: bool,

    /// Drop a rule from the strategy (repeatable), e.g. --without squeeze
    #[arg(long = "without", value_name = "RULE")]
    without: Vec<String>,

    /// Write the optimal table in the flat text format
    #[arg(long, value_name = "FILE")]
    optimal_out: Option<PathBuf>,

    /// Write the strategy table in the flat text format
    #[arg(long, value_name = "FILE")]
    strategy_out: Option<PathBuf>,

    /// Write a JSON run summary
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Exit with an error when the strategy is not correct
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn parse_rule(name: &str) -> Result<Rule> {
    match Rule::ALL.iter().find(|r| r.name() == name) {
        Some(&rule) => Ok(rule),
        None => bail!(
            "unknown rule '{name}', expected one of: {}",
            Rule::ALL.map(|r| r.name()).join(", ")
        ),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    let mut strategy = Strategy::standard();
    for name in &cli.without {
        strategy = strategy.without(parse_rule(name)?);
    }

    let ranks = cli.ranks.unwrap_or(cli.files);
    let config = SolverConfig::new(cli.files, ranks)
        .context("invalid board dimensions")?
        .with_relaxation(cli.relaxation)
        .with_optimal(!cli.no_optimal)
        .with_strategy(!cli.no_strategy)
        .with_termination(cli.termination)
        .with_rules(strategy);

    let result = run(&config).context("solver failed")?;

    if let Some(path) = &cli.optimal_out {
        if result.optimal.is_none() {
            bail!("--optimal-out needs the optimal fixed point (drop --no-optimal)");
        }
        export_table(&result.table, Objective::Optimal, path)
            .with_context(|| format!("exporting optimal table to {}", path.display()))?;
    }
    if let Some(path) = &cli.strategy_out {
        if result.verdict.is_none() {
            bail!("--strategy-out needs strategy verification (drop --no-strategy)");
        }
        export_table(&result.table, Objective::Strategy, path)
            .with_context(|| format!("exporting strategy table to {}", path.display()))?;
    }
    if let Some(path) = &cli.summary {
        RunSummary::collect(
            &result.table,
            result.optimal.as_ref(),
            result.verdict.as_ref(),
            result.termination.as_ref(),
        )
        .write_json(path)
            .with_context(|| format!("writing summary to {}", path.display()))?;
    }

    if let Some(verdict) = &result.verdict {
        if cli.strict && !verdict.is_correct() {
            bail!(
                "strategy is not correct: {} undefined, {} unresolved",
                verdict.undefined.len(),
                verdict.unresolved.len()
            );
        }
    }
    Ok(())
}
