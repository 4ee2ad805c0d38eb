mod format;
mod provenance;

use anyhow::{bail, Context, Result};
use brainwall::optimize::{optimize, OptimizeCfg};
use brainwall::oracle::validate;
use brainwall::relax::{rubber_band, RelaxCfg};
use brainwall::search::Deadline;
use brainwall::solve::{brute_force, corner_matching, incremental_brute_force, refine, RefineCfg};
use brainwall::Point;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Place a figure inside a hole on the integer lattice")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algo {
    BruteForce,
    Incremental,
    Corner,
    Refine,
    Optimize,
    Relax,
}

#[derive(Subcommand)]
enum Action {
    /// Run a heuristic and write the resulting solution plus a provenance sidecar
    Solve {
        #[arg(long, value_enum)]
        algo: Algo,
        #[arg(long)]
        problem: PathBuf,
        /// Starting solution; required by incremental, refine, optimize, relax
        #[arg(long)]
        solution: Option<PathBuf>,
        /// Vertex indices: searched by incremental, pinned by relax
        #[arg(long, value_delimiter = ',')]
        selected: Vec<usize>,
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
        /// RNG seed; drawn at random when absent
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Check a solution and print the report as JSON
    Validate {
        #[arg(long)]
        problem: PathBuf,
        #[arg(long)]
        solution: PathBuf,
    },
}

struct SolveArgs {
    algo: Algo,
    problem: PathBuf,
    solution: Option<PathBuf>,
    selected: Vec<usize>,
    timeout_secs: u64,
    seed: Option<u64>,
    out: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve {
            algo,
            problem,
            solution,
            selected,
            timeout_secs,
            seed,
            out,
        } => solve(SolveArgs {
            algo,
            problem,
            solution,
            selected,
            timeout_secs,
            seed,
            out,
        }),
        Action::Validate { problem, solution } => check(problem, solution),
    }
}

fn required(input: &Option<Vec<Point>>, algo: Algo) -> Result<&[Point]> {
    input
        .as_deref()
        .with_context(|| format!("--solution is required for {algo:?}"))
}

fn solve(args: SolveArgs) -> Result<()> {
    let problem = format::read_problem(&args.problem)?;
    let input = match &args.solution {
        Some(path) => {
            let pts = format::read_solution(path)?;
            problem
                .check_solution(&pts)
                .with_context(|| format!("checking solution {}", path.display()))?;
            Some(pts)
        }
        None => None,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let budget = Duration::from_secs(args.timeout_secs);
    let deadline = Deadline::after(budget);
    tracing::info!(algo = ?args.algo, seed, timeout_secs = args.timeout_secs, "solve");

    let result = match args.algo {
        Algo::BruteForce => brute_force(&problem, &mut rng, deadline),
        Algo::Incremental => incremental_brute_force(
            &problem,
            required(&input, args.algo)?,
            &args.selected,
            &mut rng,
            deadline,
        )?,
        Algo::Corner => corner_matching(&problem, &mut rng, deadline),
        Algo::Refine => Some(refine(
            &problem,
            required(&input, args.algo)?,
            RefineCfg::default(),
            deadline,
        )?),
        Algo::Optimize => Some(optimize(
            &problem,
            required(&input, args.algo)?,
            OptimizeCfg::default(),
            &mut rng,
            Deadline::after(budget / 2),
            deadline,
        )?),
        Algo::Relax => Some(rubber_band(
            &problem,
            required(&input, args.algo)?,
            &args.selected,
            RelaxCfg::default(),
            deadline,
        )?),
    };
    let Some(result) = result else {
        bail!("{:?} found no placement within {}s", args.algo, args.timeout_secs);
    };

    let report = validate(&problem, &result);
    if let Some(before) = input.as_deref().map(|pts| validate(&problem, pts)) {
        if report.is_worse_than(&before) {
            bail!(
                "refusing to write a worse solution: valid {} -> {}, dislikes {} -> {}",
                before.is_valid(),
                report.is_valid(),
                before.dislikes,
                report.dislikes
            );
        }
    }

    format::write_json(&args.out, &format::SolutionFile::from_points(&result))?;
    let run = provenance::Run {
        algo: format!("{:?}", args.algo),
        seed,
        problem: args.problem.clone(),
        input: args.solution.clone(),
        params: json!({
            "selected": args.selected,
            "timeout_secs": args.timeout_secs,
        }),
        valid: report.is_valid(),
        dislikes: report.dislikes,
    };
    provenance::write_sidecar(&args.out, &run)?;
    tracing::info!(
        valid = report.is_valid(),
        dislikes = report.dislikes,
        out = %args.out.display(),
        "wrote solution"
    );
    Ok(())
}

fn check(problem: PathBuf, solution: PathBuf) -> Result<()> {
    let pr = format::read_problem(&problem)?;
    let pts = format::read_solution(&solution)?;
    pr.check_solution(&pts)
        .with_context(|| format!("checking solution {}", solution.display()))?;
    let report = validate(&pr, &pts);
    tracing::info!(valid = report.is_valid(), dislikes = report.dislikes, "validate");
    println!("{}", serde_json::to_string_pretty(&format::report_json(&report))?);
    Ok(())
}
