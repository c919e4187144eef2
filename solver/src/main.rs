use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use permanganate_flow::{Board, SearchConfig, SearchOutcome};

#[derive(Parser)]
#[command(name = "solver")]
#[command(about = "Solve Flow Free puzzles by bounded best-first search")]
struct Cli {
    /// Puzzle files, one row per line, `.` for free cells
    #[arg(required = true)]
    puzzles: Vec<PathBuf>,

    /// Maximum number of queued nodes; overrides --max-mb
    #[arg(short = 'n', long)]
    max_nodes: Option<usize>,

    /// Memory ceiling in megabytes used to derive the node budget
    #[arg(short = 'm', long, default_value_t = 128.0)]
    max_mb: f64,

    /// Keep children that contain dead ends
    #[arg(long)]
    no_dead_ends: bool,

    /// Do not walk straight flows to their goal before searching
    #[arg(long)]
    no_straight: bool,

    /// Shuffle the branching order
    #[arg(short = 'r', long)]
    random: bool,

    /// Seed for --random; defaults to the clock
    #[arg(long)]
    seed: Option<u64>,

    /// Branch on colors in a fixed order instead of the most constrained one
    #[arg(long)]
    fixed_order: bool,

    /// Colors to branch on first, e.g. `RGB`
    #[arg(short = 'o', long, default_value = "")]
    order: String,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report search progress; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show the cheapest queued node when the node budget runs out
    #[arg(short, long)]
    diagnostics: bool,

    /// Print the winning move sequence
    #[arg(long)]
    moves: bool,
}

impl Cli {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            node_limit: self.max_nodes,
            max_mb: self.max_mb,
            check_dead_ends: !self.no_dead_ends,
            link_straight_flows: !self.no_straight,
            random_order: self.random,
            seed: self.seed,
            most_constrained: !self.fixed_order,
            color_priority: self.order.chars().collect(),
            diagnostics: self.diagnostics,
        }
    }

    fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Error,
            (false, 0 | 1) if self.diagnostics => LevelFilter::Debug,
            (false, 0) => LevelFilter::Warn,
            (false, 1) => LevelFilter::Info,
            (false, 2) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }
}

fn solve_file(path: &Path, config: &SearchConfig, cli: &Cli) -> Result<bool> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut board: Board = text.parse().with_context(|| format!("parsing {}", path.display()))?;
    info!("{}: {} colors\n{}", path.display(), board.puzzle().num_colors(), board);

    let report = board.search(config);
    let verdict = match report.outcome {
        SearchOutcome::Success => "solved",
        SearchOutcome::Unreachable => "found no solution (queue exhausted)",
        SearchOutcome::Full => "ran out of node budget",
    };
    println!(
        "{} {} in {:.3}s, {} nodes queued, {} generated",
        path.display(),
        verdict,
        report.elapsed.as_secs_f64(),
        report.nodes,
        report.generated,
    );

    let Some(final_state) = &report.final_state else {
        return Ok(false);
    };

    if !cli.quiet {
        print!("{}", final_state.render(board.puzzle()));
    }
    if cli.moves {
        let listing: String = report.moves.iter()
            .map(|step| format!("{}{}", board.puzzle().flow(step.color).display, step.direction.arrow()))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", listing);
    }

    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config = cli.config();
    let mut all_solved = true;

    for path in &cli.puzzles {
        match solve_file(path, &config, &cli) {
            Ok(solved) => all_solved &= solved,
            Err(err) => {
                error!("{:#}", err);
                all_solved = false;
            }
        }
    }

    match all_solved {
        true => ExitCode::SUCCESS,
        false => ExitCode::FAILURE,
    }
}
