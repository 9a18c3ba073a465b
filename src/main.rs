//! Rectangle Tiling Solver
//!
//! Reads a puzzle definition (a container and the rectangular pieces that
//! must fill it), searches every distinct piece order in parallel and
//! appends each tiling found to a results file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use tiler::permutations::count_unique_permutations;
use tiler::persistence::{self, TextSink, SOLUTIONS_TXT};
use tiler::{run, Puzzle, RunOptions, SearchOptions, SolutionPolicy};

/// Finds exact tilings of a rectangle by rectangular pieces.
#[derive(Parser)]
#[command(name = "tiler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search every distinct piece order and append tilings to the results file.
    Solve {
        /// Puzzle definition (JSON).
        puzzle: PathBuf,
        /// Collect every tiling of each order instead of the first.
        #[arg(long)]
        all: bool,
        /// Reject placements leaving gaps the remaining pieces cannot span.
        #[arg(long)]
        prune: bool,
        /// Worker threads (default: RAYON_NUM_THREADS or all CPUs).
        #[arg(long)]
        threads: Option<usize>,
        /// Search at most this many distinct orders.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, default_value = SOLUTIONS_TXT)]
        output: PathBuf,
    },
    /// Print the number of distinct piece orders of a puzzle.
    Orders {
        puzzle: PathBuf,
    },
    /// Show the number of saved tilings.
    Count {
        #[arg(long, default_value = SOLUTIONS_TXT)]
        output: PathBuf,
    },
    /// Print saved tilings.
    Show {
        #[arg(long, default_value = SOLUTIONS_TXT)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level(cli.verbose))
        .init();

    match cli.command {
        Command::Solve {
            puzzle,
            all,
            prune,
            threads,
            limit,
            output,
        } => {
            let policy = if all {
                SolutionPolicy::All
            } else {
                SolutionPolicy::First
            };
            let options = RunOptions {
                search: SearchOptions {
                    policy,
                    feasibility_pruning: prune,
                },
                threads,
                order_limit: limit,
            };
            run_solver(&puzzle, &options, &output)
        }
        Command::Orders { puzzle } => run_orders(&puzzle),
        Command::Count { output } => run_count(&output),
        Command::Show { output } => run_show(&output),
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn load_puzzle(path: &Path) -> Result<Puzzle> {
    Puzzle::load(path).with_context(|| format!("failed to load puzzle {}", path.display()))
}

/// Validates the puzzle, searches it and appends tilings to `output`.
fn run_solver(puzzle_path: &Path, options: &RunOptions, output: &Path) -> Result<()> {
    let puzzle = load_puzzle(puzzle_path)?;
    let mut sink = TextSink::append(output)
        .with_context(|| format!("failed to open {}", output.display()))?;

    let summary = run(&puzzle, options, &mut sink)?;

    println!(
        "Searched {} of {} orders: {} tilings from {} orders",
        summary.orders_searched, summary.orders_total, summary.solutions, summary.orders_solved
    );
    if summary.solutions > 0 {
        println!("Appended to {}", output.display());
    }
    Ok(())
}

fn run_orders(puzzle_path: &Path) -> Result<()> {
    let puzzle = load_puzzle(puzzle_path)?;
    println!("{} distinct orders", count_unique_permutations(puzzle.usage()));
    Ok(())
}

fn run_count(output: &Path) -> Result<()> {
    match persistence::count(output)? {
        Some(count) => println!("{} tilings", count),
        None => eprintln!("No {} found. Run 'tiler solve' first.", output.display()),
    }
    Ok(())
}

fn run_show(output: &Path) -> Result<()> {
    match persistence::load_all(output)? {
        Some(grids) => {
            println!("Loaded {} tilings\n", grids.len());
            for (i, grid) in grids.iter().enumerate() {
                println!("Tiling {}:", i + 1);
                println!("{grid}");
            }
        }
        None => eprintln!("No {} found. Run 'tiler solve' first.", output.display()),
    }
    Ok(())
}
