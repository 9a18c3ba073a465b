//! Parallel dispatch of one search per distinct piece order.
//!
//! Every order is an independent task: the worker builds its own pieces,
//! remaining-pieces multiset and starting grid, runs the search to
//! completion and sends any solutions over a channel. The calling thread is
//! the only collector and the only writer to the sink.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;

use crossbeam_channel::{unbounded, Sender};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Error;
use crate::permutations::{count_unique_permutations, MultisetPermutations};
use crate::persistence::SolutionSink;
use crate::pieces::Puzzle;
use crate::placement::Branch;
use crate::solver::{search, RemainingPieces, SearchOptions, SearchOutcome, Solution};

/// Environment variable that overrides the default worker count.
pub const THREADS_ENV_VAR: &str = "RAYON_NUM_THREADS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub search: SearchOptions,
    /// Worker count. `None` uses `RAYON_NUM_THREADS` or all logical CPUs.
    pub threads: Option<usize>,
    /// Stop dispatching after this many distinct orders.
    pub order_limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Distinct orders of the usage multiset.
    pub orders_total: u128,
    /// Orders whose search ran to completion (fewer than the total under a
    /// limit or after cancellation).
    pub orders_searched: u64,
    /// Orders that produced at least one solution.
    pub orders_solved: u64,
    pub solutions: u64,
}

/// Searches a single order of shape indices.
pub fn solve_order(puzzle: &Puzzle, order: &[usize], options: SearchOptions) -> Vec<Solution> {
    let pieces = puzzle.pieces_in_order(order);
    let mut remaining: RemainingPieces = pieces.iter().map(|piece| piece.size).collect();
    let start = Branch::initial(puzzle.container());

    match search(&pieces, &start, &mut remaining, options) {
        SearchOutcome::Solved(grids) => grids
            .into_iter()
            .map(|grid| Solution {
                order: order.to_vec(),
                grid,
            })
            .collect(),
        SearchOutcome::Exhausted => Vec::new(),
    }
}

/// Searches every distinct order of the puzzle's pieces in parallel and
/// records each solution in `sink`.
///
/// Solutions arrive in no particular order. A sink error cancels the run:
/// orders already being searched finish, no further orders start, and the
/// error is returned.
pub fn run<S: SolutionSink>(puzzle: &Puzzle, options: &RunOptions, sink: &mut S) -> Result<RunSummary, Error> {
    let orders_total = count_unique_permutations(puzzle.usage());
    let threads = options.threads.unwrap_or_else(default_threads);
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;

    tracing::info!(
        orders = %orders_total,
        limit = ?options.order_limit,
        threads = pool.current_num_threads(),
        policy = ?options.search.policy,
        pruning = options.search.feasibility_pruning,
        "dispatching piece orders"
    );

    let cancelled = AtomicBool::new(false);
    let (tx, rx) = unbounded::<Vec<Solution>>();

    let mut summary = RunSummary {
        orders_total,
        ..RunSummary::default()
    };

    let searched = thread::scope(|scope| -> Result<u64, Error> {
        let pool = &pool;
        let cancelled = &cancelled;
        let producer = scope.spawn(move || search_orders(puzzle, options, pool, cancelled, tx));

        let mut result: Result<(), Error> = Ok(());
        for solutions in &rx {
            summary.orders_solved += 1;
            summary.solutions += solutions.len() as u64;
            tracing::debug!(
                order = ?solutions[0].order,
                count = solutions.len(),
                "order solved"
            );
            if let Err(e) = solutions.iter().try_for_each(|solution| sink.record(solution)) {
                tracing::warn!(error = %e, "recording failed, cancelling remaining orders");
                cancelled.store(true, Ordering::Relaxed);
                result = Err(e.into());
                break;
            }
        }
        drop(rx);

        match producer.join() {
            Ok(searched) => result.map(|()| searched),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })?;
    sink.finish()?;

    summary.orders_searched = searched;
    tracing::info!(
        searched = summary.orders_searched,
        solved = summary.orders_solved,
        solutions = summary.solutions,
        "search finished"
    );
    Ok(summary)
}

/// Runs one search per distinct order on `pool`, sending non-empty results
/// to `tx`. Stops taking new orders once `cancelled` is set or the receiver
/// is gone. Returns the number of orders searched.
fn search_orders(
    puzzle: &Puzzle,
    options: &RunOptions,
    pool: &ThreadPool,
    cancelled: &AtomicBool,
    tx: Sender<Vec<Solution>>,
) -> u64 {
    let searched = AtomicU64::new(0);
    let search_options = options.search;
    let order_limit = options.order_limit.unwrap_or(usize::MAX);

    let outcome = pool.install(|| {
        MultisetPermutations::new(puzzle.usage())
            .take(order_limit)
            .par_bridge()
            .try_for_each_with(tx, |tx, order| {
                if cancelled.load(Ordering::Relaxed) {
                    return Err(());
                }
                let solutions = solve_order(puzzle, &order, search_options);
                let done = searched.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::trace!(?order, done, found = solutions.len(), "order finished");
                if solutions.is_empty() {
                    return Ok(());
                }
                tx.send(solutions).map_err(drop)
            })
    });
    if outcome.is_err() {
        tracing::debug!("order dispatch stopped early");
    }
    searched.into_inner()
}

fn default_threads() -> usize {
    std::env::var(THREADS_ENV_VAR)
        .ok()
        .and_then(|value| value.parse().ok())
        .or_else(|| thread::available_parallelism().ok().map(usize::from))
        .unwrap_or(1)
}
