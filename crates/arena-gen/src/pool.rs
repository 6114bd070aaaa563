//! Bounded-concurrency scheduling of generation tasks.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{error, info};

use arena_core::{GenerationResult, RunStats, Task};

/// Run every task with at most `concurrency` in flight.
///
/// Each task acquires a semaphore permit before doing any work; the
/// tokio semaphore is FIFO-fair, so admission follows submission
/// (planner) order and a finishing task immediately unblocks the next
/// queued one — the pool stays full, there is no fixed batching.
/// Completion order is unspecified. A failing task never cancels its
/// siblings, and the call returns only after every task has reached a
/// terminal result.
///
/// `run_task` is an async closure `(Task) -> GenerationResult`; tests
/// inject deterministic stubs, production wires in the generator
/// pipeline. The returned [`RunStats`] is the only shared tally — it is
/// owned here, built from joined results, never from global state.
pub async fn run_all<F, Fut>(tasks: Vec<Task>, concurrency: usize, run_task: F) -> RunStats
where
    F: Fn(Task) -> Fut,
    Fut: Future<Output = GenerationResult> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(tasks.len());

    for task in tasks {
        let semaphore = Arc::clone(&semaphore);
        let key = task.key();
        let title = task.spec.title.clone();
        let fut = run_task(task);

        handles.push(tokio::spawn(async move {
            // The semaphore is never closed, so acquisition only fails
            // if the pool itself is torn down mid-run.
            let _permit = semaphore.acquire_owned().await.ok();

            info!(task = %key, title = %title, "starting");
            let result = fut.await;
            info!(task = %key, result = %result, "finished");
            result
        }));
    }

    let mut stats = RunStats::default();
    for handle in handles {
        match handle.await {
            Ok(result) => stats.record(result),
            Err(e) => {
                error!(error = %e, "task panicked");
                stats.record(GenerationResult::Failed);
            }
        }
    }
    stats
}
