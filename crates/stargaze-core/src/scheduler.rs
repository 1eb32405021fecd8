// SPDX-License-Identifier: Apache-2.0

//! Bounded-concurrency task scheduler.
//!
//! Runs an ordered list of deferred tasks with at most `C` of them in flight,
//! launching the next queued task as soon as any running one resolves. Every
//! task gets exactly one [`Outcome`], stored at the task's original index, so
//! callers see results in input order no matter how completions interleave.
//!
//! A failing task never aborts its siblings. The only error the scheduler
//! itself returns is [`StargazeError::InvalidLimit`], raised before any task
//! is invoked.
//!
//! # Example
//!
//! ```rust,no_run
//! use stargaze_core::scheduler::{self, Outcome};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let tasks = (1..=3)
//!     .map(|n| scheduler::task(move || async move { Ok(n * 10) }))
//!     .collect();
//!
//! let outcomes = scheduler::run(tasks, 2).await?;
//! assert!(outcomes.iter().all(Outcome::is_success));
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::num::NonZeroUsize;

use anyhow::anyhow;
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt, stream};
use tracing::debug;

use crate::error::StargazeError;

/// A deferred, zero-argument unit of work.
///
/// The closure captures whatever state it needs and is invoked at most once,
/// when the scheduler admits it into the window.
pub type Task<T> = Box<dyn FnOnce() -> BoxFuture<'static, anyhow::Result<T>> + Send>;

/// Wraps an async closure into a [`Task`].
pub fn task<T, F, Fut>(f: F) -> Task<T>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    Box::new(move || f().boxed())
}

/// Result of running a single task.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Task resolved with a value.
    Success(T),
    /// Task failed or panicked.
    Failure(anyhow::Error),
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` for [`Outcome::Failure`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Consumes the outcome, keeping the value of a success.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Borrows the failure reason, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&anyhow::Error> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }
}

impl<T> From<anyhow::Result<T>> for Outcome<T> {
    fn from(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failure(err),
        }
    }
}

/// Maximum number of tasks in flight at once. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyLimit(NonZeroUsize);

impl ConcurrencyLimit {
    /// Returns the limit as a plain count.
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for ConcurrencyLimit {
    type Error = StargazeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(StargazeError::InvalidLimit { limit: 0 })
    }
}

impl TryFrom<i64> for ConcurrencyLimit {
    type Error = StargazeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(StargazeError::InvalidLimit { limit: value })
    }
}

impl TryFrom<i32> for ConcurrencyLimit {
    type Error = StargazeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

/// Runs `tasks` with at most `limit` in flight and returns their outcomes in
/// input order.
///
/// # Errors
///
/// Returns [`StargazeError::InvalidLimit`] if `limit` is zero or negative.
/// No task is invoked in that case.
pub async fn run<T, L>(tasks: Vec<Task<T>>, limit: L) -> crate::Result<Vec<Outcome<T>>>
where
    T: Send + 'static,
    L: TryInto<ConcurrencyLimit, Error = StargazeError>,
{
    run_with_progress(tasks, limit, |_completed, _total| {}).await
}

/// Same as [`run`], calling `on_complete(completed, total)` after each
/// outcome is recorded.
///
/// # Concurrency
///
/// Tasks are admitted through `buffer_unordered(limit)`, which keeps a
/// sliding window of at most `limit` running futures and pulls the next task
/// only when one resolves. Each admitted task is invoked and driven inside its
/// own tokio task, so a panic while building or polling its future is
/// captured as a [`Outcome::Failure`] instead of tearing down the batch.
///
/// Completions are consumed by this future alone, which writes each outcome
/// into a pre-allocated slot indexed by the task's original position.
///
/// # Errors
///
/// Returns [`StargazeError::InvalidLimit`] if `limit` is zero or negative.
pub async fn run_with_progress<T, L, P>(
    tasks: Vec<Task<T>>,
    limit: L,
    mut on_complete: P,
) -> crate::Result<Vec<Outcome<T>>>
where
    T: Send + 'static,
    L: TryInto<ConcurrencyLimit, Error = StargazeError>,
    P: FnMut(usize, usize),
{
    let limit = limit.try_into()?;
    let total = tasks.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    debug!(total, limit = limit.get(), "Scheduling tasks");

    let mut slots: Vec<Option<Outcome<T>>> = std::iter::repeat_with(|| None).take(total).collect();

    let mut completions = stream::iter(tasks.into_iter().enumerate())
        .map(|(index, task)| async move {
            // The closure itself runs inside the spawned task
            let joined = tokio::spawn(async move { task().await }).await;
            (index, joined)
        })
        .buffer_unordered(limit.get());

    let mut completed = 0;
    while let Some((index, joined)) = completions.next().await {
        let outcome = match joined {
            Ok(result) => Outcome::from(result),
            Err(join_err) => Outcome::Failure(anyhow!("task {index} did not complete: {join_err}")),
        };
        if let Outcome::Failure(err) = &outcome {
            debug!(index, error = %err, "Task failed");
        }
        slots[index] = Some(outcome);
        completed += 1;
        on_complete(completed, total);
    }

    Ok(fill_slots(slots))
}

/// Turns recorded slots into outcomes, one per slot, marking any slot left
/// empty as a failure.
fn fill_slots<T>(slots: Vec<Option<Outcome<T>>>) -> Vec<Outcome<T>> {
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| Outcome::Failure(anyhow!("task {index} produced no outcome")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    fn counting_tasks(n: usize, invoked: &Arc<AtomicUsize>) -> Vec<Task<usize>> {
        (0..n)
            .map(|i| {
                let invoked = invoked.clone();
                task(move || async move {
                    invoked.fetch_add(1, Ordering::SeqCst);
                    Ok(i)
                })
            })
            .collect()
    }

    fn values(outcomes: Vec<Outcome<usize>>) -> Vec<Option<usize>> {
        outcomes.into_iter().map(Outcome::success).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_keep_input_order() {
        let delays = [50, 10, 30, 5, 20];
        let finished = Arc::new(Mutex::new(Vec::new()));

        let tasks = delays
            .iter()
            .enumerate()
            .map(|(i, &ms)| {
                let finished = finished.clone();
                task(move || async move {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    finished.lock().unwrap().push(i + 1);
                    Ok(i + 1)
                })
            })
            .collect();

        let outcomes = run(tasks, 2).await.unwrap();

        assert_eq!(
            values(outcomes),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
        // Window of two: 2 frees a slot for 3, 3 for 4, 4 for 5, then 1 and 5 drain.
        assert_eq!(*finished.lock().unwrap(), vec![2, 3, 4, 1, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_never_exceeds_limit() {
        for limit in [1_usize, 2, 3, 7, 25] {
            let active = Arc::new(AtomicUsize::new(0));
            let high_water = Arc::new(AtomicUsize::new(0));

            let tasks = (0..20_u64)
                .map(|i| {
                    let active = active.clone();
                    let high_water = high_water.clone();
                    task(move || async move {
                        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                        high_water.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(5 + (i * 7) % 13)).await;
                        active.fetch_sub(1, Ordering::SeqCst);
                        Ok(i)
                    })
                })
                .collect();

            let outcomes = run(tasks, limit).await.unwrap();

            assert_eq!(outcomes.len(), 20);
            let peak = high_water.load(Ordering::SeqCst);
            assert!(peak <= limit, "limit {limit} exceeded: peak {peak}");
            assert_eq!(peak, limit.min(20), "window should saturate at {limit}");
        }
    }

    #[tokio::test]
    async fn test_single_failure_is_isolated() {
        let tasks: Vec<Task<usize>> = (0..6)
            .map(|i| {
                task(move || async move {
                    if i == 3 {
                        anyhow::bail!("task {i} exploded");
                    }
                    Ok(i)
                })
            })
            .collect();

        let outcomes = run(tasks, 2).await.unwrap();

        assert_eq!(outcomes.len(), 6);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.is_failure(), i == 3, "unexpected outcome at {i}");
        }
        let reason = outcomes[3].failure().unwrap().to_string();
        assert!(reason.contains("task 3 exploded"));
    }

    #[tokio::test]
    async fn test_full_parallel_with_failure() {
        let tasks: Vec<Task<&str>> = vec![
            task(|| async { Ok("a") }),
            task(|| async { Ok("b") }),
            task(|| async { Err(anyhow!("boom")) }),
            task(|| async { Ok("d") }),
        ];

        let outcomes = run(tasks, 4).await.unwrap();

        let pattern: Vec<bool> = outcomes.iter().map(Outcome::is_success).collect();
        assert_eq!(pattern, vec![true, true, false, true]);
    }

    #[tokio::test]
    async fn test_panicking_task_becomes_failure() {
        let tasks: Vec<Task<u8>> = vec![
            task(|| async { Ok(1) }),
            task(|| async {
                let missing: Option<u8> = None;
                Ok(missing.expect("task blew up"))
            }),
            task(|| async { Ok(3) }),
        ];

        let outcomes = run(tasks, 1).await.unwrap();

        assert!(outcomes[0].is_success());
        assert!(outcomes[1].is_failure());
        assert!(outcomes[2].is_success());
    }

    #[tokio::test]
    async fn test_task_panicking_before_returning_future_becomes_failure() {
        let tasks: Vec<Task<u8>> = vec![
            task(|| async { Ok(1) }),
            Box::new(|| -> BoxFuture<'static, anyhow::Result<u8>> {
                let missing: Option<BoxFuture<'static, anyhow::Result<u8>>> = None;
                missing.expect("closure blew up before returning a future")
            }),
            task(|| async { Ok(3) }),
        ];

        let outcomes = run(tasks, 2).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0], Outcome::Success(1)));
        assert!(outcomes[1].is_failure());
        assert!(matches!(outcomes[2], Outcome::Success(3)));
    }

    #[test]
    fn test_empty_slot_still_yields_an_outcome() {
        let slots = vec![Some(Outcome::Success(1)), None, Some(Outcome::Success(3))];

        let outcomes = fill_slots(slots);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[1].is_failure());
        assert!(
            outcomes[1]
                .failure()
                .unwrap()
                .to_string()
                .contains("task 1 produced no outcome")
        );
        assert_eq!(values(outcomes), vec![Some(1), None, Some(3)]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let outcomes = run(counting_tasks(0, &invoked), 3).await.unwrap();

        assert!(outcomes.is_empty());
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_limit_runs_nothing() {
        let invoked = Arc::new(AtomicUsize::new(0));

        let zero = run(counting_tasks(4, &invoked), 0).await;
        assert!(matches!(zero, Err(StargazeError::InvalidLimit { limit: 0 })));

        let negative = run(counting_tasks(4, &invoked), -1).await;
        assert!(matches!(
            negative,
            Err(StargazeError::InvalidLimit { limit: -1 })
        ));

        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_limit_larger_than_input() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let outcomes = run(counting_tasks(3, &invoked), 100_usize).await.unwrap();

        assert_eq!(values(outcomes), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(invoked.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_progress_callback_counts_every_completion() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let mut calls = Vec::new();

        let _outcomes = run_with_progress(counting_tasks(4, &invoked), 2, |completed, total| {
            calls.push((completed, total));
        })
        .await
        .unwrap();

        assert_eq!(calls, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_limit_conversions() {
        assert_eq!(ConcurrencyLimit::try_from(5_usize).unwrap().get(), 5);
        assert_eq!(ConcurrencyLimit::try_from(100_i64).unwrap().get(), 100);
        assert!(ConcurrencyLimit::try_from(0_usize).is_err());
        assert!(matches!(
            ConcurrencyLimit::try_from(-7_i64),
            Err(StargazeError::InvalidLimit { limit: -7 })
        ));
    }
}
