//! Bounded-concurrency scheduler that preserves input order.
//!
//! At most `limit` workers are in flight at once. Tasks are dispatched
//! strictly in input order, may complete in any order, and their results are
//! written into a fixed slot keyed by the original index. A run resolves only
//! once the completed count reaches the number of tasks.
//!
//! All bookkeeping lives in the single async context that drives the run:
//! completions are pulled one at a time from a `FuturesUnordered` set, so the
//! running/completed counters and the refill decision are never touched
//! concurrently.
//!
//! On the first failure (`run`), dispatch stops and the in-flight set is
//! dropped, cancelling those workers at their next await point. Work already
//! handed to the blocking pool finishes on its own and its output is
//! discarded.

use std::convert::Infallible;
use std::future::Future;
use std::num::NonZeroUsize;

use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::error::PipelineError;

/// One unit of work bound to its position in the input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Task<T> {
    /// Position in the original input; the only ordering key.
    index: usize,
    input: T,
}

/// Per-run counters. Owned by one run, never shared.
#[derive(Debug)]
struct RunState {
    running: usize,
    next_index: usize,
    completed: usize,
    total: usize,
    limit: usize,
}

impl RunState {
    fn new(total: usize, limit: usize) -> Self {
        Self {
            running: 0,
            next_index: 0,
            completed: 0,
            total,
            limit,
        }
    }

    fn can_dispatch(&self) -> bool {
        self.running < self.limit && self.next_index < self.total
    }

    fn on_dispatch(&mut self, index: usize) {
        assert_eq!(
            index, self.next_index,
            "scheduler invariant violated: dispatched index {index} out of order"
        );
        self.next_index += 1;
        self.running += 1;
        assert!(
            self.running <= self.limit,
            "scheduler invariant violated: {} workers in flight with limit {}",
            self.running,
            self.limit
        );
    }

    fn on_finish(&mut self) {
        assert!(
            self.running > 0,
            "scheduler invariant violated: completion with no worker in flight"
        );
        self.running -= 1;
    }

    fn on_slot_written(&mut self) {
        self.completed += 1;
        assert!(
            self.completed <= self.next_index,
            "scheduler invariant violated: {} completions for {} dispatches",
            self.completed,
            self.next_index
        );
    }

    fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Fixed-length, write-once result storage indexed by task position.
#[derive(Debug)]
struct ResultSlots<S> {
    slots: Vec<Option<S>>,
    filled: usize,
}

impl<S> ResultSlots<S> {
    fn new(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self { slots, filled: 0 }
    }

    fn fill(&mut self, index: usize, value: S) -> &S {
        let slot = &mut self.slots[index];
        assert!(
            slot.is_none(),
            "scheduler invariant violated: slot {index} written twice"
        );
        self.filled += 1;
        slot.insert(value)
    }

    fn into_ordered(self) -> Vec<S> {
        assert_eq!(
            self.filled,
            self.slots.len(),
            "scheduler invariant violated: run finished with empty slots"
        );
        self.slots.into_iter().flatten().collect()
    }
}

/// Runs a batch of async workers with a fixed in-flight limit.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrencyScheduler {
    limit: NonZeroUsize,
}

impl ConcurrencyScheduler {
    /// Create a scheduler. A limit of zero is rejected.
    pub fn new(limit: usize) -> Result<Self, PipelineError> {
        NonZeroUsize::new(limit)
            .map(|limit| Self { limit })
            .ok_or_else(|| PipelineError::InvalidArgument("concurrency limit must be > 0".into()))
    }

    /// Maximum number of workers in flight at once.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Run `worker` over every input, failing fast.
    ///
    /// `worker` is called once per input, in input order, with the input and
    /// its index. `on_complete` fires synchronously after each successful
    /// worker, before its capacity is reused; its call order follows
    /// completion, not input order.
    ///
    /// Returns the results in input order, or the first error observed.
    pub async fn run<T, R, E, W, Fut, C>(
        &self,
        inputs: Vec<T>,
        worker: W,
        on_complete: C,
    ) -> Result<Vec<R>, E>
    where
        W: FnMut(T, usize) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        C: FnMut(usize, &R),
    {
        self.drive(inputs, worker, |_, outcome: Result<R, E>| outcome, on_complete)
            .await
    }

    /// Run `worker` over every input without stopping on failure.
    ///
    /// Every task runs; each slot holds that task's own `Result`.
    /// `on_complete` fires once per task, successful or not.
    pub async fn run_settled<T, R, E, W, Fut, C>(
        &self,
        inputs: Vec<T>,
        worker: W,
        on_complete: C,
    ) -> Vec<Result<R, E>>
    where
        W: FnMut(T, usize) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        C: FnMut(usize, &Result<R, E>),
    {
        let settled = self
            .drive(
                inputs,
                worker,
                |_, outcome: Result<R, E>| Ok::<_, Infallible>(outcome),
                on_complete,
            )
            .await;
        match settled {
            Ok(results) => results,
            Err(never) => match never {},
        }
    }

    /// Shared dispatch loop.
    ///
    /// `accept` turns a raw worker output into a slot value or aborts the
    /// run; `notify` sees each slot value right after it is written.
    async fn drive<T, O, S, B, W, Fut, A, N>(
        &self,
        inputs: Vec<T>,
        mut worker: W,
        mut accept: A,
        mut notify: N,
    ) -> Result<Vec<S>, B>
    where
        W: FnMut(T, usize) -> Fut,
        Fut: Future<Output = O>,
        A: FnMut(usize, O) -> Result<S, B>,
        N: FnMut(usize, &S),
    {
        let total = inputs.len();
        let mut state = RunState::new(total, self.limit());
        let mut slots = ResultSlots::new(total);
        let mut pending = inputs
            .into_iter()
            .enumerate()
            .map(|(index, input)| Task { index, input });
        let mut in_flight = FuturesUnordered::new();

        tracing::trace!("Scheduler start: {} task(s), limit {}", total, self.limit);

        loop {
            while state.can_dispatch() {
                let Some(task) = pending.next() else {
                    break;
                };
                state.on_dispatch(task.index);
                tracing::trace!("Dispatch #{} ({} in flight)", task.index, state.running);

                let index = task.index;
                let work = worker(task.input, index);
                in_flight.push(async move { (index, work.await) });
            }

            if state.is_complete() {
                break;
            }

            let Some((index, outcome)) = in_flight.next().await else {
                panic!(
                    "scheduler invariant violated: nothing in flight with {}/{} completed",
                    state.completed, total
                );
            };
            state.on_finish();

            match accept(index, outcome) {
                Ok(value) => {
                    let value = slots.fill(index, value);
                    state.on_slot_written();
                    notify(index, value);
                }
                Err(err) => {
                    tracing::debug!(
                        "Task #{} failed; abandoning {} in-flight and {} undispatched task(s)",
                        index,
                        state.running,
                        total - state.next_index
                    );
                    return Err(err);
                }
            }
        }

        Ok(slots.into_ordered())
    }
}
