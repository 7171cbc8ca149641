//! Background recalculation
//!
//! Interactive callers submit a job for every input change. Only the newest
//! pending job is kept, an optional debounce window lets bursts settle, and a
//! finished result replaces the stored one only if it is newer
//! (last-writer-wins). The engine itself is never interrupted.

use banco_engine::ev::validate;
use banco_engine::{tally, CalculationResult, EngineError, PayoutTable, ShoeState, Tally};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Inputs for one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub shoe: ShoeState,
    pub payouts: PayoutTable,
    pub rebate: f64,
}

/// A finished calculation tagged with the generation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Completed {
    pub generation: u64,
    pub result: Result<CalculationResult, EngineError>,
}

#[derive(Default)]
struct State {
    next_generation: u64,
    pending: Option<(u64, Job)>,
    latest: Option<Completed>,
    shutdown: bool,
}

struct Shared {
    state: Mutex<State>,
    signal: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs calculations on a dedicated thread.
pub struct Recalculator {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl Recalculator {
    /// Start the worker thread. Jobs wait `debounce` for newer submissions
    /// before they run; `Duration::ZERO` runs them immediately.
    pub fn spawn(debounce: Duration) -> std::io::Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(State::default()),
            signal: Condvar::new(),
        });
        let worker = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("banco-recalc".to_string())
            .spawn(move || run(&worker, debounce))?;
        Ok(Recalculator {
            shared,
            handle: Some(handle),
        })
    }

    /// Queue a job, replacing any job still waiting. Returns its generation.
    pub fn submit(&self, job: Job) -> u64 {
        let mut state = self.shared.lock();
        state.next_generation += 1;
        let generation = state.next_generation;
        if let Some((superseded, _)) = state.pending.replace((generation, job)) {
            trace!(superseded, generation, "pending job coalesced");
        }
        drop(state);
        self.shared.signal.notify_all();
        generation
    }

    /// Most recent finished result, if any.
    pub fn latest(&self) -> Option<Completed> {
        self.shared.lock().latest.clone()
    }

    /// Block until `generation` or a newer job has finished.
    ///
    /// Returns `None` if the worker shut down first.
    pub fn wait_for(&self, generation: u64) -> Option<Completed> {
        let mut state = self.shared.lock();
        loop {
            if let Some(done) = state.latest.as_ref().filter(|c| c.generation >= generation) {
                return Some(done.clone());
            }
            if state.shutdown {
                return None;
            }
            state = self
                .shared
                .signal
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

impl Drop for Recalculator {
    fn drop(&mut self) {
        self.shared.lock().shutdown = true;
        self.shared.signal.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("recalculation worker panicked");
            }
        }
    }
}

/// Worker loop. Keeps the last tally so payout or rebate edits on an
/// unchanged shoe skip the enumeration.
fn run(shared: &Shared, debounce: Duration) {
    let mut cache: Option<(ShoeState, Tally)> = None;
    loop {
        let Some((generation, job)) = next_job(shared, debounce) else {
            return;
        };

        let started = Instant::now();
        let result = validate(&job.shoe, job.rebate).map(|()| {
            let counts = match cache.take() {
                Some((shoe, counts)) if shoe == job.shoe => counts,
                _ => tally(&job.shoe),
            };
            let priced = counts.price(job.shoe.total(), &job.payouts, job.rebate);
            cache = Some((job.shoe, counts));
            priced
        });
        match &result {
            Ok(_) => debug!(
                generation,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "recalculated"
            ),
            Err(e) => warn!(generation, error = %e, "calculation rejected"),
        }

        let mut state = shared.lock();
        if state
            .latest
            .as_ref()
            .map_or(true, |c| c.generation < generation)
        {
            state.latest = Some(Completed { generation, result });
        }
        drop(state);
        shared.signal.notify_all();
    }
}

/// Wait for a job, let it settle for `debounce`, then take it.
/// Returns `None` on shutdown.
fn next_job(shared: &Shared, debounce: Duration) -> Option<(u64, Job)> {
    let mut state = shared.lock();
    loop {
        if state.shutdown {
            return None;
        }
        let Some(seen) = state.pending.as_ref().map(|(g, _)| *g) else {
            state = shared.signal.wait(state).unwrap_or_else(PoisonError::into_inner);
            continue;
        };
        if debounce.is_zero() {
            return state.pending.take();
        }
        let (next, timeout) = shared
            .signal
            .wait_timeout(state, debounce)
            .unwrap_or_else(PoisonError::into_inner);
        state = next;
        let newest = state.pending.as_ref().map(|(g, _)| *g);
        if timeout.timed_out() && newest == Some(seen) && !state.shutdown {
            return state.pending.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banco_engine::Rank;

    fn job(shoe: ShoeState) -> Job {
        Job {
            shoe,
            payouts: PayoutTable::default(),
            rebate: 0.0,
        }
    }

    #[test]
    fn test_submit_and_wait() {
        let recalc = Recalculator::spawn(Duration::ZERO).unwrap();
        let generation = recalc.submit(job(ShoeState::full(1)));
        let done = recalc.wait_for(generation).unwrap();
        assert_eq!(done.generation, generation);
        let result = done.result.unwrap();
        assert_eq!(result.total_cards, 52);
        assert_eq!(recalc.latest().unwrap().generation, generation);
    }

    #[test]
    fn test_latest_submission_wins() {
        let recalc = Recalculator::spawn(Duration::from_millis(50)).unwrap();
        let mut shoe = ShoeState::full(1);
        let generations: Vec<u64> = [Rank::new(2), Rank::new(3), Rank::new(4)]
            .into_iter()
            .map(|rank| {
                shoe.remove(rank);
                recalc.submit(job(shoe))
            })
            .collect();
        assert_eq!(generations, vec![1, 2, 3]);
        let last = generations[2];
        let done = recalc.wait_for(last).unwrap();
        assert_eq!(done.generation, last);
        assert_eq!(done.result.unwrap().total_cards, 49);
        assert_eq!(recalc.latest().unwrap().generation, last);
    }

    #[test]
    fn test_errors_are_delivered() {
        let recalc = Recalculator::spawn(Duration::ZERO).unwrap();
        let generation = recalc.submit(job(ShoeState::empty()));
        let done = recalc.wait_for(generation).unwrap();
        assert!(matches!(
            done.result,
            Err(EngineError::InsufficientCards { remaining: 0, .. })
        ));
    }

    #[test]
    fn test_reprice_matches_fresh_calculation() {
        let recalc = Recalculator::spawn(Duration::ZERO).unwrap();
        let shoe = ShoeState::full(1).without_rank(Rank::new(9));
        let first = recalc.submit(job(shoe));
        recalc.wait_for(first).unwrap();

        let mut edited = job(shoe);
        edited.payouts.tie = 9.0;
        edited.rebate = 0.01;
        let second = recalc.submit(edited.clone());
        let cached = recalc.wait_for(second).unwrap().result.unwrap();
        let fresh =
            banco_engine::calculate_ev(&edited.shoe, &edited.payouts, edited.rebate).unwrap();
        assert_eq!(cached, fresh);
    }

    #[test]
    fn test_drop_joins_worker() {
        let recalc = Recalculator::spawn(Duration::from_secs(60)).unwrap();
        recalc.submit(job(ShoeState::full(1)));
        // Debounce never elapses; dropping must still return promptly
        drop(recalc);
    }
}
