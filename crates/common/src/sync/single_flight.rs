//! Single-flight execution
//!
//! A [`SingleFlight`] is a two-state machine:
//!
//! - **Idle**: no operation is running. The next call to [`SingleFlight::run`]
//!   starts one.
//! - **InFlight**: an operation is running. Calls to `run` await the same
//!   shared handle instead of starting another operation.
//!
//! The slot returns to Idle as soon as the operation settles, whatever its
//! output, so the next call after completion starts a fresh operation. A
//! panicking operation also returns the slot to Idle.
//! Transitions happen under a synchronous lock that is never held across an
//! `.await`.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::trace;

type SharedOperation<T> = Shared<BoxFuture<'static, T>>;

struct InFlight<T>
where
    T: Clone,
{
    generation: u64,
    operation: SharedOperation<T>,
}

type Slot<T> = Arc<Mutex<Option<InFlight<T>>>>;

/// Returns the slot to Idle when the operation completes, panics or is
/// dropped, unless a newer generation already took its place.
struct SettleGuard<T>
where
    T: Clone,
{
    slot: Weak<Mutex<Option<InFlight<T>>>>,
    generation: u64,
}

impl<T> Drop for SettleGuard<T>
where
    T: Clone,
{
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        // Take the entry out before releasing it so its Shared handle is
        // dropped outside the lock.
        let cleared = {
            let mut slot = slot.lock();
            if slot.as_ref().is_some_and(|in_flight| in_flight.generation == self.generation) {
                slot.take()
            } else {
                None
            }
        };
        drop(cleared);
    }
}

/// Coordinates at most one in-flight execution of an async operation.
///
/// # Examples
///
/// ```
/// use vocawik_common::sync::SingleFlight;
///
/// # futures::executor::block_on(async {
/// let flight = SingleFlight::new();
/// let (a, b) = futures::join!(
///     flight.run(|| async { 7 }),
///     flight.run(|| async { 8 }),
/// );
/// // The second caller joined the first operation.
/// assert_eq!((a, b), (7, 7));
/// assert!(flight.is_idle());
/// # });
/// ```
pub struct SingleFlight<T>
where
    T: Clone,
{
    slot: Slot<T>,
    generations: AtomicU64,
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self { slot: Arc::new(Mutex::new(None)), generations: AtomicU64::new(0) }
    }

    /// Runs the operation produced by `start`, or joins the one already in
    /// flight.
    ///
    /// `start` is only invoked when the slot is idle. It is called while the
    /// slot lock is held, so it must only construct the future and must not
    /// call back into this `SingleFlight`.
    pub async fn run<F, Fut>(&self, start: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let operation = self.join_or_start(start);
        operation.await
    }

    /// True when no operation is in flight
    pub fn is_idle(&self) -> bool {
        self.slot.lock().is_none()
    }

    fn join_or_start<F, Fut>(&self, start: F) -> SharedOperation<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let mut slot = self.slot.lock();
        if let Some(in_flight) = slot.as_ref() {
            trace!(generation = in_flight.generation, "joining in-flight operation");
            return in_flight.operation.clone();
        }

        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let pending = start();
        let guard = SettleGuard { slot: Arc::downgrade(&self.slot), generation };
        let operation = async move {
            let _settle = guard;
            pending.await
        }
        .boxed()
        .shared();

        trace!(generation, "starting operation");
        *slot = Some(InFlight { generation, operation: operation.clone() });
        operation
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SingleFlight<T>
where
    T: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let in_flight = self.slot.lock().as_ref().map(|in_flight| in_flight.generation);
        f.debug_struct("SingleFlight").field("in_flight", &in_flight).finish()
    }
}
