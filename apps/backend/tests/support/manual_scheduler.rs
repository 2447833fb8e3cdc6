//! Scheduler that only queues tasks; the test decides when they run.
//!
//! Cancellation is recorded but ignored when firing, so tests can drive a
//! stale timer into its handler.

use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use spades_backend::services::timeouts::{Scheduler, TimerHandle};
use tokio_util::sync::CancellationToken;

pub struct Scheduled {
    pub delay: Duration,
    pub generation: u64,
    pub handle: TimerHandle,
    pub task: BoxFuture<'static, ()>,
}

#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<Vec<Scheduled>>,
}

impl ManualScheduler {
    pub fn take_all(&self) -> Vec<Scheduled> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, generation: u64, task: BoxFuture<'static, ()>) -> TimerHandle {
        let handle = TimerHandle::new(CancellationToken::new(), generation);
        self.queue.lock().push(Scheduled {
            delay,
            generation,
            handle: handle.clone(),
            task,
        });
        handle
    }
}
