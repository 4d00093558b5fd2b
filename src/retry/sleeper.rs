use std::{thread, time::Duration};

/// Suspension point used between retry attempts.
pub trait Sleeper {
    /// Block the caller for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Blocks the current thread; not cancellable once entered.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}
