//! Retry policy engine wrapping a single-shot collector request.
//!
//! [`RetryEngine`] invokes an attempt closure up to
//! [`RetryPolicy::max_attempts`] times, sleeping between attempts with a
//! geometrically growing backoff. Each HTTP response is mapped through
//! [`classify_status`] into one of four classes:
//!
//! - **2xx**: Success - return [`Outcome::Delivered`] immediately.
//! - **429 (Too Many Requests)**: Throttled - terminal, never looped on here.
//! - **4xx (except 429)**: Rejected - terminal, the record is abandoned.
//! - **Anything else** (5xx included) and **transport errors**: retry.
//!
//! When every attempt is spent without a terminal class the engine yields
//! [`Outcome::Exhausted`].

mod classify;
mod engine;
mod outcome;
mod policy;
mod sleeper;


pub use classify::{Classification, classify_status};
pub use engine::RetryEngine;
pub use outcome::{Outcome, Rejection};
pub use policy::{
    DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_ATTEMPTS, RetryPolicy,
};
pub use sleeper::{Sleeper, ThreadSleeper};
