//! Attempt loop driving a single collector request.

use log::{info, warn};

use crate::collector::{HttpResponse, TransportFailure};

use super::{
    classify::{Classification, classify_status},
    outcome::Outcome,
    policy::RetryPolicy,
    sleeper::{Sleeper, ThreadSleeper},
};

/// Wraps a single-shot request with classification and backoff.
///
/// The engine holds no per-record state; every call to [`execute`](Self::execute)
/// starts from attempt zero and the policy's initial backoff.
pub struct RetryEngine {
    policy: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
}

impl RetryEngine {
    /// Create an engine that blocks the current thread between attempts.
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, Box::new(ThreadSleeper))
    }

    /// Create an engine with a custom suspension strategy.
    pub fn with_sleeper(policy: RetryPolicy, sleeper: Box<dyn Sleeper>) -> Self {
        Self { policy, sleeper }
    }

    /// Run `attempt` until it yields a terminal classification or the policy's
    /// attempt budget is spent.
    ///
    /// `attempt` must perform exactly one request. Transport failures and
    /// unclassified statuses (5xx included) are logged and retried after the
    /// delay given by [`RetryPolicy::backoff_before`].
    pub fn execute<F>(&self, mut attempt: F) -> Outcome
    where
        F: FnMut() -> Result<HttpResponse, TransportFailure>,
    {
        let max = self.policy.max_attempts;

        for attempts in 1..=max {
            if let Some(backoff) = self.policy.backoff_before(attempts) {
                info!("retrying collector request in {backoff:?}");
                self.sleeper.sleep(backoff);
            }

            let response = match attempt() {
                Ok(response) => response,
                Err(failure) => {
                    warn!("collector request failed (attempt {attempts}/{max}): {failure}");
                    continue;
                }
            };

            match classify_status(response.status, &response.status_text) {
                Classification::Success => {
                    return Outcome::Delivered {
                        status: response.status,
                    };
                }
                Classification::Reject(rejection) => {
                    log_refusal_body(&response);
                    return Outcome::Rejected(rejection);
                }
                Classification::Throttle => {
                    log_refusal_body(&response);
                    return Outcome::Throttled {
                        status: response.status,
                        reason: throttle_reason(&response),
                    };
                }
                Classification::Retry => {
                    warn!(
                        "collector returned unclassified status {} (attempt {attempts}/{max})",
                        response.status
                    );
                }
            }
        }

        Outcome::Exhausted { attempts: max }
    }
}

fn log_refusal_body(response: &HttpResponse) {
    let body = response.body.trim();
    if !body.is_empty() {
        warn!("collector response (HTTP {}): {body}", response.status);
    }
}

fn throttle_reason(response: &HttpResponse) -> String {
    if response.status_text.is_empty() {
        "too many requests".to_owned()
    } else {
        response.status_text.clone()
    }
}
