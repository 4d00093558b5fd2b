use super::outcome::Rejection;

/// Classification of an HTTP response for retry logic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// 2xx responses - request succeeded.
    Success,
    /// 4xx (except 429) - permanent failure, do not retry.
    Reject(Rejection),
    /// 429 - rate limited, terminal for the engine.
    Throttle,
    /// Everything not matched above - try again after backoff.
    Retry,
}

/// Classifies an HTTP status code for retry logic.
///
/// # Classification rules
///
/// * **2xx** → [`Classification::Success`]
/// * **400** → [`Rejection::UnexpectedPayload`]
/// * **403** → [`Rejection::InvalidCredential`]
/// * **404** → [`Rejection::InvalidEndpoint`]
/// * **429** → [`Classification::Throttle`]
/// * **Other 4xx** → [`Rejection::Other`] carrying `status_text`
/// * **Other** (1xx, 3xx, 5xx) → [`Classification::Retry`]
///
/// 5xx is retried only because no rule matches it.
pub fn classify_status(status: u16, status_text: &str) -> Classification {
    match status {
        200..=299 => Classification::Success,
        400..=499 => classify_client_error(status, status_text),
        _ => Classification::Retry,
    }
}

fn classify_client_error(status: u16, status_text: &str) -> Classification {
    let rejection = match status {
        400 => Rejection::UnexpectedPayload,
        403 => Rejection::InvalidCredential,
        404 => Rejection::InvalidEndpoint,
        429 => return Classification::Throttle,
        _ => Rejection::Other {
            status,
            reason: status_text.to_owned(),
        },
    };
    Classification::Reject(rejection)
}
