//! Mapping transport and bank failures onto [`LoadError`].

use trivia_core::LoadError;

/// Classify a reqwest failure.
pub(crate) fn from_transport(err: reqwest::Error, base_url: &str, timeout_secs: u64) -> LoadError {
    if err.is_timeout() {
        LoadError::NetworkFailure(format!("request timed out after {timeout_secs}s"))
    } else if err.is_connect() {
        LoadError::NetworkFailure(format!("question bank not reachable at {base_url}"))
    } else {
        LoadError::NetworkFailure(err.to_string())
    }
}

/// Open Trivia DB signals problems through `response_code` rather than HTTP status.
///
/// Returns `Ok(true)` for success, `Ok(false)` when the bank has too few
/// questions for the query.
pub(crate) fn check_response_code(code: u32) -> Result<bool, LoadError> {
    let reason = match code {
        0 => return Ok(true),
        1 => return Ok(false),
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token has returned all questions",
        5 => "rate limited, wait a few seconds",
        _ => "unknown response code",
    };
    Err(LoadError::Rejected {
        code,
        reason: reason.to_string(),
    })
}
