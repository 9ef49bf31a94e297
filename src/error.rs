//! Error taxonomy for the deposit flow.
//!
//! Each step of the flow fails with its own error type so callers can tell
//! a provider-reported failure apart from a transport or decode failure.
//! Application-level errors (a top-level `error` field in a parsed provider
//! response) are kept as distinct `Api` variants even though the current
//! callers log them identically.

use thiserror::Error;

/// Failure while establishing a provider session (flow step 1).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The HTTP request itself failed (connect, timeout, TLS, ...).
    #[error("session request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expect.
    #[error("failed to decode session response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider reported an application-level error.
    #[error("provider rejected session: {0}")]
    Api(String),

    /// The response parsed but carried no session token.
    #[error("session token not found in response data")]
    MissingToken,
}

/// Failure while discovering eligible bank accounts (flow step 2).
///
/// An empty account list is *not* a `DiscoveryError`; the flow maps it to
/// [`FlowError::NoAccounts`].
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("accounts request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode accounts response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider rejected account discovery: {0}")]
    Api(String),

    /// The response parsed but the `data` field was absent.
    #[error("account list not found in response")]
    MissingData,
}

/// Invalid operator input during account selection (flow step 3).
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("selection is not a number: {0:?}")]
    NotANumber(String),

    #[error("selection {chosen} is out of range 1..={max}")]
    OutOfRange { chosen: usize, max: usize },

    #[error("failed to read selection: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while submitting the deposit (flow step 5).
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("deposit request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode deposit response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider rejected deposit: {0}")]
    Api(String),

    /// The only field the flow treats as mandatory.
    #[error("transactionId not found in response data")]
    MissingTransactionId,
}

/// Terminal failure of a deposit flow. Each variant wraps the step that
/// aborted it; no partial record is ever produced.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("failed to initialize session: {0}")]
    Session(#[from] SessionError),

    #[error("failed to get accounts: {0}")]
    Discovery(#[from] DiscoveryError),

    /// The provider legitimately returned zero accounts. The flow cannot
    /// deposit to nothing, so this is terminal rather than an empty success.
    #[error("no accounts available")]
    NoAccounts,

    #[error("invalid selection: {0}")]
    Selection(#[from] SelectionError),

    /// The selected account had no sub-accounts, or its first sub-account
    /// carried no fields to submit against.
    #[error("selected account has no usable sub-account")]
    UnusableAccount,

    #[error("deposit failed: {0}")]
    Submission(#[from] SubmissionError),
}

/// The configured provider name has no registered constructor.
#[derive(Debug, Error)]
#[error("unsupported aggregator: {0:?}")]
pub struct UnsupportedProvider(pub String);

/// Persistence collaborator failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_is_propagated() {
        let err = SubmissionError::Api("insufficient merchant balance".to_string());
        assert!(err.to_string().contains("insufficient merchant balance"));

        let flow_err = FlowError::from(err);
        assert!(flow_err.to_string().contains("insufficient merchant balance"));
    }

    #[test]
    fn test_selection_out_of_range_display() {
        let err = SelectionError::OutOfRange { chosen: 7, max: 3 };
        assert_eq!(err.to_string(), "selection 7 is out of range 1..=3");
    }

    #[test]
    fn test_unsupported_provider_display() {
        let err = UnsupportedProvider("acmepay".to_string());
        assert_eq!(err.to_string(), "unsupported aggregator: \"acmepay\"");
    }
}
