//! Shared error-code contract.
//!
//! Every error enum in the crate maps to a grepable `E_*` code and a
//! retryable flag so a host (error boundary, CLI, logs) can classify a
//! failure without matching on message text.

/// Grepable error code and retryable flag for structured error reporting.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
