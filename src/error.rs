//! Error types for environment propagation.
//!
//! Transport failures are deliberately non-fatal for the job as a whole: a
//! failed peer call still counts as a completion. These types exist so that
//! `BusTransport` implementations have a uniform error channel and so that
//! diagnostics carry enough context to identify the failing peer.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A transport-level failure while calling a peer.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors produced by `BusTransport` implementations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The bus connection is closed or was lost mid-call.
    #[error("bus connection closed")]
    ConnectionClosed,

    /// The peer rejected or failed the call.
    #[error("call to {service} failed: {message}")]
    CallFailed {
        /// Bus service name of the peer that failed.
        service: String,
        /// Error message reported by the peer or the bus.
        message: String,
    },

    /// An I/O error from the underlying connection.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_failed_display_names_the_peer() {
        let err = TransportError::CallFailed {
            service: "org.freedesktop.systemd1".to_string(),
            message: "no such method".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "call to org.freedesktop.systemd1 failed: no such method"
        );
    }

    #[test]
    fn transport_error_converts_to_error() {
        let err: Error = TransportError::ConnectionClosed.into();
        assert!(matches!(err, Error::Transport(TransportError::ConnectionClosed)));
    }
}
