//! Error types for the shipping service.
//!
//! This module defines the central `Error` enum covering every failure that
//! can be reported to a caller. It implements `From<Error>` for
//! `tonic::Status` so handlers can propagate errors with `?` and have them
//! surface with an appropriate gRPC status code.
//!
//! ## Error Cases
//! - `InvalidRequest`: The client request was malformed.
//! - `Unimplemented`: The operation exists on the wire but is not served.

use tonic::Status;

/// Unified error type for the shipping service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The client request was invalid.
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// The requested operation is not served by this process.
    #[error("{operation} not implemented")]
    Unimplemented { operation: &'static str },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidRequest { reason } => Status::invalid_argument(reason),
            err @ Error::Unimplemented { .. } => Status::unimplemented(err.to_string()),
        }
    }
}
