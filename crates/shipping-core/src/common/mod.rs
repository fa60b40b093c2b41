//! Types shared by every component of the shipping service.
//!
//! - [`error`] - The service error type and its gRPC status mapping.
//! - [`proto`] - Generated Protobuf messages and service definitions.

pub mod error;
pub mod proto;

pub use error::Error;
