//! gRPC service implementations.
//!
//! - [`handler`] - Shipping service entry point (`ShippingHandler`).
//! - [`health`] - Liveness responder for the standard health protocol
//!   (`HealthResponder`).
//! - [`propagation`] - Trace context extraction from request metadata.

pub mod handler;
pub mod health;
pub mod propagation;
