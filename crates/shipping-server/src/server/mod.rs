//! Server-side components of the shipping service.
//!
//! - [`config`] - CLI and environment configuration.
//! - [`service`] - gRPC handlers for the shipping and health services.
//! - [`telemetry`] - Structured logging and OpenTelemetry trace export.

pub mod config;
pub mod service;
pub mod telemetry;
