//! Standard `grpc.health.v1.Health` responder.
//!
//! The service has no degraded states: `Check` always answers `SERVING` and
//! streaming `Watch` is not offered.

use core::pin::Pin;
use shipping_core::Error;
use tokio_stream::Stream;
use tonic::{Request, Response, Status};
use tonic_health::pb::{
    HealthCheckRequest, HealthCheckResponse, health_check_response::ServingStatus,
    health_server::Health,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct HealthResponder;

#[tonic::async_trait]
impl Health for HealthResponder {
    type WatchStream = Pin<Box<dyn Stream<Item = Result<HealthCheckResponse, Status>> + Send>>;

    async fn check(
        &self,
        _req: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        Ok(Response::new(HealthCheckResponse {
            status: ServingStatus::Serving.into(),
        }))
    }

    async fn watch(
        &self,
        _req: Request<HealthCheckRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        Err(Error::Unimplemented {
            operation: "health check via Watch",
        }
        .into())
    }
}
