#![doc = include_str!("../README.md")]

mod server;

use anyhow::Context;
use clap::Parser;
use futures::Stream;
use server::config::{CliArgs, ServerConfig};
use server::service::{handler::ShippingHandler, health::HealthResponder};
use server::telemetry::init_telemetry;
use shipping_core::{
    QuoteGenerator,
    proto::{FILE_DESCRIPTOR_SET, shipping_service_server::ShippingServiceServer},
    quote::{CostSource, LatencySimulator, ThreadRandomCost, TokioLatency},
};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::server::Connected;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_health::pb::health_server::HealthServer;
use tonic_reflection::server::Builder;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    let providers = init_telemetry(&config)?;

    let tcp = TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("failed to listen on {}", config.server_addr))
        .inspect_err(|e| tracing::error!("{e:#}"))?;
    let incoming = TcpListenerStream::new(tcp);
    log_startup_info(&config);

    let handler = ShippingHandler::new(QuoteGenerator::new(ThreadRandomCost, TokioLatency));
    let res = serve(incoming, handler, shutdown_signal()).await;
    if let Err(e) = &res {
        tracing::error!("failed to serve: {e:#}");
    }

    providers.shutdown();
    res
}

/// Serves the shipping, health and reflection services on `incoming` until
/// `shutdown` resolves.
async fn serve<I, IO, IE, C, L>(
    incoming: I,
    handler: ShippingHandler<C, L>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()>
where
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IO::ConnectInfo: Clone + Send + Sync + 'static,
    IE: Into<tower::BoxError>,
    C: CostSource + Send + Sync + 'static,
    L: LatencySimulator + Send + Sync + 'static,
{
    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    Server::builder()
        .add_service(HealthServer::new(HealthResponder))
        .add_service(reflection)
        .add_service(build_shipping_service(handler))
        .serve_with_incoming_shutdown(incoming, shutdown)
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}

fn log_startup_info(config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Shipping Service listening on {} with full config: {:#?}",
            config.server_addr,
            config
        );
    } else {
        tracing::info!("Shipping Service listening on {}", config.server_addr);
    }
}

fn build_shipping_service<C, L>(
    handler: ShippingHandler<C, L>,
) -> ShippingServiceServer<ShippingHandler<C, L>>
where
    C: CostSource + Send + Sync + 'static,
    L: LatencySimulator + Send + Sync + 'static,
{
    ShippingServiceServer::new(handler)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");
}
