use anyhow::bail;
use clap::{Parser, ValueEnum};

/// Runtime configuration for the `shipping-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first when present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shipping-server",
    version,
    about = "A gRPC service that quotes shipping costs and ships orders"
)]
pub struct CliArgs {
    /// Host or IP address to listen on.
    ///
    /// Environment variable: `HOST`
    #[arg(long, env = "HOST", default_value_t = String::from("0.0.0.0"))]
    pub host: String,

    /// TCP port to listen on.
    ///
    /// Environment variable: `PORT`
    #[arg(long, env = "PORT", default_value_t = 50051)]
    pub port: u16,

    /// OTLP/gRPC collector that receives exported spans, e.g.
    /// `otel-collector:4317`. `http://` is assumed when no scheme is given.
    /// The server refuses to start without it.
    ///
    /// Environment variable: `OTEL_EXPORTER_OTLP_ENDPOINT`
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Console log format.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-readable output.
    Pretty,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub otlp_endpoint: String,
    pub log_format: LogFormat,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let endpoint = args.otlp_endpoint.unwrap_or_default();
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            bail!("OTEL_EXPORTER_OTLP_ENDPOINT must not be empty");
        }

        if args.host.trim().is_empty() {
            bail!("HOST must not be empty");
        }

        let otlp_endpoint = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("http://{endpoint}")
        };

        Ok(Self {
            server_addr: format!("{}:{}", args.host.trim(), args.port),
            otlp_endpoint,
            log_format: args.log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let argv = std::iter::once("shipping-server").chain(extra.iter().copied());
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn missing_endpoint_is_fatal() {
        let mut cli = args(&[]);
        cli.otlp_endpoint = None;
        let err = ServerConfig::try_from(cli).unwrap_err();
        assert_eq!(
            err.to_string(),
            "OTEL_EXPORTER_OTLP_ENDPOINT must not be empty"
        );

        let cli = args(&["--otlp-endpoint", "  "]);
        assert!(ServerConfig::try_from(cli).is_err());
    }

    #[test]
    fn builds_listen_address_from_host_and_port() {
        let cli = args(&[
            "--host",
            "127.0.0.1",
            "--port",
            "6000",
            "--otlp-endpoint",
            "collector:4317",
        ]);
        let config = ServerConfig::try_from(cli).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:6000");
    }

    #[test]
    fn default_port_is_50051() {
        let cli = CliArgs::try_parse_from(["shipping-server", "--otlp-endpoint", "collector:4317"])
            .unwrap();
        if std::env::var_os("PORT").is_none() {
            assert_eq!(cli.port, 50051);
        }
    }

    #[test]
    fn endpoint_without_scheme_defaults_to_http() {
        let cli = args(&["--otlp-endpoint", "collector:4317"]);
        let config = ServerConfig::try_from(cli).unwrap();
        assert_eq!(config.otlp_endpoint, "http://collector:4317");

        let cli = args(&["--otlp-endpoint", "https://api.example.com:443"]);
        let config = ServerConfig::try_from(cli).unwrap();
        assert_eq!(config.otlp_endpoint, "https://api.example.com:443");
    }

    #[test]
    fn parses_log_format() {
        let cli = args(&["--log-format", "json"]);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
