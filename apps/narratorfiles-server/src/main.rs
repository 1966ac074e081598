//! narratorfiles server - browse and play audio from an S3-compatible bucket.
//!
//! Lists a bucket (optionally confined to a key prefix) as navigable
//! directories, redirects downloads to presigned URLs, and plays audio in the
//! browser.
//!
//! # Usage
//!
//! ```text
//! STORE_ENDPOINT=http://localhost:9000 STORE_REGION=us-east-1 \
//! STORE_ACCESS_KEY_ID=... STORE_SECRET_ACCESS_KEY=... \
//! STORE_BUCKET=audiobooks narratorfiles-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STORE_ACCESS_KEY_ID` | *(required)* | Store access key |
//! | `STORE_SECRET_ACCESS_KEY` | *(required)* | Store secret key |
//! | `STORE_ENDPOINT` | *(required)* | Store API endpoint URL |
//! | `STORE_REGION` | *(required)* | Store region |
//! | `STORE_BUCKET` | *(required)* | Bucket to browse |
//! | `STORE_PREFIX` | *(empty)* | Key prefix confining the browsable namespace |
//! | `GATEWAY_LISTEN` | `0.0.0.0:8082` | Bind address |
//! | `STORE_TIMEOUT_SECS` | `30` | Deadline for the store calls of one request |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use narratorfiles_core::{ObjectBrowser, S3Store, ServerConfig, StoreConfig};
use narratorfiles_http::{
    BrowserHandler, CatchPanic, HttpService, RequestHandler, Resources, TraceRequests,
};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Assemble the request pipeline: handler, panic isolation, then tracing.
fn build_service(
    store_config: &StoreConfig,
    server_config: &ServerConfig,
    resources: Resources,
) -> HttpService<impl RequestHandler> {
    let store = S3Store::new(store_config);
    let browser = ObjectBrowser::new(
        store,
        &store_config.key_prefix,
        server_config.store_timeout(),
    );
    let handler = BrowserHandler::new(Arc::new(browser), Arc::new(resources));
    HttpService::new(TraceRequests::new(CatchPanic::new(handler)))
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<H: RequestHandler>(listener: TcpListener, service: HttpService<H>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Address to probe for a given bind address; wildcard binds are probed on loopback.
fn probe_addr(gateway_listen: &str) -> String {
    gateway_listen.replace("0.0.0.0", "127.0.0.1")
}

/// Whether a raw HTTP response is a healthy `/_health` answer.
fn is_healthy_response(response: &str) -> bool {
    response.starts_with("HTTP/1.1 200") && response.contains(r#""status":"running""#)
}

/// Perform a health check by connecting to the server and requesting `/_health`.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /_health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if is_healthy_response(&response) {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let server_config = ServerConfig::from_env().context("invalid server configuration")?;

    // Handle --health-check flag for container health probes.
    if std::env::args().any(|a| a == "--health-check") {
        let healthy = run_health_check(&probe_addr(&server_config.gateway_listen))
            .await
            .is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&server_config.log_level)?;

    let store_config = StoreConfig::from_env().context("invalid store configuration")?;
    let resources = Resources::load().context("failed to load bundled templates")?;

    info!(
        gateway_listen = %server_config.gateway_listen,
        endpoint = %store_config.endpoint,
        region = %store_config.region,
        bucket = %store_config.bucket,
        key_prefix = %store_config.key_prefix,
        store_timeout_secs = server_config.store_timeout_secs,
        version = VERSION,
        "starting narratorfiles server",
    );

    let service = build_service(&store_config, &server_config, resources);

    let addr: SocketAddr = server_config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", server_config.gateway_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
