//! HTTP server implementation using Hyper
//!
//! Routes:
//! - `GET  /health`        → `{"status":"ok"}`
//! - `POST /code-analysis` → `AnalysisReport` or `ErrorBody`

use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Incoming};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::error::{ErrorBody, OrchestratorError, Result};
use crate::orchestrator::AnalysisOrchestrator;

pub const HEALTH_PATH: &str = "/health";
pub const ANALYSIS_PATH: &str = "/code-analysis";

/// `POST /code-analysis` body; a missing or null `code` counts as empty
#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    #[serde(default)]
    code: Option<String>,
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

/// Shared request handler state
pub struct AppState {
    orchestrator: Arc<AnalysisOrchestrator>,
    max_body_bytes: usize,
}

impl AppState {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>, max_body_bytes: usize) -> Self {
        Self {
            orchestrator,
            max_body_bytes,
        }
    }

    /// Route one request
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (method, path) = (req.method().clone(), req.uri().path().to_string());
        debug!(%method, %path, "request received");

        match (method, path.as_str()) {
            (Method::GET, HEALTH_PATH) => json_response(StatusCode::OK, &HealthBody { status: "ok" }),
            (Method::POST, ANALYSIS_PATH) => self.code_analysis(req.into_body()).await,
            (_, ANALYSIS_PATH) => {
                let mut response = json_response(
                    StatusCode::METHOD_NOT_ALLOWED,
                    &ErrorBody::new("Method not allowed", "Use POST for /code-analysis"),
                );
                response
                    .headers_mut()
                    .insert(ALLOW, HeaderValue::from_static("POST"));
                response
            }
            _ => json_response(
                StatusCode::NOT_FOUND,
                &ErrorBody::new("Not found", format!("No route for {}", path)),
            ),
        }
    }

    async fn code_analysis<B>(&self, body: B) -> Response<Full<Bytes>>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let bytes = match Limited::new(body, self.max_body_bytes).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                return json_response(
                    StatusCode::BAD_REQUEST,
                    &ErrorBody::new("Invalid request body", e.to_string()),
                )
            }
        };

        let request: AnalysisRequest = match serde_json::from_slice(&bytes) {
            Ok(request) => request,
            Err(e) => {
                return json_response(
                    StatusCode::BAD_REQUEST,
                    &ErrorBody::new("Invalid request body", e.to_string()),
                )
            }
        };

        let code = request.code.unwrap_or_default();
        match self.orchestrator.analyze(&code).await {
            Ok(report) => json_response(StatusCode::OK, &report),
            Err(failure) => json_response(failure.status(), &failure.body()),
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let (status, payload) = match serde_json::to_vec(body) {
        Ok(payload) => (status, payload),
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"error":"Internal server error","details":"Response serialization failed"}"#
                    .to_vec(),
            )
        }
    };

    let mut response = Response::new(Full::new(Bytes::from(payload)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// API server using Hyper
pub struct AnalysisServer {
    bind_address: SocketAddr,
    state: Arc<AppState>,
}

impl AnalysisServer {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>, config: &ServerConfig) -> Result<Self> {
        let bind_address: SocketAddr = config
            .bind_address
            .parse()
            .map_err(|e| OrchestratorError::config(format!("Invalid bind address: {}", e)))?;

        Ok(Self {
            bind_address,
            state: Arc::new(AppState::new(orchestrator, config.max_body_bytes)),
        })
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Bind and serve until the process stops
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.bind_address).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!("qscan listening on http://{}", listener.local_addr()?);

        loop {
            let (stream, remote_addr) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    continue;
                }
            };

            let io = TokioIo::new(stream);
            let state = Arc::clone(&self.state);

            tokio::task::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let state = Arc::clone(&state);
                    async move { Ok::<_, Infallible>(state.handle(req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection from {}: {}", remote_addr, err);
                }
            });
        }
    }
}
