use axum::{
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::fixtures::JudgeScript;
use crate::handlers::{create_submission, get_submission, health_check};

/// One request as the mock saw it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    pub body: Option<Value>,
}

pub struct MockState {
    pub script: JudgeScript,
    pub requests: Vec<RecordedRequest>,
    pub sources: HashMap<String, String>,
}

pub type SharedState = Arc<Mutex<MockState>>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/submissions", post(create_submission))
        .route("/submissions/{token}", get(get_submission))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn shared_state(script: JudgeScript) -> SharedState {
    Arc::new(Mutex::new(MockState {
        script,
        requests: Vec::new(),
        sources: HashMap::new(),
    }))
}

/// Judge0 look-alike bound to an ephemeral local port
pub struct MockJudgeServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    state: SharedState,
}

impl MockJudgeServer {
    pub async fn start(script: JudgeScript) -> anyhow::Result<Self> {
        let state = shared_state(script);
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tracing::info!("Mock judge server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
            {
                tracing::error!("Mock judge server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            shutdown_tx,
            state,
        })
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn submissions(&self) -> Vec<RecordedRequest> {
        self.requests_with_method("POST").await
    }

    pub async fn polls(&self) -> Vec<RecordedRequest> {
        self.requests_with_method("GET").await
    }

    async fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            tracing::warn!("Mock judge server already stopped");
        }
    }
}

/// Serve `script` on `addr` until `shutdown` resolves
pub async fn serve(
    addr: &str,
    script: JudgeScript,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr: SocketAddr = addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Judge mock serving on http://{}", addr);

    axum::serve(listener, router(shared_state(script)))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!("Judge mock server error: {}", e))
}
