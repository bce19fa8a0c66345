//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, Sse},
        Json,
    },
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agents::{AgentRef, MockFinancialAgent, MockPolicyAgent, RemoteAgent};
use crate::config::Config;
use crate::task::{StartTask, Task, TaskManager, WorkUnit};
use crate::workflow::{financial, Workflow};

use super::types::*;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub manager: Arc<TaskManager>,
    /// The agent behind single-agent tasks
    pub financial_agent: AgentRef,
    /// The compliance workflow graph, built once at startup
    pub workflow: Arc<Workflow>,
}

/// Resolve an agent backend: remote when an endpoint is configured,
/// built-in mock otherwise.
fn resolve_agent(
    name: &str,
    url: Option<&str>,
    config: &Config,
    mock: AgentRef,
) -> AgentRef {
    match url {
        Some(endpoint) => {
            tracing::info!(agent = name, endpoint, "using remote agent backend");
            Arc::new(RemoteAgent::new(name, endpoint, config.agent_timeout))
        }
        None => {
            tracing::info!(agent = name, "no endpoint configured, using mock agent backend");
            mock
        }
    }
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let financial_agent = resolve_agent(
        "financial_analysis",
        config.financial_agent_url.as_deref(),
        &config,
        Arc::new(MockFinancialAgent::new()),
    );
    let policy_agent = resolve_agent(
        "policy_lookup",
        config.policy_agent_url.as_deref(),
        &config,
        Arc::new(MockPolicyAgent::new()),
    );

    let workflow = Arc::new(financial::compliance_workflow(
        Arc::clone(&financial_agent),
        policy_agent,
    ));
    tracing::info!(entry = workflow.entry_node(), "compliance workflow initialized");

    let state = Arc::new(AppState {
        config: config.clone(),
        manager: Arc::new(TaskManager::new()),
        financial_agent,
        workflow,
    });

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/task", post(create_task))
        .route("/api/task/:id", get(get_task))
        .route("/api/task/:id/cancel", post(cancel_task))
        .route("/api/task/:id/stream", get(stream_task))
        .route("/api/tasks", get(list_tasks))
        .route("/api/workflow/run", post(run_workflow))
        .route("/api/workflow/task", post(create_workflow_task))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGINT/SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "finflow".to_string(),
        financial_agent_url: state.config.financial_agent_url.clone(),
        policy_agent_url: state.config.policy_agent_url.clone(),
    })
}

/// Start a single-agent task.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Json<CreateTaskResponse> {
    let task = state
        .manager
        .start_task(
            StartTask {
                id: req.id,
                input: req.input_text,
            },
            WorkUnit::Agent(Arc::clone(&state.financial_agent)),
        )
        .await;

    Json(CreateTaskResponse {
        id: task.id,
        status: task.status,
    })
}

/// Run the compliance workflow as a tracked, cancellable task.
async fn create_workflow_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkflowTaskRequest>,
) -> Json<CreateTaskResponse> {
    let task = state
        .manager
        .start_task(
            StartTask {
                id: req.id,
                input: req.query,
            },
            WorkUnit::Workflow(Arc::clone(&state.workflow)),
        )
        .await;

    Json(CreateTaskResponse {
        id: task.id,
        status: task.status,
    })
}

/// Get task status and result.
async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, (StatusCode, String)> {
    state
        .manager
        .get_status(&id)
        .await
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Task {} not found", id)))
}

/// List all tasks.
async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<Vec<Task>> {
    Json(state.manager.list_tasks().await)
}

/// Cancel a task.
async fn cancel_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<CancelTaskResponse> {
    let cancelled = state.manager.cancel(&id).await;
    Json(CancelTaskResponse { id, cancelled })
}

/// Execute the compliance workflow synchronously.
async fn run_workflow(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunWorkflowRequest>,
) -> Json<RunWorkflowResponse> {
    // The synchronous surface has no cancel handle; the token exists to
    // satisfy the workflow contract and is never fired.
    let cancel = CancellationToken::new();

    match state.workflow.run(&req.query, &cancel).await {
        Ok(result) => Json(RunWorkflowResponse {
            status: RunStatus::Success,
            result,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "workflow run failed");
            Json(RunWorkflowResponse {
                status: RunStatus::Error,
                result: e.to_string(),
            })
        }
    }
}

/// Stream task progress via SSE.
async fn stream_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, std::convert::Infallible>>>, (StatusCode, String)>
{
    // Check task exists before opening the stream
    if state.manager.get_status(&id).await.is_none() {
        return Err((StatusCode::NOT_FOUND, format!("Task {} not found", id)));
    }

    let stream = async_stream::stream! {
        let mut last_status = None;

        loop {
            let Some(task) = state.manager.get_status(&id).await else {
                break;
            };

            if last_status != Some(task.status) {
                last_status = Some(task.status);
                let event = Event::default()
                    .event("status")
                    .json_data(serde_json::json!({ "status": task.status }))
                    .unwrap_or_default();
                yield Ok(event);
            }

            if task.status.is_terminal() {
                let event = Event::default()
                    .event("done")
                    .json_data(serde_json::json!({
                        "status": task.status,
                        "result": task.result,
                        "error": task.error,
                    }))
                    .unwrap_or_default();
                yield Ok(event);
                break;
            }

            // Poll interval
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        }
    };

    Ok(Sse::new(stream))
}
