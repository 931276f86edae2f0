// system-tests/tests/helpers/stub.rs
// ============================================================================
// Module: Stub Toolbox Server
// Description: In-process toolbox server implementing the wire contract.
// Purpose: Provide hermetic coverage of the SDK without cloud access.
// Dependencies: axum, serde_json, tokio
// ============================================================================

//! ## Overview
//! An in-process stand-in for the toolbox server, serving the same manifest
//! the e2e environment declares: `get-n-rows`, `get-row-by-id`, and the
//! auth-gated `get-row-by-id-auth`, grouped into `my-toolset` and
//! `my-toolset-2`. Every invocation is recorded (tool, token headers, body)
//! so suites can assert zero-network properties and observed header values.
//! The stub enforces the `{source}_token` header on the auth-gated tool and
//! answers 400/401 with the server's error body shape.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use tokio::task::JoinHandle;
use toolbox_sdk::ToolboxClient;

/// Auth source gating `get-row-by-id-auth`.
pub const AUTH_SOURCE: &str = "my-auth-service";

/// Header carrying tokens for [`AUTH_SOURCE`].
pub const AUTH_HEADER: &str = "my-auth-service_token";

/// Number of rows the stub's backing table holds.
const ROW_COUNT: usize = 5;

/// Tool names in default (full-manifest) order.
const DEFAULT_TOOLSET: [&str; 3] = ["get-n-rows", "get-row-by-id", "get-row-by-id-auth"];

/// One recorded invocation received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedInvoke {
    /// Invoked tool name.
    pub tool: String,
    /// Token headers observed on the request (`*_token` only).
    pub token_headers: BTreeMap<String, String>,
    /// Decoded JSON argument body.
    pub body: Value,
}

/// Shared stub state.
#[derive(Clone)]
struct StubState {
    /// Token accepted for the auth-gated tool.
    expected_token: String,
    /// Invocations observed so far.
    recorded: Arc<Mutex<Vec<RecordedInvoke>>>,
}

/// Handle for a spawned stub toolbox server.
pub struct StubToolboxHandle {
    /// Base URL the stub listens on.
    base_url: String,
    /// Serve task; aborted on shutdown.
    join: JoinHandle<()>,
    /// Invocations observed so far.
    recorded: Arc<Mutex<Vec<RecordedInvoke>>>,
}

impl StubToolboxHandle {
    /// Returns the stub base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds an SDK client for the stub.
    pub fn client(&self) -> Result<ToolboxClient, String> {
        ToolboxClient::new(&self.base_url).map_err(|err| format!("failed to build client: {err}"))
    }

    /// Returns a snapshot of recorded invocations.
    pub fn recorded_invocations(&self) -> Vec<RecordedInvoke> {
        self.recorded.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Returns how many invocations reached the stub.
    pub fn invocation_count(&self) -> usize {
        self.recorded.lock().map_or(0, |entries| entries.len())
    }

    /// Shuts down the serve task.
    pub async fn shutdown(self) {
        self.join.abort();
        let _ = self.join.await;
    }
}

/// Spawns a stub toolbox server accepting the given token on the auth tool.
pub async fn spawn_stub_toolbox(expected_token: &str) -> Result<StubToolboxHandle, String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("stub bind failed: {err}"))?;
    let addr = listener.local_addr().map_err(|err| format!("stub local addr failed: {err}"))?;
    let state = StubState {
        expected_token: expected_token.to_string(),
        recorded: Arc::new(Mutex::new(Vec::new())),
    };
    let recorded = Arc::clone(&state.recorded);
    let app = Router::new()
        .route("/api/tool/{name}", get(get_tool))
        .route("/api/tool/{name}/invoke", post(invoke_tool))
        .route("/api/toolset/", get(get_default_toolset))
        .route("/api/toolset/{name}", get(get_named_toolset))
        .with_state(state);
    let join = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(StubToolboxHandle {
        base_url: format!("http://{addr}"),
        join,
        recorded,
    })
}

// ============================================================================
// SECTION: Manifest Fixtures
// ============================================================================

/// Returns the schema for a known tool name.
fn tool_schema(name: &str) -> Option<Value> {
    match name {
        "get-n-rows" => Some(json!({
            "description": "Returns the first N rows of the test table.",
            "parameters": [
                {"name": "num_rows", "type": "string", "description": "Row count."}
            ]
        })),
        "get-row-by-id" => Some(json!({
            "description": "Returns one row by id.",
            "parameters": [
                {"name": "id", "type": "string", "description": "Row id."}
            ]
        })),
        "get-row-by-id-auth" => Some(json!({
            "description": "Returns one row by id for authorized callers.",
            "parameters": [
                {"name": "id", "type": "string", "description": "Row id."},
                {
                    "name": "email",
                    "type": "string",
                    "description": "Caller email.",
                    "authSources": [AUTH_SOURCE]
                }
            ]
        })),
        _ => None,
    }
}

/// Returns the member tools of a named toolset, in manifest order.
fn toolset_members(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "my-toolset" => Some(&["get-row-by-id"]),
        "my-toolset-2" => Some(&["get-n-rows", "get-row-by-id"]),
        _ => None,
    }
}

/// Builds a manifest document for the given tool names.
fn manifest_with(names: &[&str]) -> Value {
    let mut tools = serde_json::Map::new();
    for name in names {
        if let Some(schema) = tool_schema(name) {
            tools.insert((*name).to_string(), schema);
        }
    }
    json!({
        "serverVersion": "0.0.0-stub",
        "tools": Value::Object(tools)
    })
}

/// Builds the error body shape the real server uses.
fn error_body(message: &str) -> Json<Value> {
    Json(json!({ "error": message }))
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Serves the single-tool manifest endpoint.
async fn get_tool(Path(name): Path<String>) -> (StatusCode, Json<Value>) {
    if tool_schema(&name).is_none() {
        return (StatusCode::NOT_FOUND, error_body(&format!("tool {name} not found")));
    }
    (StatusCode::OK, Json(manifest_with(&[name.as_str()])))
}

/// Serves the default (all tools) toolset endpoint.
async fn get_default_toolset() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(manifest_with(&DEFAULT_TOOLSET)))
}

/// Serves the named toolset endpoint.
async fn get_named_toolset(Path(name): Path<String>) -> (StatusCode, Json<Value>) {
    toolset_members(&name).map_or_else(
        || (StatusCode::NOT_FOUND, error_body(&format!("toolset {name} not found"))),
        |members| (StatusCode::OK, Json(manifest_with(members))),
    )
}

/// Serves the invocation endpoint, recording every request.
async fn invoke_tool(
    State(state): State<StubState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record_invoke(&state, &name, &headers, &body);
    match name.as_str() {
        "get-n-rows" => invoke_get_n_rows(&body),
        "get-row-by-id" => invoke_get_row_by_id(&body),
        "get-row-by-id-auth" => invoke_get_row_by_id_auth(&state, &headers, &body),
        _ => (StatusCode::NOT_FOUND, error_body(&format!("tool {name} not found"))),
    }
}

/// Records one observed invocation.
fn record_invoke(state: &StubState, tool: &str, headers: &HeaderMap, body: &Value) {
    let token_headers = headers
        .iter()
        .filter(|(name, _)| name.as_str().ends_with("_token"))
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let Ok(mut guard) = state.recorded.lock() else {
        return;
    };
    guard.push(RecordedInvoke {
        tool: tool.to_string(),
        token_headers,
        body: body.clone(),
    });
}

/// Implements the `get-n-rows` behavior.
fn invoke_get_n_rows(body: &Value) -> (StatusCode, Json<Value>) {
    let Some(requested) = body.get("num_rows").and_then(Value::as_str) else {
        return (StatusCode::BAD_REQUEST, error_body("num_rows must be a string"));
    };
    let Ok(count) = requested.parse::<usize>() else {
        return (StatusCode::BAD_REQUEST, error_body("num_rows must be a positive integer"));
    };
    let rows: Vec<String> = (1..=count.min(ROW_COUNT)).map(|index| format!("row{index}")).collect();
    (StatusCode::OK, Json(json!({ "result": format!("[{}]", rows.join(", ")) })))
}

/// Implements the `get-row-by-id` behavior.
fn invoke_get_row_by_id(body: &Value) -> (StatusCode, Json<Value>) {
    let Some(id) = body.get("id").and_then(Value::as_str) else {
        return (StatusCode::BAD_REQUEST, error_body("id must be a string"));
    };
    (StatusCode::OK, Json(json!({ "result": format!("[row{id}]") })))
}

/// Implements the auth-gated `get-row-by-id-auth` behavior.
fn invoke_get_row_by_id_auth(
    state: &StubState,
    headers: &HeaderMap,
    body: &Value,
) -> (StatusCode, Json<Value>) {
    let token = headers.get(AUTH_HEADER).and_then(|value| value.to_str().ok());
    if token != Some(state.expected_token.as_str()) {
        return (StatusCode::UNAUTHORIZED, error_body("unauthorized"));
    }
    invoke_get_row_by_id(body)
}
