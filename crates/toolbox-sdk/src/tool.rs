// crates/toolbox-sdk/src/tool.rs
// ============================================================================
// Module: Invokable Tool
// Description: Client-side handle for invoking one loaded toolbox tool.
// Purpose: Validate arguments locally, attach auth headers, and invoke.
// Dependencies: reqwest, serde_json
// ============================================================================

//! ## Overview
//! A [`ToolboxTool`] is the invokable object returned by `load_tool` and
//! `load_toolset`. Invocation validates the call locally first: parameters
//! gated on an unbound auth source fail with a login-required error, and
//! omitted required parameters fail with a validation error, both before any
//! network request is issued. Auth bindings are evaluated fresh per call and
//! attached as `{source}_token` headers.
//!
//! Security posture: server responses are untrusted; status errors surface
//! the server's message verbatim without interpretation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Client;
use serde_json::Map;
use serde_json::Value;
use url::Url;

use crate::auth;
use crate::auth::AuthSources;
use crate::error::ToolboxError;
use crate::manifest::InvokeResponse;
use crate::manifest::ToolSchema;
use crate::manifest::error_message;

// ============================================================================
// SECTION: Tool Handle
// ============================================================================

/// Invokable handle for a single loaded tool.
///
/// # Invariants
/// - The schema and auth bindings are captured at load time and immutable.
/// - Local validation always precedes network I/O.
#[derive(Debug, Clone)]
pub struct ToolboxTool {
    /// Tool name, unique within its toolset.
    name: String,
    /// Parameter schema fetched from the server at load time.
    schema: ToolSchema,
    /// Invocation endpoint for this tool.
    invoke_url: Url,
    /// Shared HTTP client.
    http: Client,
    /// Merged auth bindings (global overlaid with per-load overrides).
    auth_sources: AuthSources,
}

impl ToolboxTool {
    /// Creates a tool handle from a fetched schema.
    pub(crate) const fn new(
        name: String,
        schema: ToolSchema,
        invoke_url: Url,
        http: Client,
        auth_sources: AuthSources,
    ) -> Self {
        Self {
            name,
            schema,
            invoke_url,
            http,
            auth_sources,
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tool's parameter schema.
    #[must_use]
    pub const fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Invokes the tool with named arguments.
    ///
    /// Auth-gated parameters are excluded from the outgoing body; the server
    /// derives them from the attached token headers. Every merged binding is
    /// evaluated immediately before the request, so lazily-bound providers
    /// hand out call-time tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::AuthRequired`] or
    /// [`ToolboxError::MissingArguments`] on local validation failure (no
    /// network request is issued), [`ToolboxError::TokenResolve`] when a
    /// binding fails, [`ToolboxError::Server`] when the server rejects the
    /// call, and [`ToolboxError::Transport`] on connection failures.
    pub async fn invoke(
        &self,
        args: Map<String, Value>,
    ) -> Result<InvokeResponse, ToolboxError> {
        validate_auth_bindings(&self.name, &self.schema, &self.auth_sources)?;
        validate_arguments(&self.name, &self.schema, &args)?;

        let body = strip_auth_parameters(&self.schema, args);
        let tokens = self.auth_sources.resolve_all()?;

        let mut request = self.http.post(self.invoke_url.clone()).json(&body);
        for (source, token) in tokens {
            request = request.header(auth::header_name(&source), token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ToolboxError::Server {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        let parsed: InvokeResponse = serde_json::from_str(&text)?;
        Ok(parsed)
    }
}

// ============================================================================
// SECTION: Local Validation
// ============================================================================

/// Ensures every auth-gated parameter has at least one bound source.
///
/// # Errors
///
/// Returns [`ToolboxError::AuthRequired`] for the first unsatisfied
/// parameter.
pub(crate) fn validate_auth_bindings(
    tool: &str,
    schema: &ToolSchema,
    sources: &AuthSources,
) -> Result<(), ToolboxError> {
    for parameter in &schema.parameters {
        if !parameter.requires_auth() {
            continue;
        }
        let satisfied = parameter.auth_sources.iter().any(|source| sources.contains(source));
        if !satisfied {
            return Err(ToolboxError::AuthRequired {
                tool: tool.to_string(),
                parameter: parameter.name.clone(),
                sources: parameter.auth_sources.clone(),
            });
        }
    }
    Ok(())
}

/// Ensures every non-auth parameter is present in the argument map.
///
/// # Errors
///
/// Returns [`ToolboxError::MissingArguments`] listing every omitted name.
pub(crate) fn validate_arguments(
    tool: &str,
    schema: &ToolSchema,
    args: &Map<String, Value>,
) -> Result<(), ToolboxError> {
    let missing: Vec<String> = schema
        .parameters
        .iter()
        .filter(|parameter| !parameter.requires_auth())
        .filter(|parameter| !args.contains_key(&parameter.name))
        .map(|parameter| parameter.name.clone())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ToolboxError::MissingArguments {
            tool: tool.to_string(),
            names: missing,
        })
    }
}

/// Removes auth-gated parameters from the outgoing argument body.
pub(crate) fn strip_auth_parameters(
    schema: &ToolSchema,
    mut args: Map<String, Value>,
) -> Map<String, Value> {
    for parameter in &schema.parameters {
        if parameter.requires_auth() {
            args.remove(&parameter.name);
        }
    }
    args
}
