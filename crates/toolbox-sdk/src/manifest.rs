// crates/toolbox-sdk/src/manifest.rs
// ============================================================================
// Module: Manifest Wire Types
// Description: Serde shapes for the toolbox manifest and invocation payloads.
// Purpose: Decode tool descriptors and invocation results from the server.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Wire types for the toolbox HTTP contract. The manifest maps tool names to
//! schemas; `serde_json` runs with `preserve_order` so the decoded map keeps
//! the server's (manifest-declared) tool order. Descriptors are fetched fresh
//! on every load call; the client never caches them.
//!
//! Security posture: server responses are untrusted; decoding fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Manifest Types
// ============================================================================

/// Manifest returned by the tool and toolset endpoints.
///
/// # Invariants
/// - `tools` preserves the server's declared ordering.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolManifest {
    /// Version reported by the serving toolbox binary.
    pub server_version: String,
    /// Tool schemas keyed by tool name, in manifest order.
    pub tools: serde_json::Map<String, Value>,
}

/// Schema for a single tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchema {
    /// Human-readable tool description.
    #[serde(default)]
    pub description: String,
    /// Ordered parameter declarations.
    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,
}

/// Declaration of one tool parameter.
///
/// A non-empty `auth_sources` list marks the parameter as populated
/// server-side from a named auth source; callers never supply it directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSchema {
    /// Parameter name, unique within the tool.
    pub name: String,
    /// Declared value type.
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    /// Human-readable parameter description.
    #[serde(default)]
    pub description: String,
    /// Auth sources that may satisfy this parameter, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auth_sources: Vec<String>,
}

impl ParameterSchema {
    /// Returns true when the parameter is populated from an auth source.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !self.auth_sources.is_empty()
    }
}

/// Value types a tool parameter may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// UTF-8 string value.
    String,
    /// Signed integer value.
    Integer,
    /// Floating point value.
    Float,
    /// Boolean value.
    Boolean,
    /// Homogeneous array value.
    Array,
}

// ============================================================================
// SECTION: Invocation Types
// ============================================================================

/// Successful invocation payload.
///
/// A success body without a `result` key fails to decode; the caller sees a
/// decode error rather than a silently empty result.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeResponse {
    /// Result payload; a string rendering of the underlying rows.
    pub result: Value,
}

impl InvokeResponse {
    /// Returns the result as text suitable for substring assertions.
    ///
    /// Row identifiers appear as literal substrings in this rendering; the
    /// format is intentionally loose and not strongly typed.
    #[must_use]
    pub fn result_text(&self) -> String {
        match &self.result {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Error payload shape used by the server for failed requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Server-reported error message.
    pub error: String,
}

/// Extracts a server error message from a raw response body.
///
/// Falls back to the raw body when the error shape does not parse, so status
/// errors always carry whatever the server said.
#[must_use]
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.to_string(), |err| err.error)
}
