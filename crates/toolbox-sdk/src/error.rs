// crates/toolbox-sdk/src/error.rs
// ============================================================================
// Module: SDK Errors
// Description: Error types for toolbox client operations.
// Purpose: Distinguish local validation failures from server-reported ones.
// Dependencies: thiserror, reqwest
// ============================================================================

//! ## Overview
//! Errors raised by the toolbox client. Local validation failures
//! ([`ToolboxError::AuthRequired`], [`ToolboxError::MissingArguments`]) are
//! raised before any network I/O. Server-reported failures are surfaced as
//! [`ToolboxError::Server`] carrying the HTTP status and message verbatim;
//! they are never translated into domain-specific variants and never retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Types
// ============================================================================

/// Errors produced by toolbox client operations.
///
/// # Invariants
/// - Variants are stable for caller error mapping and tests.
/// - String payloads are user-facing and may include untrusted server text.
#[derive(Debug, Error)]
pub enum ToolboxError {
    /// The named tool is absent from the server manifest.
    #[error("tool not found: {name}")]
    ToolNotFound {
        /// Requested tool name.
        name: String,
    },

    /// The named toolset is absent from the server manifest.
    #[error("toolset not found: {name}")]
    ToolsetNotFound {
        /// Requested toolset name.
        name: String,
    },

    /// A parameter requires an auth source with no registered binding.
    ///
    /// Raised locally, before any network request is issued.
    #[error(
        "login required before invoking {tool}: parameter {parameter} needs one of {sources:?}"
    )]
    AuthRequired {
        /// Tool whose invocation was rejected.
        tool: String,
        /// Parameter declaring the unsatisfied auth requirement.
        parameter: String,
        /// Auth sources that would satisfy the requirement.
        sources: Vec<String>,
    },

    /// Required parameters were omitted from the invocation arguments.
    ///
    /// Raised locally, before any network request is issued.
    #[error("missing required arguments for {tool}: {names:?}")]
    MissingArguments {
        /// Tool whose invocation was rejected.
        tool: String,
        /// Names of the omitted required parameters.
        names: Vec<String>,
    },

    /// A token provider failed to produce a token.
    #[error("token resolution failed for auth source {auth_source}: {message}")]
    TokenResolve {
        /// Auth source whose provider failed.
        auth_source: String,
        /// Provider-reported failure message.
        message: String,
    },

    /// The server rejected the request with an HTTP error status.
    #[error("server returned status {status}: {message}")]
    Server {
        /// HTTP status code reported by the server.
        status: u16,
        /// Message extracted from the error body, or the raw body.
        message: String,
    },

    /// The base URL could not be parsed or joined.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The underlying HTTP transport failed.
    #[error("http transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ToolboxError {
    /// Returns the HTTP status for server-reported failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }
}
