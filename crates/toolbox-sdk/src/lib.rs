// crates/toolbox-sdk/src/lib.rs
// ============================================================================
// Module: Toolbox SDK
// Description: Async client SDK for the external toolbox HTTP server.
// Purpose: Load tools/toolsets and invoke them with auth token propagation.
// Dependencies: reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Client SDK for a toolbox server: load a single named tool or a named or
//! default toolset, then invoke the returned handles with JSON arguments.
//! Auth-source bindings supply lazily-resolved tokens that are attached as
//! request headers on every invocation.
//!
//! Control flow: create a [`ToolboxClient`] pointed at a running server,
//! load tool(s), invoke with arguments, assert on the structured response.
//!
//! Security posture: server responses are untrusted; decoding fails closed
//! and server errors are surfaced verbatim with their HTTP status.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod auth;
mod client;
mod error;
mod manifest;
mod tool;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use auth::AuthSources;
pub use auth::StaticToken;
pub use auth::TokenProvider;
pub use auth::header_name;
pub use client::ToolboxClient;
pub use error::ToolboxError;
pub use manifest::ErrorBody;
pub use manifest::InvokeResponse;
pub use manifest::ParameterSchema;
pub use manifest::ParameterType;
pub use manifest::ToolManifest;
pub use manifest::ToolSchema;
pub use manifest::error_message;
pub use tool::ToolboxTool;
