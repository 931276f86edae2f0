// crates/toolbox-sdk/src/client.rs
// ============================================================================
// Module: Toolbox Client
// Description: HTTP client wrapper for loading toolbox tools and toolsets.
// Purpose: Fetch tool descriptors and build invokable handles with auth.
// Dependencies: reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`ToolboxClient`] wraps a base URL and exposes `load_tool` and
//! `load_toolset`. Every load fetches the manifest fresh from the server;
//! descriptors are never cached, so two loads with identical arguments and
//! unchanged server state yield structurally identical handles. Auth-source
//! bindings registered on the client apply to all subsequent loads; per-load
//! overrides are overlaid functionally on top for that load only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Client;
use url::Url;

use crate::auth::AuthSources;
use crate::auth::TokenProvider;
use crate::error::ToolboxError;
use crate::manifest::ToolManifest;
use crate::manifest::ToolSchema;
use crate::manifest::error_message;
use crate::tool::ToolboxTool;

// ============================================================================
// SECTION: Client
// ============================================================================

/// Client for a toolbox server instance.
#[derive(Debug, Clone)]
pub struct ToolboxClient {
    /// Normalized base URL (always slash-terminated).
    base_url: Url,
    /// Shared HTTP client reused across loads and invocations.
    http: Client,
    /// Bindings applied to every subsequent load.
    auth_sources: AuthSources,
}

impl ToolboxClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::InvalidBaseUrl`] when the URL does not parse
    /// and [`ToolboxError::Transport`] when the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ToolboxError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().build()?;
        Ok(Self {
            base_url,
            http,
            auth_sources: AuthSources::new(),
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Registers an auth-source binding applied to all subsequent loads.
    #[must_use]
    pub fn with_auth_source(
        mut self,
        source: impl Into<String>,
        provider: impl TokenProvider + 'static,
    ) -> Self {
        self.auth_sources.insert(source, provider);
        self
    }

    /// Loads the single named tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::ToolNotFound`] when the server does not know
    /// the name, and transport/decoding errors otherwise.
    pub async fn load_tool(&self, name: &str) -> Result<ToolboxTool, ToolboxError> {
        self.load_tool_with_auth(name, &AuthSources::new()).await
    }

    /// Loads the single named tool with per-load auth overrides.
    ///
    /// Overrides are overlaid on the client's bindings for this tool only.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::ToolNotFound`] when the server does not know
    /// the name, and transport/decoding errors otherwise.
    pub async fn load_tool_with_auth(
        &self,
        name: &str,
        overrides: &AuthSources,
    ) -> Result<ToolboxTool, ToolboxError> {
        let url = self.base_url.join(&format!("api/tool/{name}"))?;
        let manifest = self.fetch_manifest(url).await.map_err(|err| match err {
            ToolboxError::Server {
                status: 404, ..
            } => ToolboxError::ToolNotFound {
                name: name.to_string(),
            },
            other => other,
        })?;
        let Some(schema_value) = manifest.tools.get(name) else {
            return Err(ToolboxError::ToolNotFound {
                name: name.to_string(),
            });
        };
        let schema: ToolSchema = serde_json::from_value(schema_value.clone())?;
        self.build_tool(name, schema, overrides)
    }

    /// Loads a toolset; `None` loads every tool known to the server.
    ///
    /// The returned order is the server's manifest order.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::ToolsetNotFound`] when a named toolset is
    /// unknown, and transport/decoding errors otherwise.
    pub async fn load_toolset(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<ToolboxTool>, ToolboxError> {
        self.load_toolset_with_auth(name, &AuthSources::new()).await
    }

    /// Loads a toolset with per-load auth overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::ToolsetNotFound`] when a named toolset is
    /// unknown, and transport/decoding errors otherwise.
    pub async fn load_toolset_with_auth(
        &self,
        name: Option<&str>,
        overrides: &AuthSources,
    ) -> Result<Vec<ToolboxTool>, ToolboxError> {
        let url = match name {
            Some(name) => self.base_url.join(&format!("api/toolset/{name}"))?,
            None => self.base_url.join("api/toolset/")?,
        };
        let manifest = self.fetch_manifest(url).await.map_err(|err| match (&err, name) {
            (
                ToolboxError::Server {
                    status: 404, ..
                },
                Some(name),
            ) => ToolboxError::ToolsetNotFound {
                name: name.to_string(),
            },
            _ => err,
        })?;
        let mut tools = Vec::with_capacity(manifest.tools.len());
        for (tool_name, schema_value) in &manifest.tools {
            let schema: ToolSchema = serde_json::from_value(schema_value.clone())?;
            tools.push(self.build_tool(tool_name, schema, overrides)?);
        }
        Ok(tools)
    }

    /// Fetches and decodes a manifest from the given endpoint.
    async fn fetch_manifest(&self, url: Url) -> Result<ToolManifest, ToolboxError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ToolboxError::Server {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Builds an invokable handle with merged auth bindings.
    fn build_tool(
        &self,
        name: &str,
        schema: ToolSchema,
        overrides: &AuthSources,
    ) -> Result<ToolboxTool, ToolboxError> {
        let invoke_url = self.base_url.join(&format!("api/tool/{name}/invoke"))?;
        Ok(ToolboxTool::new(
            name.to_string(),
            schema,
            invoke_url,
            self.http.clone(),
            self.auth_sources.merged(overrides),
        ))
    }
}
