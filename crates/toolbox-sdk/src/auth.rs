// crates/toolbox-sdk/src/auth.rs
// ============================================================================
// Module: Auth Token Sources
// Description: Token providers and auth-source bindings for tool calls.
// Purpose: Resolve fresh tokens per invocation and merge bindings functionally.
// Dependencies: std
// ============================================================================

//! ## Overview
//! An auth source is a named credential channel a tool parameter may require.
//! Each source is satisfied by a [`TokenProvider`] binding that is evaluated
//! immediately before every outgoing invocation, so a binding may fetch a
//! fresh token per call. Bindings are held in an explicit [`AuthSources`]
//! value and merged functionally at load time; nothing is mutated in place,
//! which keeps concurrent invocations free of shared-state races.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ToolboxError;

// ============================================================================
// SECTION: Token Providers
// ============================================================================

/// Capability for producing an auth token on demand.
///
/// Implementations are invoked fresh for every request; they must not assume
/// the token is cached between calls.
pub trait TokenProvider: Send + Sync {
    /// Produces a token string for one outgoing request.
    ///
    /// # Errors
    ///
    /// Returns an error when the token cannot be produced; the invocation
    /// that triggered resolution fails without contacting the server.
    fn resolve(&self) -> Result<String, String>;
}

/// Token provider backed by a fixed string.
#[derive(Debug, Clone)]
pub struct StaticToken {
    /// The fixed token value returned on every resolution.
    token: String,
}

impl StaticToken {
    /// Creates a provider that always returns the given token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenProvider for StaticToken {
    fn resolve(&self) -> Result<String, String> {
        Ok(self.token.clone())
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn resolve(&self) -> Result<String, String> {
        Ok(self())
    }
}

// ============================================================================
// SECTION: Auth Source Bindings
// ============================================================================

/// Ordered mapping from auth-source name to token provider.
///
/// # Invariants
/// - Iteration order is deterministic (sorted by source name).
/// - Merging never mutates either input.
#[derive(Clone, Default)]
pub struct AuthSources {
    /// Bindings keyed by auth-source name.
    bindings: BTreeMap<String, Arc<dyn TokenProvider>>,
}

impl AuthSources {
    /// Creates an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no sources are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns the number of bound sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true when the named source has a binding.
    #[must_use]
    pub fn contains(&self, source: &str) -> bool {
        self.bindings.contains_key(source)
    }

    /// Adds a binding, replacing any existing binding for the same source.
    pub fn insert(&mut self, source: impl Into<String>, provider: impl TokenProvider + 'static) {
        self.bindings.insert(source.into(), Arc::new(provider));
    }

    /// Adds a binding and returns the updated set.
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl Into<String>,
        provider: impl TokenProvider + 'static,
    ) -> Self {
        self.insert(source, provider);
        self
    }

    /// Returns a new set overlaying `overrides` on top of this set.
    ///
    /// Overrides win on name collisions; both inputs are left untouched.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut bindings = self.bindings.clone();
        for (name, provider) in &overrides.bindings {
            bindings.insert(name.clone(), Arc::clone(provider));
        }
        Self {
            bindings,
        }
    }

    /// Evaluates every binding now and returns `(source, token)` pairs.
    ///
    /// Called immediately before each request so providers can hand out
    /// fresh tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::TokenResolve`] for the first provider that
    /// fails.
    pub fn resolve_all(&self) -> Result<Vec<(String, String)>, ToolboxError> {
        let mut tokens = Vec::with_capacity(self.bindings.len());
        for (source, provider) in &self.bindings {
            let token = provider.resolve().map_err(|message| ToolboxError::TokenResolve {
                auth_source: source.clone(),
                message,
            })?;
            tokens.push((source.clone(), token));
        }
        Ok(tokens)
    }
}

impl std::fmt::Debug for AuthSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSources")
            .field("sources", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Returns the request header name carrying tokens for an auth source.
#[must_use]
pub fn header_name(source: &str) -> String {
    format!("{source}_token")
}
