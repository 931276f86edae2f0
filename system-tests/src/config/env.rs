// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid
//! silent misconfiguration. Invalid UTF-8 fails closed. The project and
//! version variables are optional at load time so hermetic suites run
//! without cloud access; the e2e bootstrap requires them explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Cloud project hosting the test secrets.
    Project,
    /// Toolbox server version tag, or the `dev` build-from-source sentinel.
    ToolboxVersion,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "GOOGLE_CLOUD_PROJECT",
            Self::ToolboxVersion => "TOOLBOX_VERSION",
            Self::TimeoutSeconds => "TOOLBOX_SYSTEM_TEST_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Cloud project hosting the test secrets.
    pub project_id: Option<String>,
    /// Toolbox server version tag or the `dev` sentinel.
    pub toolbox_version: Option<String>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is
    /// empty, or fails validation (for example, an invalid timeout).
    pub fn load() -> Result<Self, String> {
        let project_id = read_env_nonempty(SystemTestEnv::Project.as_str())?;
        let toolbox_version = read_env_nonempty(SystemTestEnv::ToolboxVersion.as_str())?;
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        Ok(Self {
            project_id,
            toolbox_version,
            timeout,
        })
    }

    /// Returns the cloud project id, required for e2e bootstrap.
    ///
    /// # Errors
    ///
    /// Returns an error when the variable is unset.
    pub fn require_project_id(&self) -> Result<&str, String> {
        self.project_id
            .as_deref()
            .ok_or_else(|| format!("must set env var {}", SystemTestEnv::Project.as_str()))
    }

    /// Returns the toolbox version, required for e2e bootstrap.
    ///
    /// # Errors
    ///
    /// Returns an error when the variable is unset.
    pub fn require_toolbox_version(&self) -> Result<&str, String> {
        self.toolbox_version
            .as_deref()
            .ok_or_else(|| format!("must set env var {}", SystemTestEnv::ToolboxVersion.as_str()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Returns the effective timeout, honoring the env override when set.
///
/// The override acts as a floor so it never shortens an explicitly longer
/// timeout.
///
/// # Errors
///
/// Returns an error when the override is set but not a positive integer
/// number of seconds.
pub fn resolve_timeout(requested: Duration) -> Result<Duration, String> {
    let name = SystemTestEnv::TimeoutSeconds.as_str();
    match read_env_strict(name)? {
        Some(raw) => Ok(requested.max(parse_timeout_seconds(name, &raw)?)),
        None => Ok(requested),
    }
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
