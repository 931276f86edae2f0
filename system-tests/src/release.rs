// system-tests/src/release.rs
// ============================================================================
// Module: Toolbox Release Metadata
// Description: Version sentinel parsing and release-artifact locations.
// Purpose: Resolve platform-specific binary paths and secret identifiers.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Pure metadata for obtaining the toolbox server binary: the `dev`
//! build-from-source sentinel, the platform-specific object path inside the
//! public release bucket, and the secret identifiers for the tools manifest
//! and auth client ids. No network I/O happens here; the binary helper in
//! the test suites performs the actual download or build.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Public release bucket serving prebuilt toolbox binaries.
pub const RELEASE_BUCKET_URL: &str = "https://storage.googleapis.com/genai-toolbox";

/// Version value meaning "build the server from the current working tree".
pub const DEV_VERSION_SENTINEL: &str = "dev";

/// Secret id holding the tools manifest document.
pub const TOOLS_MANIFEST_SECRET: &str = "sdk_testing_tools";

/// Secret id holding the first auth client identifier.
pub const AUTH_CLIENT1_SECRET: &str = "sdk_testing_client1";

/// Secret id holding the second auth client identifier.
pub const AUTH_CLIENT2_SECRET: &str = "sdk_testing_client2";

// ============================================================================
// SECTION: Version Parsing
// ============================================================================

/// Parsed toolbox version selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolboxVersion {
    /// Build the server binary from the current working tree.
    Dev,
    /// Download the tagged release binary.
    Release(String),
}

impl ToolboxVersion {
    /// Parses a version string from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is empty or whitespace.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("toolbox version must not be empty".to_string());
        }
        if trimmed == DEV_VERSION_SENTINEL {
            return Ok(Self::Dev);
        }
        Ok(Self::Release(trimmed.to_string()))
    }
}

// ============================================================================
// SECTION: Artifact Locations
// ============================================================================

/// Returns the bucket object path for a release binary on a given platform.
#[must_use]
pub fn artifact_object_path_for(version: &str, os: &str, arch: &str) -> String {
    format!("v{version}/{os}/{arch}/toolbox")
}

/// Returns the bucket object path for the current platform.
///
/// # Errors
///
/// Returns an error when the current architecture has no published binary.
pub fn artifact_object_path(version: &str) -> Result<String, String> {
    Ok(artifact_object_path_for(version, std::env::consts::OS, artifact_arch()?))
}

/// Returns the full download URL for the current platform.
///
/// # Errors
///
/// Returns an error when the current architecture has no published binary.
pub fn artifact_url(version: &str) -> Result<String, String> {
    Ok(format!("{RELEASE_BUCKET_URL}/{}", artifact_object_path(version)?))
}

/// Maps the current architecture onto the release naming scheme.
///
/// # Errors
///
/// Returns an error for architectures without published binaries.
fn artifact_arch() -> Result<&'static str, String> {
    match std::env::consts::ARCH {
        "x86_64" => Ok("amd64"),
        "aarch64" => Ok("arm64"),
        other => Err(format!("no published toolbox binary for architecture {other}")),
    }
}
