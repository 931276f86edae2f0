// system-tests/tests/helpers/secrets.rs
// ============================================================================
// Module: Secret Store Glue
// Description: Secret and identity-token retrieval via the gcloud CLI.
// Purpose: Fetch the tools manifest and auth material for e2e bootstrap.
// Dependencies: tokio
// ============================================================================

//! ## Overview
//! Thin glue to the external secret store: secrets and identity tokens are
//! fetched by shelling out to the `gcloud` CLI. Failures carry the captured
//! stderr so setup errors are actionable. This module is deliberately not a
//! secret-management client; the store is an external collaborator.

use tokio::process::Command;

/// Reads one secret version's payload from the secret store.
///
/// # Errors
///
/// Returns an error when the CLI is missing or exits non-zero; the message
/// includes captured stderr.
pub async fn access_secret_version(
    project_id: &str,
    secret_id: &str,
    version_id: &str,
) -> Result<String, String> {
    let output = Command::new("gcloud")
        .args(["secrets", "versions", "access", version_id])
        .arg(format!("--secret={secret_id}"))
        .arg(format!("--project={project_id}"))
        .output()
        .await
        .map_err(|err| format!("failed to run gcloud secrets access: {err}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("gcloud secrets access failed for {secret_id}: {stderr}"));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Reads the latest version of a secret.
///
/// # Errors
///
/// Returns an error when the CLI is missing or exits non-zero.
pub async fn access_latest_secret(project_id: &str, secret_id: &str) -> Result<String, String> {
    access_secret_version(project_id, secret_id, "latest").await
}

/// Fetches an identity token minted for the given audience.
///
/// The audience is the OAuth client id the serving auth source validates
/// against. The token is produced fresh on every call, so it can back a lazy
/// token-provider binding.
///
/// # Errors
///
/// Returns an error when the CLI is missing or exits non-zero.
pub async fn identity_token(audience: &str) -> Result<String, String> {
    let output = Command::new("gcloud")
        .args(["auth", "print-identity-token"])
        .arg(format!("--audiences={audience}"))
        .output()
        .await
        .map_err(|err| format!("failed to run gcloud auth print-identity-token: {err}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("gcloud auth print-identity-token failed: {stderr}"));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
