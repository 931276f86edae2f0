// system-tests/src/lib.rs
// ============================================================================
// Module: Toolbox System Tests Library
// Description: Shared configuration and release metadata for system tests.
// Purpose: Provide common utilities for the toolbox system-test suites.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration and release-artifact utilities used
//! by the toolbox system-test suites in `system-tests/tests`.
//! Security posture: environment inputs are untrusted; parsing fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod release;

// ============================================================================
// SECTION: Tests
// ============================================================================
