// system-tests/src/lib.rs
// ============================================================================
// Module: Company Contract System Tests Library
// Description: Shared configuration for the system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment settings used by the binaries in `system-tests/tests`. The
//! hermetic suites need none of them; the live suite reads the target URL.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
