// crates/company-contract/src/lib.rs
// ============================================================================
// Module: Company Contract Library
// Description: Contract scenarios for the company registration API.
// Purpose: Expose the catalog, config loading, and run entry points.
// Dependencies: contract-runner, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! The company API registers companies (`POST /company`), updates, fetches,
//! and deletes them by id, and lists their products. This crate declares one
//! independent contract scenario per behavior and runs them through
//! `contract-runner`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod model;
pub mod run;
pub mod scenarios;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::DEFAULT_BASE_URL;
pub use config::ENV_PREFIX;
pub use config::load_config;
pub use model::CompanyRecord;
pub use model::Product;
pub use run::RunError;
pub use run::RunReport;
pub use run::execute;
pub use run::execute_with;
pub use scenarios::CatalogError;
pub use scenarios::catalog;
pub use scenarios::select;
