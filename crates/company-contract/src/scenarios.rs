// crates/company-contract/src/scenarios.rs
// ============================================================================
// Module: Company Scenario Catalog
// Description: Contract scenarios for the company registration API.
// Purpose: Declare every company contract as an independent scenario.
// Dependencies: contract-runner, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every scenario creates the company it needs; nothing is shared between
//! scenarios. Generated names come from a pool of cat breeds drawn through a
//! [`FixtureGenerator`], so a fixed seed reproduces the whole catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use contract_runner::FixtureGenerator;
use contract_runner::Scenario;
use contract_runner::ScenarioError;
use contract_runner::Step;
use thiserror::Error;

use crate::model::CompanyRecord;
use crate::model::Product;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Company names are drawn from this pool.
pub const CAT_BREEDS: &[&str] = &[
    "Abyssinian",
    "American Bobtail",
    "Balinese",
    "Bengal",
    "Birman",
    "Bombay",
    "British Shorthair",
    "Burmese",
    "Chartreux",
    "Cornish Rex",
    "Devon Rex",
    "Egyptian Mau",
    "Havana",
    "Himalayan",
    "Japanese Bobtail",
    "Korat",
    "LaPerm",
    "Maine Coon",
    "Manx",
    "Nebelung",
    "Norwegian Forest Cat",
    "Ocicat",
    "Persian",
    "Ragdoll",
    "Russian Blue",
    "Savannah",
    "Scottish Fold",
    "Siamese",
    "Siberian",
    "Singapura",
    "Somali",
    "Sphynx",
    "Tonkinese",
    "Turkish Angora",
    "Turkish Van",
];

/// Length of the hex identifier used for the not-found scenario.
const UNKNOWN_ID_LEN: usize = 24;

/// Scenario identifiers, in catalog order.
pub mod ids {
    /// Create a company and capture its id.
    pub const CREATE: &str = "create-company";
    /// Create a company and check the name is echoed.
    pub const CREATE_ECHOES_NAME: &str = "create-company-echoes-name";
    /// Create, update, and re-fetch a company.
    pub const UPDATE: &str = "update-company";
    /// Create and fetch a company.
    pub const FETCH: &str = "fetch-company";
    /// Create, delete, and confirm a company is gone.
    pub const DELETE: &str = "delete-company";
    /// Create a company and list its products.
    pub const LIST_PRODUCTS: &str = "list-company-products";
    /// Fetch an identifier that was never created.
    pub const FETCH_UNKNOWN: &str = "fetch-unknown-company";
    /// Fixed-payload create, fetch, delete, and re-fetch.
    pub const FELIX: &str = "felix-end-to-end";

    /// Every identifier, in catalog order.
    pub const ALL: [&str; 8] =
        [CREATE, CREATE_ECHOES_NAME, UPDATE, FETCH, DELETE, LIST_PRODUCTS, FETCH_UNKNOWN, FELIX];
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog construction and selection failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A scenario failed validation.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    /// A requested scenario id is not in the catalog.
    #[error("unknown scenario '{0}' (use `list` to see available scenarios)")]
    Unknown(String),
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Builds the full company catalog.
///
/// # Errors
///
/// Returns [`CatalogError::Scenario`] when a declaration is invalid.
pub fn catalog(fixtures: &mut dyn FixtureGenerator) -> Result<Vec<Scenario>, CatalogError> {
    Ok(vec![
        create_company(fixtures)?,
        create_company_echoes_name(fixtures)?,
        update_company(fixtures)?,
        fetch_company(fixtures)?,
        delete_company(fixtures)?,
        list_company_products(fixtures)?,
        fetch_unknown_company(fixtures)?,
        felix_end_to_end()?,
    ])
}

/// Keeps the scenarios named in `filter`, in catalog order.
///
/// An empty filter keeps everything.
///
/// # Errors
///
/// Returns [`CatalogError::Unknown`] for the first id not in the catalog.
pub fn select(scenarios: Vec<Scenario>, filter: &[String]) -> Result<Vec<Scenario>, CatalogError> {
    if filter.is_empty() {
        return Ok(scenarios);
    }
    if let Some(unknown) =
        filter.iter().find(|id| !scenarios.iter().any(|s| s.id().as_str() == id.as_str()))
    {
        return Err(CatalogError::Unknown(unknown.clone()));
    }
    Ok(scenarios
        .into_iter()
        .filter(|scenario| filter.iter().any(|id| id == scenario.id().as_str()))
        .collect())
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// Create succeeds with 201 and returns an id.
fn create_company(fixtures: &mut dyn FixtureGenerator) -> Result<Scenario, ScenarioError> {
    let record = CompanyRecord::registration(fixtures.pick(CAT_BREEDS));
    Scenario::builder(ids::CREATE, "Create a company and receive its id")
        .step(create_step("create company", &record))
        .build()
}

/// Create returns the submitted name in its body.
fn create_company_echoes_name(
    fixtures: &mut dyn FixtureGenerator,
) -> Result<Scenario, ScenarioError> {
    let record = CompanyRecord::registration_formal(fixtures.pick(CAT_BREEDS));
    Scenario::builder(ids::CREATE_ECHOES_NAME, "Created company echoes its name")
        .step(create_step("create company", &record).expect_contains_literal(&record.name))
        .build()
}

/// Update changes every field and a fetch reads the new values back.
fn update_company(fixtures: &mut dyn FixtureGenerator) -> Result<Scenario, ScenarioError> {
    let record = CompanyRecord::registration(fixtures.pick(CAT_BREEDS));
    let update = CompanyRecord::update().to_json();
    Scenario::builder(ids::UPDATE, "Update a company and read the new fields back")
        .step(create_step("create company", &record))
        .step(Step::put("update company", "/company/{id}").json_literal(&update))
        .step(Step::get("fetch updated company", "/company/{id}").expect_fields(&update))
        .build()
}

/// Fetch by id returns the created record and its id.
fn fetch_company(fixtures: &mut dyn FixtureGenerator) -> Result<Scenario, ScenarioError> {
    let record = CompanyRecord::registration(fixtures.pick(CAT_BREEDS));
    Scenario::builder(ids::FETCH, "Fetch a company by id")
        .step(create_step("create company", &record))
        .step(
            Step::get("fetch company", "/company/{id}")
                .expect_field_text("id", "{id}")
                .expect_fields(&record.to_json())
                .log_fields(CompanyRecord::FIELDS),
        )
        .build()
}

/// Delete returns 204 and a later fetch returns 404.
fn delete_company(fixtures: &mut dyn FixtureGenerator) -> Result<Scenario, ScenarioError> {
    let record = CompanyRecord::registration(fixtures.pick(CAT_BREEDS));
    Scenario::builder(ids::DELETE, "Delete a company and confirm it is gone")
        .step(create_step("create company", &record))
        .step(Step::delete("delete company", "/company/{id}").expect_status(204))
        .step(Step::get("fetch deleted company", "/company/{id}").expect_status(404))
        .build()
}

/// Products of a company list as an array of complete product records.
fn list_company_products(fixtures: &mut dyn FixtureGenerator) -> Result<Scenario, ScenarioError> {
    let record = CompanyRecord::registration(fixtures.pick(CAT_BREEDS));
    Scenario::builder(ids::LIST_PRODUCTS, "List the products of a new company")
        .step(create_step("create company", &record))
        .step(
            Step::get("list products", "/company/{id}/products")
                .expect_array()
                .expect_each_field(Product::FIELDS)
                .log_fields(Product::FIELDS),
        )
        .build()
}

/// Fetching a random unknown id returns 404.
fn fetch_unknown_company(fixtures: &mut dyn FixtureGenerator) -> Result<Scenario, ScenarioError> {
    let unknown = fixtures.token(UNKNOWN_ID_LEN);
    Scenario::builder(ids::FETCH_UNKNOWN, "Fetching an unknown company yields 404")
        .step(Step::get("fetch unknown company", format!("/company/{unknown}")).expect_status(404))
        .build()
}

/// Fixed Felix record through create, fetch, delete, and a final 404.
fn felix_end_to_end() -> Result<Scenario, ScenarioError> {
    let felix = CompanyRecord::felix().to_json();
    Scenario::builder(ids::FELIX, "Felix: create, fetch, delete, and confirm removal")
        .step(
            Step::post("create Felix", "/company")
                .json_literal(&felix)
                .expect_status(201)
                .expect_contains_literal(r#""name":"Felix""#)
                .expect_field("id")
                .capture("id", "id"),
        )
        .step(Step::get("fetch Felix", "/company/{id}").expect_fields(&felix))
        .step(Step::delete("delete Felix", "/company/{id}").expect_status(204))
        .step(Step::get("fetch deleted Felix", "/company/{id}").expect_status(404))
        .build()
}

/// `POST /company` expecting 201 and capturing `id`.
fn create_step(name: &str, record: &CompanyRecord) -> Step {
    Step::post(name, "/company")
        .json_literal(&record.to_json())
        .expect_status(201)
        .expect_field("id")
        .capture("id", "id")
}
