// crates/company-contract/src/model.rs
// ============================================================================
// Module: Company Model
// Description: Wire shapes of the company API.
// Purpose: Provide typed payloads for scenario bodies and field checks.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`CompanyRecord`] is the body sent on create and update and the shape
//! returned on fetch (plus `id`). [`Product`] is one entry of the products
//! listing. Both expose their wire field names in `FIELDS` for shape checks
//! and logging.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Company
// ============================================================================

/// Registration number shared by every generated company.
pub const FIXED_CNPJ: &str = "17163385000100";

/// Company fields accepted by `POST /company` and `PUT /company/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Company name.
    pub name: String,
    /// Registration number.
    pub cnpj: String,
    /// State.
    pub state: String,
    /// City.
    pub city: String,
    /// Street address.
    pub address: String,
    /// Business sector.
    pub sector: String,
}

impl CompanyRecord {
    /// Wire names of the record fields, in declaration order.
    pub const FIELDS: [&'static str; 6] = ["name", "cnpj", "state", "city", "address", "sector"];

    /// Default registration payload with the given name.
    #[must_use]
    pub fn registration(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cnpj: FIXED_CNPJ.to_string(),
            state: "santa catarina".to_string(),
            city: "criciuma".to_string(),
            address: "Rua dos Bobos".to_string(),
            sector: "mechanical".to_string(),
        }
    }

    /// Registration payload with capitalized, accented locality fields.
    #[must_use]
    pub fn registration_formal(name: impl Into<String>) -> Self {
        Self {
            state: "Santa Catarina".to_string(),
            city: "Criciúma".to_string(),
            ..Self::registration(name)
        }
    }

    /// Payload sent by the update scenario.
    #[must_use]
    pub fn update() -> Self {
        Self {
            name: "Empresa Atualizada".to_string(),
            cnpj: FIXED_CNPJ.to_string(),
            state: "São Paulo".to_string(),
            city: "São Paulo".to_string(),
            address: "Avenida Paulista, 1234".to_string(),
            sector: "technology".to_string(),
        }
    }

    /// Fixed payload of the end-to-end scenario.
    #[must_use]
    pub fn felix() -> Self {
        Self::registration("Felix")
    }

    /// Returns the record as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "cnpj": self.cnpj,
            "state": self.state,
            "city": self.city,
            "address": self.address,
            "sector": self.sector,
        })
    }
}

// ============================================================================
// SECTION: Products
// ============================================================================

/// One product returned by `GET /company/{id}/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub product_id: Value,
    /// Product name.
    pub product_name: String,
    /// Product description.
    pub product_description: String,
    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Wire names of the product fields.
    pub const FIELDS: [&'static str; 4] =
        ["productId", "productName", "productDescription", "price"];
}
