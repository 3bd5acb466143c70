//! The product record edited by the grid.
//!
//! Field names serialize in the PascalCase shape the backing service speaks
//! (`ProductID`, `ProductName`, ...), so a loaded dataset round-trips
//! unchanged.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordId, ValidationError};

pub const UNITS_IN_STOCK_MAX: i32 = 99;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "ProductID", default)]
    pub id: RecordId,
    #[serde(rename = "ProductName", default)]
    pub name: String,
    #[serde(rename = "UnitPrice", default)]
    pub unit_price: f64,
    #[serde(rename = "Discontinued", default)]
    pub discontinued: bool,
    #[serde(rename = "UnitsInStock", default)]
    pub units_in_stock: i32,
}

impl Product {
    pub fn new(name: impl Into<String>, unit_price: f64, units_in_stock: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            unit_price,
            discontinued: false,
            units_in_stock,
        }
    }
}

impl Record for Product {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn assign_from(&mut self, other: &Self) {
        self.name = other.name.clone();
        self.unit_price = other.unit_price;
        self.discontinued = other.discontinued;
        self.units_in_stock = other.units_in_stock;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("ProductName", "name is required"));
        }
        if self.unit_price < 0.0 {
            return Err(ValidationError::new(
                "UnitPrice",
                format!("price must not be negative, got {}", self.unit_price),
            ));
        }
        if !(0..=UNITS_IN_STOCK_MAX).contains(&self.units_in_stock) {
            return Err(ValidationError::new(
                "UnitsInStock",
                format!(
                    "stock must be between 0 and {}, got {}",
                    UNITS_IN_STOCK_MAX, self.units_in_stock
                ),
            ));
        }
        Ok(())
    }

    fn compare_field(&self, other: &Self, field: &str) -> Option<Ordering> {
        match field {
            "ProductID" => Some(self.id.cmp(&other.id)),
            "ProductName" => Some(self.name.cmp(&other.name)),
            "UnitPrice" => Some(self.unit_price.total_cmp(&other.unit_price)),
            "Discontinued" => Some(self.discontinued.cmp(&other.discontinued)),
            "UnitsInStock" => Some(self.units_in_stock.cmp(&other.units_in_stock)),
            _ => None,
        }
    }
}
