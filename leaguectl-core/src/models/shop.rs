//! Shop catalog: items and their categories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::defaults;
use super::validation::{blank_to_none, non_negative, require, require_some, ValidationError};
use super::{Entity, EntityInput, Table};

/// Shop item as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub stock_quantity: i32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default = "defaults::yes", deserialize_with = "defaults::null_as_true")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for ShopItem {
    const TABLE: Table = Table::ShopItems;
    const RESOURCE: &'static str = "shop item";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields accepted by create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Omitted ⇒ 0
    #[serde(default)]
    pub stock_quantity: Option<i32>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default = "defaults::yes")]
    pub is_available: bool,
}

impl Default for ShopItemInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            price: None,
            stock_quantity: None,
            size: None,
            color: None,
            image_url: None,
            category_id: None,
            is_available: true,
        }
    }
}

impl ShopItemInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            ..Self::default()
        }
    }
}

impl EntityInput for ShopItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        let price = require_some("price", self.price)?;
        // Stored as NUMERIC(10,2): anything that rounds to 0.00 is zero.
        if !price.is_finite() || (price * 100.0).round() < 1.0 {
            return Err(ValidationError::OutOfRange {
                field: "price",
                reason: "must be at least 0.01",
            });
        }
        non_negative("stock_quantity", self.stock_quantity)
    }

    fn normalized(&self) -> Self {
        let this = self.clone();
        Self {
            description: blank_to_none(this.description),
            stock_quantity: Some(this.stock_quantity.unwrap_or(0)),
            size: blank_to_none(this.size),
            color: blank_to_none(this.color),
            image_url: blank_to_none(this.image_url),
            ..this
        }
    }
}

/// Shop category as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopCategory {
    pub id: Uuid,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for ShopCategory {
    const TABLE: Table = Table::ShopCategories;
    const RESOURCE: &'static str = "shop category";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields accepted by create/update; categories carry no invariants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopCategoryInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl EntityInput for ShopCategoryInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: blank_to_none(self.description.clone()),
        }
    }
}
