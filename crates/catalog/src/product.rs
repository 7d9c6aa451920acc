use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockview_core::{Entity, ProductId};

/// Sales-velocity tag assigned upstream (Fast / Slow / Non-moving).
///
/// Purely descriptive; nothing in this workspace derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FsnClass {
    #[serde(rename = "F")]
    Fast,
    #[serde(rename = "S")]
    Slow,
    #[serde(rename = "N")]
    NonMoving,
}

/// Product record as delivered by the upstream billing system.
///
/// Immutable snapshot value: every feed update replaces the whole collection,
/// so there are no setters. Missing optional fields deserialize to their
/// documented "absent" meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    barcode: Option<String>,
    price: Decimal,
    #[serde(default)]
    wholesale_price: Decimal,
    #[serde(default)]
    purchase_price: Option<Decimal>,
    quantity: i64,
    reorder_level: i64,
    #[serde(default)]
    max_stock: Option<i64>,
    #[serde(default)]
    fsn_classification: Option<FsnClass>,
    #[serde(default)]
    last_sale_date: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product with the required fields; optional fields start absent.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        quantity: i64,
        reorder_level: i64,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            sku: None,
            category: None,
            barcode: None,
            price,
            wholesale_price: Decimal::ZERO,
            purchase_price: None,
            quantity,
            reorder_level,
            max_stock: None,
            fsn_classification: None,
            last_sale_date: None,
            updated_at,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn with_wholesale_price(mut self, wholesale_price: Decimal) -> Self {
        self.wholesale_price = wholesale_price;
        self
    }

    pub fn with_purchase_price(mut self, purchase_price: Decimal) -> Self {
        self.purchase_price = Some(purchase_price);
        self
    }

    pub fn with_max_stock(mut self, max_stock: i64) -> Self {
        self.max_stock = Some(max_stock);
        self
    }

    pub fn with_fsn_classification(mut self, fsn: FsnClass) -> Self {
        self.fsn_classification = Some(fsn);
        self
    }

    pub fn with_last_sale_date(mut self, last_sale_date: DateTime<Utc>) -> Self {
        self.last_sale_date = Some(last_sale_date);
        self
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn wholesale_price(&self) -> Decimal {
        self.wholesale_price
    }

    pub fn purchase_price(&self) -> Option<Decimal> {
        self.purchase_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn reorder_level(&self) -> i64 {
        self.reorder_level
    }

    /// Overstock ceiling. `None` means no ceiling is configured.
    pub fn max_stock(&self) -> Option<i64> {
        self.max_stock
    }

    pub fn fsn_classification(&self) -> Option<FsnClass> {
        self.fsn_classification
    }

    pub fn last_sale_date(&self) -> Option<DateTime<Utc>> {
        self.last_sale_date
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
