//! Mall products, reviews and purchase history

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DomainError, DomainResult};
use crate::ids::{new_id, now_millis};
use crate::{Coins, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    Food,
    Clothes,
    Gear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReview {
    pub id: String,
    pub owner_id: String,
    pub rating: u8,
    pub comment: String,
    pub timestamp: Timestamp,
}

impl ProductReview {
    pub fn new(owner_id: &str, rating: u8, comment: &str) -> DomainResult<Self> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::InvalidRating(rating));
        }
        Ok(Self {
            id: new_id(""),
            owner_id: owner_id.to_string(),
            rating,
            comment: comment.trim().to_string(),
            timestamp: now_millis(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub usd_price: f64,
    pub cat_coin_price: Coins,
    pub category: ProductCategory,
    pub image_url: String,
    pub description: String,
    #[serde(default)]
    pub reviews: Vec<ProductReview>,
}

impl Product {
    /// Mean star rating, `None` before the first review
    pub fn average_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| r.rating as u32).sum();
        Some(total as f32 / self.reviews.len() as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "USD")]
    Usd,
    Coins,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Usd => f.write_str("USD"),
            PaymentMethod::Coins => f.write_str("Coins"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: String,
    pub product: Product,
    pub payment_method: PaymentMethod,
    pub amount_paid: f64,
    pub timestamp: Timestamp,
}

impl PurchaseRecord {
    pub fn new(product: Product, payment_method: PaymentMethod) -> Self {
        let amount_paid = match payment_method {
            PaymentMethod::Usd => product.usd_price,
            PaymentMethod::Coins => product.cat_coin_price as f64,
        };
        Self {
            id: new_id(""),
            product,
            payment_method,
            amount_paid,
            timestamp: now_millis(),
        }
    }
}
