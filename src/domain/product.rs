use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Image reference stored when a product is created without one.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-product.jpg";

/// Category tags offered by the add-product form. The server accepts any
/// non-empty category; this list only drives the UI.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("PH", "Phones"),
    ("LT", "Laptops"),
    ("TB", "Tablets"),
    ("AC", "Accessories"),
    ("WT", "Wearables"),
];

/// Store-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    /// Wrap a raw identifier, rejecting values the store never issues.
    pub fn new(value: i32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a path segment is not a well-formed product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid product id `{0}`")]
pub struct InvalidProductId(pub String);

impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Digits only: `i32::from_str` would also accept a leading `+`.
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidProductId(value.to_string()));
        }

        value
            .parse::<i32>()
            .ok()
            .and_then(ProductId::new)
            .ok_or_else(|| InvalidProductId(value.to_string()))
    }
}

/// Domain representation of a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier assigned by the store.
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub description: String,
    /// Price in the catalog's implicit currency.
    pub price: f64,
    pub category: String,
    /// Shipping weight in kilograms.
    pub weight: f64,
    /// Image URL, or [`PLACEHOLDER_IMAGE`] when none was supplied.
    pub image: String,
    /// Timestamp captured by the store on insert.
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub weight: f64,
    /// `None` lets the store apply [`PLACEHOLDER_IMAGE`].
    pub image: Option<String>,
}

impl NewProduct {
    /// Build a product payload without an image.
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            description: description.into(),
            price,
            category: category.into(),
            weight,
            image: None,
        }
    }

    /// Attach an image URL to the product payload.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Image that will be persisted for this payload.
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_accepts_positive_integers() {
        assert_eq!("42".parse::<ProductId>().map(ProductId::get), Ok(42));
        assert_eq!(
            "2147483647".parse::<ProductId>().map(ProductId::get),
            Ok(i32::MAX)
        );
    }

    #[test]
    fn product_id_rejects_malformed_values() {
        for raw in ["", "0", "-1", "+1", " 1", "1 ", "abc", "1.5", "2147483648", "507f1f77bcf86cd799439011"] {
            assert!(raw.parse::<ProductId>().is_err(), "`{raw}` should be rejected");
        }
    }

    #[test]
    fn new_product_defaults_to_placeholder_image() {
        let product = NewProduct::new("Phone X", "Acme", "Great phone", 499.99, "PH", 0.2);
        assert_eq!(product.image_or_placeholder(), PLACEHOLDER_IMAGE);

        let product = product.with_image("https://cdn.example.com/x.png");
        assert_eq!(product.image_or_placeholder(), "https://cdn.example.com/x.png");
    }

    #[test]
    fn product_serializes_with_camel_case_timestamp() {
        let product = Product {
            id: ProductId(7),
            name: "Phone X".into(),
            brand: "Acme".into(),
            description: "Great phone".into(),
            price: 499.99,
            category: "PH".into(),
            weight: 0.2,
            image: PLACEHOLDER_IMAGE.into(),
            created_at: NaiveDateTime::default(),
        };

        let value = serde_json::to_value(&product).expect("serialize product");
        assert_eq!(value["id"], 7);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
