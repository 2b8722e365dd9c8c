use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::{missing_fields, non_blank, sanitize_inline_text, sanitize_multiline_text};
use crate::domain::product::NewProduct;

/// Maximum allowed length for short text fields.
const TEXT_MAX_LEN_VALIDATOR: u64 = 128;

/// Maximum allowed length for a description.
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 4000;

/// Maximum allowed length for a category tag.
const CATEGORY_MAX_LEN_VALIDATOR: u64 = 32;

/// Maximum allowed length for an image reference.
const IMAGE_MAX_LEN: usize = 2048;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// One or more required fields were absent, blank or zero.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    /// A numeric field in an HTML form could not be parsed.
    #[error("`{field}` must be a number")]
    InvalidNumber { field: &'static str },
    /// The image is neither an http(s) URL nor an absolute path.
    #[error("image must be an http(s) URL or an absolute path")]
    InvalidImage,
}

impl From<ValidationErrors> for ProductFormError {
    fn from(errors: ValidationErrors) -> Self {
        let missing = missing_fields(&errors);
        if missing.is_empty() {
            Self::Validation(errors)
        } else {
            Self::MissingFields(missing)
        }
    }
}

/// JSON payload accepted by `POST /api/products`.
///
/// Every field is optional at the type level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(required, length(min = 1, max = TEXT_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[validate(required, length(min = 1, max = TEXT_MAX_LEN_VALIDATOR))]
    pub brand: Option<String>,
    #[validate(required, length(min = 1, max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    #[validate(required, range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(required, length(min = 1, max = CATEGORY_MAX_LEN_VALIDATOR))]
    pub category: Option<String>,
    #[validate(required, range(min = 0.0))]
    pub weight: Option<f64>,
    pub image: Option<String>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        let form = self.normalized();
        form.validate()?;

        let image = match form.image.clone() {
            Some(image) if is_valid_image(&image) => Some(image),
            Some(_) => return Err(ProductFormError::InvalidImage),
            None => None,
        };

        let missing_required = form.missing_required();
        let (Some(name), Some(brand), Some(description), Some(price), Some(category), Some(weight)) = (
            form.name,
            form.brand,
            form.description,
            form.price,
            form.category,
            form.weight,
        ) else {
            return Err(ProductFormError::MissingFields(missing_required));
        };

        let mut product = NewProduct::new(name, brand, description, price, category, weight);
        if let Some(image) = image {
            product = product.with_image(image);
        }
        Ok(product)
    }

    /// Names of required fields that are absent, sorted.
    fn missing_required(&self) -> Vec<String> {
        let mut missing: Vec<String> = [
            ("brand", self.brand.is_none()),
            ("category", self.category.is_none()),
            ("description", self.description.is_none()),
            ("name", self.name.is_none()),
            ("price", self.price.is_none()),
            ("weight", self.weight.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(field, _)| field.to_string())
        .collect();
        missing.sort();
        missing
    }

    /// Sanitize text and treat blank strings and zero numbers as absent.
    fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name, sanitize_inline_text),
            brand: non_blank(self.brand, sanitize_inline_text),
            description: non_blank(self.description, sanitize_multiline_text),
            price: self.price.filter(|value| *value != 0.0),
            category: non_blank(self.category, sanitize_inline_text),
            weight: self.weight.filter(|value| *value != 0.0),
            image: non_blank(self.image, |raw| raw.trim().to_string()),
        }
    }
}

/// URL-encoded payload posted by the add-product page. Numbers arrive as
/// text and empty inputs are sent as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddProductHtmlForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub image: String,
}

impl TryFrom<AddProductHtmlForm> for AddProductForm {
    type Error = ProductFormError;

    fn try_from(value: AddProductHtmlForm) -> Result<Self, Self::Error> {
        Ok(Self {
            price: parse_number(&value.price, "price")?,
            weight: parse_number(&value.weight, "weight")?,
            name: Some(value.name),
            brand: Some(value.brand),
            description: Some(value.description),
            category: Some(value.category),
            image: Some(value.image),
        })
    }
}

fn parse_number(raw: &str, field: &'static str) -> ProductFormResult<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ProductFormError::InvalidNumber { field }),
    }
}

fn is_valid_image(image: &str) -> bool {
    if image.len() > IMAGE_MAX_LEN || image.chars().any(char::is_whitespace) {
        return false;
    }
    image.starts_with("https://")
        || image.starts_with("http://")
        || (image.starts_with('/') && !image.starts_with("//"))
}
