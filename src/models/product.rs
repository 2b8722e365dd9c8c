use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductId,
};
use crate::repository::errors::RepositoryError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub weight: f64,
    pub image: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub brand: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub category: &'a str,
    pub weight: f64,
    pub image: &'a str,
}

impl TryFrom<Product> for DomainProduct {
    type Error = RepositoryError;

    fn try_from(value: Product) -> Result<Self, Self::Error> {
        let id = ProductId::new(value.id).ok_or_else(|| {
            RepositoryError::Corrupted(format!("product row has invalid id {}", value.id))
        })?;

        Ok(Self {
            id,
            name: value.name,
            brand: value.brand,
            description: value.description,
            price: value.price,
            category: value.category,
            weight: value.weight,
            image: value.image,
            created_at: value.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            name: value.name.as_str(),
            brand: value.brand.as_str(),
            description: value.description.as_str(),
            price: value.price,
            category: value.category.as_str(),
            weight: value.weight,
            image: value.image_or_placeholder(),
        }
    }
}
