use std::collections::BTreeSet;

use serde::Deserialize;

use crate::domain::product::{Product, ProductId};
use crate::domain::user::SessionUser;
use crate::forms::products::AddProductForm;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Number of products featured on the home page.
pub const HIGHLIGHT_COUNT: usize = 4;

/// Returns every product, newest first.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    repo.list_products().map_err(ServiceError::from)
}

/// Creates a product on behalf of a signed-in account.
///
/// The session is checked before the payload and the payload before the
/// store, so rejected requests never touch the repository.
pub fn create_product<R>(
    repo: &R,
    session: Option<&SessionUser>,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let Some(user) = session else {
        return Err(ServiceError::Unauthorized);
    };

    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;

    log::info!(
        "Product {} `{}` created by {}",
        product.id,
        product.name,
        user.email
    );

    Ok(product)
}

/// Looks up a product by the raw identifier taken from the request path.
pub fn get_product<R>(repo: &R, raw_id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let id: ProductId = raw_id
        .parse()
        .map_err(|_| ServiceError::InvalidId("Invalid product ID format".to_string()))?;

    repo.get_product_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Data required to render the home page.
pub struct HomePageData {
    /// Newest products, at most [`HIGHLIGHT_COUNT`].
    pub highlights: Vec<Product>,
}

pub fn load_home_page<R>(repo: &R) -> ServiceResult<HomePageData>
where
    R: ProductReader + ?Sized,
{
    let mut highlights = list_products(repo)?;
    highlights.truncate(HIGHLIGHT_COUNT);
    Ok(HomePageData { highlights })
}

/// Query parameters accepted by the products index page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Case-insensitive search over name and brand.
    pub search: Option<String>,
    /// Exact category filter.
    pub category: Option<String>,
}

/// Data required to render the products index template.
pub struct ProductsPageData {
    pub products: Vec<Product>,
    /// Distinct categories across all products, for the filter dropdown.
    pub categories: Vec<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Loads all products and applies the page filters in memory.
pub fn load_products_page<R>(repo: &R, query: ProductsQuery) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + ?Sized,
{
    let search = query
        .search
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let category = query
        .category
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let all = list_products(repo)?;

    let categories: Vec<String> = all
        .iter()
        .map(|product| product.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let needle = search.as_ref().map(|value| value.to_lowercase());
    let products = all
        .into_iter()
        .filter(|product| {
            category
                .as_ref()
                .is_none_or(|wanted| &product.category == wanted)
        })
        .filter(|product| {
            needle.as_ref().is_none_or(|needle| {
                product.name.to_lowercase().contains(needle)
                    || product.brand.to_lowercase().contains(needle)
            })
        })
        .collect();

    Ok(ProductsPageData {
        products,
        categories,
        search,
        category,
    })
}
