use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::products::{AddProductForm, AddProductHtmlForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, run_blocking};
use crate::services::{ServiceError, products};
use crate::session::CurrentUser;

#[get("/products")]
pub async fn show_products(
    params: web::Query<products::ProductsQuery>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.into_inner();
    let query = params.into_inner();
    match run_blocking(move || products::load_products_page(repo.as_ref(), query)).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.session(), "products");
            let has_active_filters = data.search.is_some() || data.category.is_some();
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            context.insert("search", &data.search.unwrap_or_default());
            context.insert("category", &data.category.unwrap_or_default());
            context.insert("has_active_filters", &has_active_filters);
            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{id}")]
pub async fn show_product(
    path: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let raw_id = path.into_inner();
    let repo = repo.into_inner();
    match run_blocking(move || products::get_product(repo.as_ref(), &raw_id)).await {
        Ok(product) => {
            let mut context = base_context(&flash_messages, user.session(), "products");
            context.insert("product", &product);
            render_template(&tera, "products/show.html", &context)
        }
        Err(ServiceError::InvalidId(_) | ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to load product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/dashboard/add-product")]
pub async fn show_add_product(
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.session().is_none() {
        FlashMessage::warning("Please sign in to add products.").send();
        return redirect("/login");
    }

    let context = base_context(&flash_messages, user.session(), "add_product");
    render_template(&tera, "products/add.html", &context)
}

#[post("/dashboard/add-product")]
pub async fn add_product(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    if user.session().is_none() {
        FlashMessage::warning("Please sign in to add products.").send();
        return redirect("/login");
    }

    let form: AddProductHtmlForm = match serde_html_form::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(format!("Failed to add product: {err}")).send();
            return redirect("/dashboard/add-product");
        }
    };

    let form = match AddProductForm::try_from(form) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(format!("Failed to add product: {err}")).send();
            return redirect("/dashboard/add-product");
        }
    };

    let repo = repo.into_inner();
    match run_blocking(move || products::create_product(repo.as_ref(), user.session(), form)).await
    {
        Ok(product) => {
            FlashMessage::success(format!("Product `{}` added.", product.name)).send();
            redirect(&format!("/products/{}", product.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::warning("Please sign in to add products.").send();
            redirect("/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(format!("Failed to add product: {message}")).send();
            redirect("/dashboard/add-product")
        }
        Err(err) => {
            log::error!("Failed to add product: {err}");
            FlashMessage::error("Failed to add product. Please try again.").send();
            redirect("/dashboard/add-product")
        }
    }
}
