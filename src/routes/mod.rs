use actix_web::{HttpResponse, http::header, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::product::CATEGORIES;
use crate::domain::user::SessionUser;
use crate::services::{ServiceError, ServiceResult};

pub mod api;
pub mod auth;
pub mod main;
pub mod products;

/// Register every HTTP route. Middleware and app data are supplied by the
/// caller so tests can assemble the same application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(api::json_config())
            .service(api::list_products)
            .service(api::create_product)
            .service(api::get_product)
            .service(api::register)
            .service(api::login)
            .service(api::logout),
    )
    .service(main::show_index)
    .service(products::show_products)
    .service(products::show_add_product)
    .service(products::add_product)
    .service(products::show_product)
    .service(auth::show_login)
    .service(auth::login)
    .service(auth::show_register)
    .service(auth::register)
    .service(auth::logout);
}

/// Run a blocking service call on the actix blocking pool.
pub(crate) async fn run_blocking<F, T>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(f).await {
        Ok(result) => result,
        Err(err) => {
            log::error!("Blocking task failed: {err}");
            Err(ServiceError::Internal)
        }
    }
}

#[derive(Serialize)]
struct Alert {
    level: &'static str,
    content: String,
}

/// Template context shared by every page: flash alerts, the signed-in
/// account and the active navigation entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&SessionUser>,
    current_page: &str,
) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|message| Alert {
            level: alert_level(message.level()),
            content: message.content().to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context.insert("category_options", &category_options());
    context
}

fn alert_level(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

#[derive(Serialize)]
struct CategoryOption {
    code: &'static str,
    label: &'static str,
}

fn category_options() -> Vec<CategoryOption> {
    CATEGORIES
        .iter()
        .map(|&(code, label)| CategoryOption { code, label })
        .collect()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template `{template}`: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
