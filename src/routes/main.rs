use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, run_blocking};
use crate::services::products;
use crate::session::CurrentUser;

#[get("/")]
pub async fn show_index(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.into_inner();
    match run_blocking(move || products::load_home_page(repo.as_ref())).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.session(), "index");
            context.insert("highlights", &data.highlights);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load home page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
