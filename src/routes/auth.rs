use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, run_blocking};
use crate::services::{ServiceError, auth as auth_service};
use crate::session::{CurrentUser, sign_in, sign_out};

#[get("/login")]
pub async fn show_login(
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.session().is_some() {
        return redirect("/products");
    }
    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    match run_blocking(move || auth_service::login(repo.as_ref(), form)).await {
        Ok(session_user) => match sign_in(&req, &session_user) {
            Ok(()) => {
                FlashMessage::success("Signed in.").send();
                redirect("/products")
            }
            Err(err) => {
                log::error!("Failed to start session: {err}");
                FlashMessage::error("Sign in failed. Please try again.").send();
                redirect("/login")
            }
        },
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Invalid email or password.").send();
            redirect("/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/login")
        }
        Err(err) => {
            log::error!("Login failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/register")]
pub async fn show_register(
    user: CurrentUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.session().is_some() {
        return redirect("/products");
    }
    let context = base_context(&flash_messages, None, "register");
    render_template(&tera, "auth/register.html", &context)
}

#[post("/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    match run_blocking(move || auth_service::register(repo.as_ref(), form)).await {
        Ok(_) => {
            FlashMessage::success("Account created. You can sign in now.").send();
            redirect("/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/register")
        }
        Err(err) => {
            log::error!("Registration failed: {err}");
            FlashMessage::error("Registration failed.").send();
            redirect("/register")
        }
    }
}

#[post("/logout")]
pub async fn logout(req: HttpRequest) -> impl Responder {
    sign_out(&req);
    redirect("/")
}
