use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use serde::Serialize;

use crate::forms::auth::{LoginForm, RegisterForm};
use crate::forms::products::AddProductForm;
use crate::repository::DieselRepository;
use crate::routes::run_blocking;
use crate::services::{ServiceError, auth as auth_service, products};
use crate::session::{CurrentUser, sign_in, sign_out};

/// Body of every JSON error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct LoginBody {
    email: String,
}

/// Malformed JSON bodies are reported as `400` with the usual error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = invalid_json(&err);
        InternalError::from_response(err, response).into()
    })
}

fn invalid_json(err: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody {
        error: format!("Invalid JSON payload: {err}"),
    })
}

fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Form(_) | ServiceError::InvalidId(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a service failure into a JSON error. Infrastructure failures get
/// `internal_message` so callers never see store details.
fn json_error(err: ServiceError, internal_message: &str) -> HttpResponse {
    let error = match &err {
        ServiceError::Internal => internal_message.to_string(),
        other => other.to_string(),
    };
    HttpResponse::build(status_for(&err)).json(ErrorBody { error })
}

#[get("/products")]
/// Return every product, newest first.
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    let repo = repo.into_inner();
    match run_blocking(move || products::list_products(repo.as_ref())).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => json_error(err, "Failed to fetch products"),
    }
}

#[post("/products")]
/// Create a product. Requires a signed-in session, which is checked before
/// the body is parsed.
pub async fn create_product(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    if user.session().is_none() {
        return json_error(ServiceError::Unauthorized, "Failed to create product");
    }

    let form: AddProductForm = match serde_json::from_slice(&body) {
        Ok(form) => form,
        Err(err) => return invalid_json(err),
    };

    let repo = repo.into_inner();
    let result =
        run_blocking(move || products::create_product(repo.as_ref(), user.session(), form)).await;

    match result {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => {
            if matches!(err, ServiceError::Form(_)) {
                log::debug!("Rejected product payload: {err}");
            }
            json_error(err, "Failed to create product")
        }
    }
}

#[get("/products/{id}")]
/// Return a single product by id.
pub async fn get_product(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let raw_id = path.into_inner();
    let repo = repo.into_inner();
    match run_blocking(move || products::get_product(repo.as_ref(), &raw_id)).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => json_error(err, "Failed to fetch product"),
    }
}

#[post("/auth/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RegisterForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    match run_blocking(move || auth_service::register(repo.as_ref(), form)).await {
        Ok(_) => HttpResponse::Created().json(MessageBody {
            message: "User created".to_string(),
        }),
        Err(err) => json_error(err, "Registration failed"),
    }
}

#[post("/auth/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let session_user = match run_blocking(move || auth_service::login(repo.as_ref(), form)).await {
        Ok(session_user) => session_user,
        Err(ServiceError::Unauthorized) => {
            return HttpResponse::Unauthorized().json(ErrorBody {
                error: "Invalid email or password".to_string(),
            });
        }
        Err(err) => return json_error(err, "Login failed"),
    };

    match sign_in(&req, &session_user) {
        Ok(()) => HttpResponse::Ok().json(LoginBody {
            email: session_user.email,
        }),
        Err(err) => {
            log::error!("Failed to start session: {err}");
            json_error(ServiceError::Internal, "Login failed")
        }
    }
}

#[post("/auth/logout")]
pub async fn logout(req: HttpRequest) -> impl Responder {
    sign_out(&req);
    HttpResponse::NoContent().finish()
}
