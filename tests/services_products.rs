use product_catalog::domain::product::PLACEHOLDER_IMAGE;
use product_catalog::domain::user::SessionUser;
use product_catalog::forms::auth::RegisterForm;
use product_catalog::forms::products::AddProductForm;
use product_catalog::repository::{DieselRepository, ProductReader, UserReader};
use product_catalog::services::{ServiceError, auth, products};

mod common;

fn session() -> SessionUser {
    SessionUser {
        id: 1,
        email: "seller@example.com".into(),
    }
}

fn phone_form() -> AddProductForm {
    AddProductForm {
        name: Some("Phone X".into()),
        brand: Some("Acme".into()),
        description: Some("Great phone".into()),
        price: Some(499.99),
        category: Some("PH".into()),
        weight: Some(0.2),
        image: None,
    }
}

#[test]
fn create_product_stores_defaults() {
    let test_db = common::TestDb::new("service_create_product_stores_defaults.db");
    let repo = DieselRepository::new(test_db.pool());

    let product = products::create_product(&repo, Some(&session()), phone_form())
        .expect("expected product creation to succeed");

    assert!(product.id.get() > 0);
    assert_eq!(product.image, PLACEHOLDER_IMAGE);

    let fetched = products::get_product(&repo, &product.id.to_string()).expect("fetch");
    assert_eq!(fetched, product);
}

#[test]
fn create_product_without_session_persists_nothing() {
    let test_db = common::TestDb::new("service_create_product_without_session.db");
    let repo = DieselRepository::new(test_db.pool());

    let result = products::create_product(&repo, None, phone_form());

    assert!(matches!(result, Err(ServiceError::Unauthorized)));
    assert!(repo.list_products().expect("list").is_empty());
}

#[test]
fn create_product_with_missing_field_persists_nothing() {
    let test_db = common::TestDb::new("service_create_product_missing_field.db");
    let repo = DieselRepository::new(test_db.pool());

    let form = AddProductForm {
        brand: None,
        ..phone_form()
    };
    let result = products::create_product(&repo, Some(&session()), form);

    assert!(matches!(result, Err(ServiceError::Form(_))));
    assert!(repo.list_products().expect("list").is_empty());
}

#[test]
fn get_product_distinguishes_malformed_and_absent_ids() {
    let test_db = common::TestDb::new("service_get_product_ids.db");
    let repo = DieselRepository::new(test_db.pool());

    assert!(matches!(
        products::get_product(&repo, "not-an-id"),
        Err(ServiceError::InvalidId(_))
    ));
    assert!(matches!(
        products::get_product(&repo, "999"),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn register_twice_creates_one_account() {
    let test_db = common::TestDb::new("service_register_twice.db");
    let repo = DieselRepository::new(test_db.pool());

    let form = RegisterForm {
        email: Some("dup@example.com".into()),
        password: Some("password123".into()),
    };

    auth::register(&repo, form.clone()).expect("first registration");
    let second = auth::register(&repo, form);

    assert!(matches!(second, Err(ServiceError::Form(_))));
    let stored = repo
        .get_user_by_email("dup@example.com")
        .expect("lookup")
        .expect("account exists");
    assert_ne!(stored.password_hash, "password123");
}
