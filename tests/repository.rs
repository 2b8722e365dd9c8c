use diesel::prelude::*;
use product_catalog::domain::product::{NewProduct, PLACEHOLDER_IMAGE, ProductId};
use product_catalog::domain::user::NewUser;
use product_catalog::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryError, UserReader, UserWriter,
};

mod common;

#[test]
fn test_product_repository_create_and_read() {
    let test_db = common::TestDb::new("test_product_repository_create_and_read.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&NewProduct::new(
            "Phone X",
            "Acme",
            "Great phone",
            499.99,
            "PH",
            0.2,
        ))
        .unwrap();

    assert!(created.id.get() > 0);
    assert_eq!(created.image, PLACEHOLDER_IMAGE);
    assert_eq!(created.price, 499.99);

    let fetched = repo.get_product_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);

    let with_image = repo
        .create_product(
            &NewProduct::new("Tablet", "Acme", "Big screen", 299.0, "TB", 0.5)
                .with_image("https://cdn.example.com/tablet.png"),
        )
        .unwrap();
    assert_ne!(with_image.id, created.id);
    assert_eq!(with_image.image, "https://cdn.example.com/tablet.png");

    let absent = ProductId::new(created.id.get() + 1000).unwrap();
    assert!(repo.get_product_by_id(absent).unwrap().is_none());
}

#[test]
fn test_product_repository_lists_newest_first() {
    use product_catalog::schema::products;

    let test_db = common::TestDb::new("test_product_repository_lists_newest_first.db");
    let repo = DieselRepository::new(test_db.pool());

    let old = repo
        .create_product(&NewProduct::new("Old", "Acme", "Old one", 1.0, "AC", 0.1))
        .unwrap();
    let first_tie = repo
        .create_product(&NewProduct::new("Tie A", "Acme", "Same second", 2.0, "AC", 0.1))
        .unwrap();
    let second_tie = repo
        .create_product(&NewProduct::new("Tie B", "Acme", "Same second", 3.0, "AC", 0.1))
        .unwrap();

    // Backdate one row so ordering does not depend on wall-clock timing.
    let mut conn = test_db.pool().get().unwrap();
    diesel::sql_query("UPDATE products SET created_at = '2020-01-01 00:00:00' WHERE id = ?")
        .bind::<diesel::sql_types::Integer, _>(old.id.get())
        .execute(&mut conn)
        .unwrap();
    diesel::update(products::table.filter(products::id.eq(first_tie.id.get())))
        .set(products::created_at.eq(second_tie.created_at))
        .execute(&mut conn)
        .unwrap();

    let names: Vec<String> = repo
        .list_products()
        .unwrap()
        .into_iter()
        .map(|product| product.name)
        .collect();

    assert_eq!(names, vec!["Tie B", "Tie A", "Old"]);
}

#[test]
fn test_user_repository_enforces_unique_email() {
    let test_db = common::TestDb::new("test_user_repository_enforces_unique_email.db");
    let repo = DieselRepository::new(test_db.pool());

    let user = repo
        .create_user(&NewUser::new("Alice@Example.com", "$argon2id$fake".to_string()))
        .unwrap();
    assert_eq!(user.email, "alice@example.com");

    let found = repo.get_user_by_email("ALICE@example.com").unwrap().unwrap();
    assert_eq!(found.id, user.id);

    let err = repo
        .create_user(&NewUser::new("alice@example.com", "$argon2id$other".to_string()))
        .expect_err("duplicate email should fail");
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));

    assert!(repo.get_user_by_email("bob@example.com").unwrap().is_none());
}
