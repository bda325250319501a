// Shared records and a seeded remote store for controller tests.
//
// Rows in the store use the same values the record builders produce, so a loaded
// collection can be compared against `admin(..)`, `user(..)` and `review(..)` directly.

use crate::modules::collections::core::entities::{Admin, Review, User};
use crate::modules::collections::core::status::{AccountStatus, Approval};
use crate::shared::infrastructure::remote_store::in_memory::InMemoryRemoteStore;
use serde_json::json;

pub fn admin(admin_id: i64, status: AccountStatus) -> Admin {
    Admin {
        admin_id,
        name: format!("Admin {admin_id}"),
        email: format!("admin{admin_id}@example.com"),
        status,
    }
}

pub fn user(user_id: i64, status: AccountStatus) -> User {
    User {
        user_id,
        full_name: format!("User {user_id}"),
        email: format!("user{user_id}@example.com"),
        phone: None,
        status,
    }
}

pub fn review(review_id: i64, is_approved: Approval) -> Review {
    Review {
        review_id,
        user_id: 1,
        rating: 5,
        comment: format!("Review {review_id}"),
        is_approved,
        created_at: None,
    }
}

pub fn seeded_store() -> InMemoryRemoteStore {
    InMemoryRemoteStore::new()
        .with_table(
            "admins",
            "admin_id",
            vec![
                json!({"admin_id": 1, "name": "Admin 1", "email": "admin1@example.com", "status": "active", "password_hash": "x"}),
                json!({"admin_id": 2, "name": "Admin 2", "email": "admin2@example.com", "status": "active", "password_hash": "y"}),
            ],
        )
        .with_table(
            "users",
            "user_id",
            vec![
                json!({"user_id": 1, "full_name": "User 1", "email": "user1@example.com", "phone": null, "status": "active"}),
                json!({"user_id": 2, "full_name": "User 2", "email": "user2@example.com", "phone": "+31 6 1234 5678", "status": "inactive"}),
            ],
        )
        .with_table(
            "reviews",
            "review_id",
            vec![
                json!({"review_id": 1, "user_id": 1, "rating": 5, "comment": "Great", "is_approved": true, "created_at": "2026-01-01T09:00:00Z"}),
                json!({"review_id": 2, "user_id": 2, "rating": 2, "comment": "Slow", "is_approved": false, "created_at": "2026-02-01T09:00:00Z"}),
                json!({"review_id": 3, "user_id": 2, "rating": 4, "comment": "Fine", "is_approved": true, "created_at": null}),
            ],
        )
        .with_table(
            "devices",
            "id",
            vec![
                json!({"id": 7, "imei": "DEV123", "store_id": 42, "product_id": 3, "sales_id": 9}),
                json!({"id": 11, "imei": "DEV123", "store_id": 1, "product_id": 3, "sales_id": 9}),
                json!({"id": 12, "imei": "DEV404", "store_id": 42, "product_id": 99, "sales_id": 9}),
                json!({"id": 13, "imei": "DEV777", "store_id": 42, "product_id": 3, "sales_id": 13}),
                json!({"id": 20, "imei": "DEV555", "store_id": 42, "product_id": 4, "sales_id": 20}),
                json!({"id": 21, "imei": "DEV555", "store_id": 42, "product_id": 4, "sales_id": 21}),
                json!({"id": 22, "imei": "DEV555", "store_id": 42, "product_id": 4, "sales_id": 22}),
            ],
        )
        .with_table(
            "products",
            "id",
            vec![
                json!({"id": 3, "name": "Phone X"}),
                json!({"id": 4, "name": "Tablet S"}),
            ],
        )
        .with_table(
            "sales",
            "id",
            vec![
                json!({"id": 9, "receipt_number": "R-0009", "price": 499, "created_at": "2026-03-01T12:00:00Z"}),
                json!({"id": 13, "receipt_number": "R-0013", "price": "n/a"}),
                json!({"id": 20, "receipt_number": "R-0020", "price": "10.00"}),
                json!({"id": 21, "receipt_number": "R-0021", "price": 25}),
                json!({"id": 22, "receipt_number": "R-0022", "price": 25.0}),
            ],
        )
}
