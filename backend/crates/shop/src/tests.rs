//! Integration tests for the shop router (in-memory repositories)

#[cfg(test)]
mod support {
    use auth::domain::repository::AccountRepository;
    use auth::domain::value_object::account_role::AccountRole;
    use auth::infra::memory::MemoryAccountRepository;
    use auth::{AuthAppState, AuthConfig, auth_router};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Response, header};
    use kernel::id::AccountId;
    use platform::password::PasswordHasher;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::domain::entity::book::{BookDraft, BookFields};
    use crate::infra::memory::MemoryShopRepository;
    use crate::presentation::{ShopAppState, shop_router};

    pub struct TestApp {
        pub router: Router,
        pub accounts: MemoryAccountRepository,
        pub shop: MemoryShopRepository,
    }

    impl TestApp {
        pub fn new() -> Self {
            let config = AuthConfig::new(&[9u8; 32])
                .unwrap()
                .with_password_hasher(PasswordHasher::with_params(8, 1, 1).unwrap());
            let accounts = MemoryAccountRepository::new();
            let shop = MemoryShopRepository::new(accounts.clone()).unwrap();

            let auth_state = AuthAppState::new(accounts.clone(), config);
            let shop_state = ShopAppState::new(shop.clone());

            let api = auth_router(auth_state.clone()).merge(shop_router(shop_state, auth_state));

            Self {
                router: Router::new().nest("/api", api),
                accounts,
                shop,
            }
        }

        /// Same app with book 7 in the catalog
        pub fn with_book_7() -> Self {
            let app = Self::new();
            app.seed_book(7, "Dune");
            app
        }

        pub fn seed_book(&self, id: i64, title: &str) {
            let draft = BookDraft::new(BookFields {
                title: title.to_string(),
                author: "Frank Herbert".to_string(),
                price: 9.99,
                stock: 10,
                ..Default::default()
            })
            .unwrap();
            self.shop.seed_book(id, &draft).unwrap();
        }

        pub async fn send(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> Response<Body> {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let body = match body {
                Some(json) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };

            self.router
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap()
        }

        /// Register and return the token
        pub async fn register(&self, email: &str) -> String {
            let response = self
                .send(
                    "POST",
                    "/api/auth/register",
                    None,
                    Some(json!({ "email": email, "password": "p" })),
                )
                .await;
            assert_eq!(response.status(), 200);
            json_body(response).await["token"]
                .as_str()
                .unwrap()
                .to_string()
        }

        /// Register an account and make it an admin through the store
        pub async fn register_admin(&self, email: &str) -> String {
            let response = self
                .send(
                    "POST",
                    "/api/auth/register",
                    None,
                    Some(json!({ "email": email, "password": "p" })),
                )
                .await;
            let body = json_body(response).await;
            let id = body["account"]["id"].as_i64().unwrap();
            self.accounts
                .set_role(AccountId::from_db(id), AccountRole::Admin)
                .await
                .unwrap()
                .unwrap();
            body["token"].as_str().unwrap().to_string()
        }
    }

    pub async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod cart_tests {
    use serde_json::json;

    use super::support::*;

    #[tokio::test]
    async fn test_reference_scenario() {
        let app = TestApp::with_book_7();

        let response = app
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({ "email": "a@x.com", "password": "p" })),
            )
            .await;
        assert_eq!(response.status(), 200);
        assert!(json_body(response).await["token"].is_string());

        let response = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "a@x.com", "password": "p" })),
            )
            .await;
        assert_eq!(response.status(), 200);
        let token = json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .send(
                "POST",
                "/api/cart/items",
                Some(&token),
                Some(json!({ "book_id": 7, "quantity": 2 })),
            )
            .await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            json_body(response).await,
            json!({ "book_id": 7, "quantity": 2 })
        );

        let response = app
            .send(
                "POST",
                "/api/cart/items",
                Some(&token),
                Some(json!({ "book_id": 7, "quantity": 3 })),
            )
            .await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            json_body(response).await,
            json!({ "book_id": 7, "quantity": 5 })
        );

        let response = app
            .send("DELETE", "/api/cart/items/7", Some(&token), None)
            .await;
        assert_eq!(response.status(), 200);

        let response = app.send("GET", "/api/cart", Some(&token), None).await;
        assert_eq!(response.status(), 200);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_repeated_adds_leave_one_entry() {
        let app = TestApp::with_book_7();
        app.seed_book(8, "Emma");
        let token = app.register("a@x.io").await;

        for (book_id, quantity) in [(7, 2), (8, 1), (7, 3)] {
            let response = app
                .send(
                    "POST",
                    "/api/cart/items",
                    Some(&token),
                    Some(json!({ "book_id": book_id, "quantity": quantity })),
                )
                .await;
            assert_eq!(response.status(), 200);
        }

        let response = app.send("GET", "/api/cart", Some(&token), None).await;
        assert_eq!(
            json_body(response).await,
            json!([
                { "book_id": 7, "quantity": 5 },
                { "book_id": 8, "quantity": 1 },
            ])
        );
    }

    #[tokio::test]
    async fn test_concurrent_adds_merge() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let router = app.router.clone();
            let token = token.clone();
            handles.push(tokio::spawn(async move {
                use tower::ServiceExt;

                let request = axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/cart/items")
                    .header("authorization", format!("Bearer {token}"))
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(
                        json!({ "book_id": 7, "quantity": 1 }).to_string(),
                    ))
                    .unwrap();
                router.oneshot(request).await.unwrap().status()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 200);
        }

        let response = app.send("GET", "/api/cart", Some(&token), None).await;
        assert_eq!(
            json_body(response).await,
            json!([{ "book_id": 7, "quantity": 10 }])
        );
    }

    #[tokio::test]
    async fn test_carts_are_per_account() {
        let app = TestApp::with_book_7();
        let first = app.register("a@x.io").await;
        let second = app.register("b@x.io").await;

        app.send(
            "POST",
            "/api/cart/items",
            Some(&first),
            Some(json!({ "book_id": 7, "quantity": 2 })),
        )
        .await;

        let response = app.send("GET", "/api/cart", Some(&second), None).await;
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_add_validation_and_missing_book() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        for quantity in [0, -1, 1000] {
            let response = app
                .send(
                    "POST",
                    "/api/cart/items",
                    Some(&token),
                    Some(json!({ "book_id": 7, "quantity": quantity })),
                )
                .await;
            assert_eq!(response.status(), 400, "quantity {quantity}");
        }

        let response = app
            .send(
                "POST",
                "/api/cart/items",
                Some(&token),
                Some(json!({ "book_id": 99, "quantity": 1 })),
            )
            .await;
        assert_eq!(response.status(), 404);

        let response = app
            .send(
                "POST",
                "/api/cart/items",
                Some(&token),
                Some(json!({ "book_id": "seven", "quantity": 1 })),
            )
            .await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_merge_beyond_limit_rejected() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        let response = app
            .send(
                "POST",
                "/api/cart/items",
                Some(&token),
                Some(json!({ "book_id": 7, "quantity": 998 })),
            )
            .await;
        assert_eq!(response.status(), 200);

        let response = app
            .send(
                "POST",
                "/api/cart/items",
                Some(&token),
                Some(json!({ "book_id": 7, "quantity": 2 })),
            )
            .await;
        assert_eq!(response.status(), 400);

        let response = app.send("GET", "/api/cart", Some(&token), None).await;
        assert_eq!(
            json_body(response).await,
            json!([{ "book_id": 7, "quantity": 998 }])
        );
    }

    #[tokio::test]
    async fn test_update_replaces_quantity() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        let response = app
            .send(
                "PUT",
                "/api/cart/items/7",
                Some(&token),
                Some(json!({ "quantity": 4 })),
            )
            .await;
        assert_eq!(response.status(), 404);

        app.send(
            "POST",
            "/api/cart/items",
            Some(&token),
            Some(json!({ "book_id": 7, "quantity": 2 })),
        )
        .await;

        let response = app
            .send(
                "PUT",
                "/api/cart/items/7",
                Some(&token),
                Some(json!({ "quantity": 4 })),
            )
            .await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            json_body(response).await,
            json!({ "book_id": 7, "quantity": 4 })
        );
    }

    #[tokio::test]
    async fn test_remove_missing_entry_not_found() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        let response = app
            .send("DELETE", "/api/cart/items/7", Some(&token), None)
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_cart_requires_token() {
        let app = TestApp::with_book_7();

        let response = app.send("GET", "/api/cart", None, None).await;
        assert_eq!(response.status(), 401);

        let response = app
            .send(
                "POST",
                "/api/cart/items",
                None,
                Some(json!({ "book_id": 7, "quantity": 1 })),
            )
            .await;
        assert_eq!(response.status(), 401);
    }
}

#[cfg(test)]
mod review_tests {
    use serde_json::json;

    use super::support::*;

    #[tokio::test]
    async fn test_second_review_conflicts() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        let response = app
            .send(
                "POST",
                "/api/books/7/reviews",
                Some(&token),
                Some(json!({ "rating": 5, "comment": "Great" })),
            )
            .await;
        assert_eq!(response.status(), 200);
        let body = json_body(response).await;
        assert_eq!(body["rating"], 5);
        assert_eq!(body["book_id"], 7);

        let response = app
            .send(
                "POST",
                "/api/books/7/reviews",
                Some(&token),
                Some(json!({ "rating": 1, "comment": "Changed my mind" })),
            )
            .await;
        assert_eq!(response.status(), 409);

        let response = app
            .send("GET", "/api/books/7/reviews", Some(&token), None)
            .await;
        let reviews = json_body(response).await;
        assert_eq!(reviews.as_array().unwrap().len(), 1);
        assert_eq!(reviews[0]["comment"], "Great");
    }

    #[tokio::test]
    async fn test_other_accounts_may_review_same_book() {
        let app = TestApp::with_book_7();
        let first = app.register("a@x.io").await;
        let second = app.register("b@x.io").await;

        for token in [&first, &second] {
            let response = app
                .send(
                    "POST",
                    "/api/books/7/reviews",
                    Some(token),
                    Some(json!({ "rating": 4 })),
                )
                .await;
            assert_eq!(response.status(), 200);
        }

        let response = app
            .send("GET", "/api/books/7/reviews", Some(&first), None)
            .await;
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_review_validation() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        for rating in [0, 6] {
            let response = app
                .send(
                    "POST",
                    "/api/books/7/reviews",
                    Some(&token),
                    Some(json!({ "rating": rating })),
                )
                .await;
            assert_eq!(response.status(), 400);
        }

        let response = app
            .send(
                "POST",
                "/api/books/7/reviews",
                Some(&token),
                Some(json!({ "rating": 3, "comment": "a".repeat(2001) })),
            )
            .await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_review_missing_book_or_account() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        let response = app
            .send(
                "POST",
                "/api/books/99/reviews",
                Some(&token),
                Some(json!({ "rating": 3 })),
            )
            .await;
        assert_eq!(response.status(), 404);

        let response = app
            .send("GET", "/api/books/99/reviews", Some(&token), None)
            .await;
        assert_eq!(response.status(), 404);

        // Valid token, deleted account
        let response = app
            .send("DELETE", "/api/accounts/1", Some(&token), None)
            .await;
        assert_eq!(response.status(), 200);

        let response = app
            .send(
                "POST",
                "/api/books/7/reviews",
                Some(&token),
                Some(json!({ "rating": 3 })),
            )
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_account_delete_cascades() {
        use crate::domain::repository::CartRepository;
        use kernel::id::AccountId;

        let app = TestApp::with_book_7();
        let token_a = app.register("a@x.io").await;
        let token_b = app.register("b@x.io").await;

        app.send(
            "POST",
            "/api/cart/items",
            Some(&token_a),
            Some(json!({ "book_id": 7, "quantity": 2 })),
        )
        .await;
        for token in [&token_a, &token_b] {
            let response = app
                .send(
                    "POST",
                    "/api/books/7/reviews",
                    Some(token),
                    Some(json!({ "rating": 4 })),
                )
                .await;
            assert_eq!(response.status(), 200);
        }

        let response = app
            .send("DELETE", "/api/accounts/1", Some(&token_a), None)
            .await;
        assert_eq!(response.status(), 200);

        let cart = CartRepository::list(&app.shop, AccountId::from_db(1))
            .await
            .unwrap();
        assert!(cart.is_empty());

        let response = app
            .send("GET", "/api/books/7/reviews", Some(&token_b), None)
            .await;
        let reviews = json_body(response).await;
        assert_eq!(reviews.as_array().unwrap().len(), 1);
        assert_eq!(reviews[0]["account_id"], 2);
    }

    #[tokio::test]
    async fn test_review_requires_token() {
        let app = TestApp::with_book_7();

        let response = app
            .send(
                "POST",
                "/api/books/7/reviews",
                None,
                Some(json!({ "rating": 3 })),
            )
            .await;
        assert_eq!(response.status(), 401);
    }
}

#[cfg(test)]
mod catalog_tests {
    use serde_json::json;

    use super::support::*;

    fn book_json() -> serde_json::Value {
        json!({
            "title": "Emma",
            "author": "Jane Austen",
            "isbn": "978-0141439587",
            "genre": "Classic",
            "price": 7.5,
            "quantity": 4,
            "description": "Matchmaking."
        })
    }

    #[tokio::test]
    async fn test_reads_require_token() {
        let app = TestApp::with_book_7();

        let response = app.send("GET", "/api/books", None, None).await;
        assert_eq!(response.status(), 401);

        let token = app.register("a@x.io").await;
        let response = app.send("GET", "/api/books/7", Some(&token), None).await;
        assert_eq!(response.status(), 200);
        let body = json_body(response).await;
        assert_eq!(body["id"], 7);
        assert_eq!(body["title"], "Dune");
        assert_eq!(body["quantity"], 10);

        let response = app.send("GET", "/api/books/8", Some(&token), None).await;
        assert_eq!(response.status(), 404);

        let response = app.send("GET", "/api/books/x", Some(&token), None).await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_standard_account_cannot_write() {
        let app = TestApp::with_book_7();
        let token = app.register("a@x.io").await;

        let response = app
            .send("POST", "/api/books", Some(&token), Some(book_json()))
            .await;
        assert_eq!(response.status(), 403);

        let response = app.send("DELETE", "/api/books/7", Some(&token), None).await;
        assert_eq!(response.status(), 403);

        let response = app.send("POST", "/api/books", None, Some(book_json())).await;
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn test_admin_create_update_list() {
        let app = TestApp::with_book_7();
        let admin = app.register_admin("root@x.io").await;

        let response = app
            .send("POST", "/api/books", Some(&admin), Some(book_json()))
            .await;
        assert_eq!(response.status(), 200);
        let created = json_body(response).await;
        assert_eq!(created["title"], "Emma");
        let id = created["id"].as_i64().unwrap();
        assert!(id > 7);

        let mut update = book_json();
        update["price"] = json!(5.0);
        update["quantity"] = json!(0);
        let response = app
            .send("PUT", &format!("/api/books/{id}"), Some(&admin), Some(update))
            .await;
        assert_eq!(response.status(), 200);
        let updated = json_body(response).await;
        assert_eq!(updated["price"], 5.0);
        assert_eq!(updated["quantity"], 0);

        let response = app.send("GET", "/api/books", Some(&admin), None).await;
        let books = json_body(response).await;
        assert_eq!(books.as_array().unwrap().len(), 2);
        assert_eq!(books[0]["id"], 7);
    }

    #[tokio::test]
    async fn test_admin_write_validation() {
        let app = TestApp::with_book_7();
        let admin = app.register_admin("root@x.io").await;

        let mut invalid = book_json();
        invalid["title"] = json!("  ");
        let response = app
            .send("POST", "/api/books", Some(&admin), Some(invalid))
            .await;
        assert_eq!(response.status(), 400);

        let mut negative = book_json();
        negative["price"] = json!(-1);
        let response = app
            .send("PUT", "/api/books/7", Some(&admin), Some(negative))
            .await;
        assert_eq!(response.status(), 400);

        let response = app
            .send("PUT", "/api/books/99", Some(&admin), Some(book_json()))
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_delete_book_cascades() {
        let app = TestApp::with_book_7();
        let admin = app.register_admin("root@x.io").await;
        let token = app.register("a@x.io").await;

        app.send(
            "POST",
            "/api/cart/items",
            Some(&token),
            Some(json!({ "book_id": 7, "quantity": 2 })),
        )
        .await;
        app.send(
            "POST",
            "/api/books/7/reviews",
            Some(&token),
            Some(json!({ "rating": 5 })),
        )
        .await;

        let response = app.send("DELETE", "/api/books/7", Some(&admin), None).await;
        assert_eq!(response.status(), 200);
        assert_eq!(json_body(response).await["success"], true);

        let response = app.send("GET", "/api/cart", Some(&token), None).await;
        assert_eq!(json_body(response).await, json!([]));

        let response = app.send("DELETE", "/api/books/7", Some(&admin), None).await;
        assert_eq!(response.status(), 404);
    }
}
