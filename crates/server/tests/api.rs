use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;

const SECRET: &str = "test-secret";

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();
    server::app(engine, SECRET)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn register_and_login(app: &Router, username: &str, email: &str) -> String {
    let (status, _) = send(
        app,
        request(
            "POST",
            "/user",
            None,
            Some(json!({
                "username": username,
                "email": email,
                "password": "correct horse",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": email, "password": "correct horse" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_account(app: &Router, token: &str, account_type: &str, balance: i64) -> i64 {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/accounts",
            Some(token),
            Some(json!({ "accountType": account_type, "balance": balance })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["account"]["id"].as_i64().unwrap()
}

async fn create_category(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/categories",
            Some(token),
            Some(json!({ "name": name })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["category"]["id"].as_i64().unwrap()
}

async fn account_balance(app: &Router, token: &str, account_id: i64) -> i64 {
    let (status, body) = send(app, request("GET", "/accounts", Some(token), None)).await;
    assert_eq!(status, StatusCode::OK);
    body["account"]
        .as_array()
        .unwrap()
        .iter()
        .find(|account| account["id"].as_i64() == Some(account_id))
        .unwrap()["balance"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn register_then_duplicate_email_conflicts() {
    let app = test_app().await;

    let payload = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "correct horse",
    });
    let (status, body) = send(&app, request("POST", "/user", None, Some(payload.clone()))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully.");

    let (status, body) = send(&app, request("POST", "/user", None, Some(payload))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "email already in use");
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/user",
            None,
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "short",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password must be at least 8 characters long");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email() {
    let app = test_app().await;
    register_and_login(&app, "alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "wrong password" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "whatever it is" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");
}

#[tokio::test]
async fn missing_and_invalid_tokens_answer_with_distinct_messages() {
    let app = test_app().await;

    let (status, body) = send(&app, request("GET", "/accounts", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No authorization token provided.");
    assert_eq!(body["status"], 401);

    let (status, body) = send(&app, request("GET", "/accounts", Some("garbage"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token.");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let app = test_app().await;
    register_and_login(&app, "alice", "alice@example.com").await;

    #[derive(serde::Serialize)]
    struct Claims {
        sub: i32,
        email: String,
        iat: usize,
        exp: usize,
    }
    let stale = Utc::now() - Duration::hours(2);
    let token = encode(
        &Header::default(),
        &Claims {
            sub: 1,
            email: "alice@example.com".to_string(),
            iat: stale.timestamp() as usize,
            exp: (stale + Duration::hours(1)).timestamp() as usize,
        },
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let (status, body) = send(&app, request("GET", "/accounts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token.");
}

#[tokio::test]
async fn account_create_list_delete_round_trip() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/accounts",
            Some(&token),
            Some(json!({ "accountType": "cash" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Account created successfully.");
    assert_eq!(body["account"]["accountType"], "cash");
    assert_eq!(body["account"]["balance"], 0);
    let account_id = body["account"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, request("GET", "/accounts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/accounts/{account_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account deleted successfully.");

    let (_, body) = send(&app, request("GET", "/accounts", Some(&token), None)).await;
    assert!(body["account"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_missing_account_is_not_found() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;

    let (status, body) = send(&app, request("DELETE", "/accounts/999", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no such account");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn foreign_accounts_are_invisible() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "alice@example.com").await;
    let mallory = register_and_login(&app, "mallory", "mallory@example.com").await;
    let account_id = create_account(&app, &alice, "cash", 100).await;

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/accounts/{account_id}"),
            Some(&mallory),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no such account");

    let category_id = create_category(&app, &mallory, "Groceries").await;
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transact",
            Some(&mallory),
            Some(json!({
                "accountId": account_id,
                "amount": -30,
                "categoryIds": [category_id],
                "description": "sneaky",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no such account");
    assert_eq!(account_balance(&app, &alice, account_id).await, 100);
}

#[tokio::test]
async fn transact_posts_and_moves_the_balance() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;
    let account_id = create_account(&app, &token, "cash", 100).await;
    let category_id = create_category(&app, &token, "Coffee").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transact",
            Some(&token),
            Some(json!({
                "accountId": account_id,
                "amount": -30,
                "categoryIds": [category_id],
                "description": "coffee",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Transaction created successfully");
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["accountId"].as_i64(), Some(account_id));
    assert_eq!(body["data"]["amount"], -30);
    assert_eq!(body["data"]["description"], "coffee");
    assert_eq!(body["data"]["categoryIds"], json!([category_id]));
    assert!(body["data"]["transactionDate"].is_string());

    assert_eq!(account_balance(&app, &token, account_id).await, 70);
}

#[tokio::test]
async fn transact_with_unknown_category_changes_nothing() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;
    let account_id = create_account(&app, &token, "cash", 100).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transact",
            Some(&token),
            Some(json!({
                "accountId": account_id,
                "amount": -30,
                "categoryIds": [999],
                "description": "coffee",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "category not supported");

    assert_eq!(account_balance(&app, &token, account_id).await, 100);
    let (_, body) = send(&app, request("GET", "/transactions", Some(&token), None)).await;
    assert!(body["datum"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn transact_validates_its_fields() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;
    let account_id = create_account(&app, &token, "cash", 100).await;
    let category_id = create_category(&app, &token, "Coffee").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transact",
            Some(&token),
            Some(json!({
                "accountId": account_id,
                "amount": 0,
                "categoryIds": [category_id],
                "description": "nothing",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "amount must be non-zero");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transact",
            Some(&token),
            Some(json!({
                "accountId": account_id,
                "amount": -5,
                "categoryIds": [category_id],
                "description": "  ",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "description must not be empty");

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transact",
            Some(&token),
            Some(json!({
                "accountId": account_id,
                "amount": -5,
                "categoryIds": [],
                "description": "coffee",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "at least one category is required");

    // Missing fields never reach the engine; the JSON extractor reports them.
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transact",
            Some(&token),
            Some(json!({ "accountId": account_id })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn report_range_is_inclusive_and_validated() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;
    let account_id = create_account(&app, &token, "cash", 100).await;
    let category_id = create_category(&app, &token, "Coffee").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transact",
            Some(&token),
            Some(json!({
                "accountId": account_id,
                "amount": -30,
                "categoryIds": [category_id],
                "description": "coffee",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let today = Utc::now().date_naive();
    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/transaction/{today}/{today}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Historical report generated successfully");
    assert_eq!(body["datum"].as_array().unwrap().len(), 1);
    assert_eq!(body["datum"][0]["account"]["accountType"], "cash");
    assert_eq!(body["datum"][0]["categories"][0]["name"], "Coffee");

    let tomorrow = today + Duration::days(1);
    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/transaction/{tomorrow}/{tomorrow}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["datum"].as_array().unwrap().is_empty());

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/transaction/{tomorrow}/{today}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "start date must be on or before end date");

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/transaction/not-a-date/{today}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid date format");
}

#[tokio::test]
async fn account_type_report_matches_exactly() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;
    let lower = create_account(&app, &token, "cash", 100).await;
    let upper = create_account(&app, &token, "Cash", 100).await;
    let category_id = create_category(&app, &token, "Coffee").await;

    for (account_id, description) in [(lower, "from lower"), (upper, "from upper")] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/transact",
                Some(&token),
                Some(json!({
                    "accountId": account_id,
                    "amount": -10,
                    "categoryIds": [category_id],
                    "description": description,
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, request("GET", "/transaction/cash", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let datum = body["datum"].as_array().unwrap();
    assert_eq!(datum.len(), 1);
    assert_eq!(datum[0]["description"], "from lower");

    let (_, body) = send(&app, request("GET", "/transaction/Cash", Some(&token), None)).await;
    let datum = body["datum"].as_array().unwrap();
    assert_eq!(datum.len(), 1);
    assert_eq!(datum[0]["description"], "from upper");
}

#[tokio::test]
async fn whole_report_only_covers_the_caller() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "alice@example.com").await;
    let bob = register_and_login(&app, "bob", "bob@example.com").await;
    let alice_account = create_account(&app, &alice, "cash", 100).await;
    let bob_account = create_account(&app, &bob, "cash", 100).await;
    let category_id = create_category(&app, &alice, "Coffee").await;

    for (token, account_id) in [(&alice, alice_account), (&bob, bob_account)] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/transact",
                Some(token),
                Some(json!({
                    "accountId": account_id,
                    "amount": -10,
                    "categoryIds": [category_id],
                    "description": "coffee",
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, request("GET", "/transactions", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    let datum = body["datum"].as_array().unwrap();
    assert_eq!(datum.len(), 1);
    assert_eq!(datum[0]["accountId"].as_i64(), Some(alice_account));
}

#[tokio::test]
async fn categories_crud_round_trip() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/categories",
            Some(&token),
            Some(json!({ "name": "Food" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Category created successfully.");
    let root_id = body["category"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/categories",
            Some(&token),
            Some(json!({ "name": "Coffee", "parentId": root_id })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category"]["parentId"].as_i64(), Some(root_id));
    let child_id = body["category"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, request("GET", "/categories", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"].as_i64(), Some(root_id));
    assert_eq!(categories[0]["children"][0]["id"].as_i64(), Some(child_id));

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/categories/{child_id}"),
            Some(&token),
            Some(json!({ "name": "Espresso" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category updated successfully.");
    assert_eq!(body["category"]["name"], "Espresso");
    assert_eq!(body["category"]["parentId"].as_i64(), Some(root_id));

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/categories/{root_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category deleted successfully.");
    assert_eq!(body["category"]["id"].as_i64(), Some(root_id));

    // The child survives and is promoted to a root.
    let (_, body) = send(&app, request("GET", "/categories", Some(&token), None)).await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"].as_i64(), Some(child_id));
    assert!(categories[0]["parentId"].is_null());
}

#[tokio::test]
async fn category_with_missing_parent_is_not_found() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/categories",
            Some(&token),
            Some(json!({ "name": "Coffee", "parentId": 999 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no such parent category");
}

#[tokio::test]
async fn budgets_crud_round_trip() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;
    let account_id = create_account(&app, &token, "cash", 100).await;
    let category_id = create_category(&app, &token, "Groceries").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/budgets",
            Some(&token),
            Some(json!({
                "categoryId": category_id,
                "amount": 500,
                "accountId": account_id,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Budget created successfully.");
    assert_eq!(body["budget"]["accountId"].as_i64(), Some(account_id));
    assert!(body["budget"]["accountType"].is_null());
    let by_account = body["budget"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/budgets",
            Some(&token),
            Some(json!({
                "categoryId": category_id,
                "amount": 200,
                "accountType": "cash",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["budget"]["accountType"], "cash");
    assert!(body["budget"]["accountId"].is_null());

    let (status, body) = send(&app, request("GET", "/budgets", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let budgets = body["budgets"].as_array().unwrap();
    assert_eq!(budgets.len(), 2);
    assert_eq!(budgets[0]["category"]["name"], "Groceries");
    assert_eq!(budgets[0]["account"]["id"].as_i64(), Some(account_id));
    assert!(budgets[1]["account"].is_null());

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/budgets/{by_account}"),
            Some(&token),
            Some(json!({
                "categoryId": category_id,
                "amount": 750,
                "accountType": "cash",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget updated successfully.");
    assert_eq!(body["budget"]["amount"], 750);
    assert_eq!(body["budget"]["accountType"], "cash");
    assert!(body["budget"]["accountId"].is_null());

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/budgets/{by_account}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget deleted successfully.");

    let (_, body) = send(&app, request("GET", "/budgets", Some(&token), None)).await;
    assert_eq!(body["budgets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn budget_scope_is_resolved_from_the_payload() {
    let app = test_app().await;
    let token = register_and_login(&app, "alice", "alice@example.com").await;
    let account_id = create_account(&app, &token, "cash", 100).await;
    let category_id = create_category(&app, &token, "Groceries").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/budgets",
            Some(&token),
            Some(json!({ "categoryId": category_id, "amount": 500 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Either accountId or accountType must be provided."
    );

    // When both are sent the account id wins.
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/budgets",
            Some(&token),
            Some(json!({
                "categoryId": category_id,
                "amount": 500,
                "accountId": account_id,
                "accountType": "cash",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["budget"]["accountId"].as_i64(), Some(account_id));
    assert!(body["budget"]["accountType"].is_null());
}

#[tokio::test]
async fn budgets_of_other_users_are_invisible() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "alice@example.com").await;
    let mallory = register_and_login(&app, "mallory", "mallory@example.com").await;
    let account_id = create_account(&app, &alice, "cash", 100).await;
    let category_id = create_category(&app, &alice, "Groceries").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/budgets",
            Some(&alice),
            Some(json!({
                "categoryId": category_id,
                "amount": 500,
                "accountId": account_id,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let budget_id = body["budget"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/budgets/{budget_id}"),
            Some(&mallory),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no such budget");

    // Scoping a budget to someone else's account is a 404 too.
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/budgets",
            Some(&mallory),
            Some(json!({
                "categoryId": category_id,
                "amount": 500,
                "accountId": account_id,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no such account");
}
