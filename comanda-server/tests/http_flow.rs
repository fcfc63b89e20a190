mod common;

use common::{TENANT, TestApp};
use axum::body::Body;
use http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use comanda_server::db::repository::{dining_table, movement, product};
use comanda_server::{Config, ServerState};

async fn open_account(app: &TestApp, table: i32) -> Value {
    let (status, body) = app
        .send(
            Method::POST,
            "/api/accounts",
            Some(json!({ "tableNumber": table, "server": "Ana", "tenant": TENANT })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

fn item_ids(account: &Value) -> Vec<String> {
    account["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_tab_from_open_to_close() {
    let app = TestApp::new().await;
    app.seed_table(5).await;
    let taco = app.seed_taco().await;

    let account = open_account(&app, 5).await;
    assert_eq!(account["ticketNumber"], 1);
    assert_eq!(account["state"], "open");
    assert_eq!(account["paymentMethod"], "");
    let id = account["id"].as_i64().unwrap();

    let item = json!({ "productId": taco.id, "quantity": 2, "extraIds": ["queso"] });
    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/accounts/{id}/items"),
            Some(json!({ "items": [item.clone(), item] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let account = &body["data"];
    assert_eq!(account["subtotal"], 0.0);
    for line in account["items"].as_array().unwrap() {
        assert_eq!(line["lineTotal"], 120.0);
        assert_eq!(line["committed"], false);
        assert_eq!(line["extras"][0]["extraName"], "Queso");
    }

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/accounts/{id}/send-to-kitchen"),
            Some(json!({ "itemIds": item_ids(account) })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["account"]["subtotal"], 240.0);
    for result in body["data"]["results"].as_array().unwrap() {
        assert_eq!(result["status"], "committed");
        assert_eq!(result["stockUpdated"], true);
    }
    let stock = product::find_by_id(&app.pool, TENANT, taco.id)
        .await
        .unwrap()
        .unwrap()
        .stock;
    assert_eq!(stock, 16);

    let (status, body) = app
        .send(Method::PUT, &format!("/api/accounts/{id}/finalize"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "finalized");

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/accounts/{id}/close"),
            Some(json!({ "paymentMethod": "cash", "totalPagado": 240 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["state"], "closed");
    assert_eq!(body["data"]["paymentMethod"], "cash");
    assert_eq!(body["data"]["amountPaid"], 240.0);

    let table = dining_table::find_by_number(&app.pool, TENANT, 5)
        .await
        .unwrap()
        .unwrap();
    assert!(!table.is_active);
    assert!(movement::list_by_tenant(&app.pool, TENANT).await.unwrap().is_empty());

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/movements/restaurant/{TENANT}/summary"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ventasDelDia"], 240.0);
    assert_eq!(body["data"]["balance"], 240.0);
    assert_eq!(body["data"]["countIngresos"], 1);

    let (_, body) = app
        .send(Method::GET, &format!("/api/accounts/restaurant/{TENANT}/open"), None)
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_second_open_on_table_is_a_400_conflict() {
    let app = TestApp::new().await;
    let first = open_account(&app, 5).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/accounts",
            Some(json!({ "tableNumber": 5, "server": "Luis", "tenant": TENANT })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 7002);
    assert!(body["error"].as_str().unwrap().contains("Table 5"));

    let (_, body) = app
        .send(Method::GET, &format!("/api/accounts/{}", first["id"]), None)
        .await;
    assert_eq!(body["data"], first);
}

#[tokio::test]
async fn test_error_statuses() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/accounts/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, body) = app.send(Method::GET, "/api/accounts/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, _, body) = app
        .send_raw(Method::POST, "/api/accounts", Some("{not json".into()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/accounts",
            Some(json!({ "tableNumber": 1, "server": "", "tenant": TENANT })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "server");

    // Closing straight from open is an invalid state
    let account = open_account(&app, 2).await;
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/accounts/{}/close", account["id"]),
            Some(json!({ "paymentMethod": "card", "amountPaid": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/accounts/{}/items", account["id"]),
            Some(json!({ "items": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4006);

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/accounts/{}/items", account["id"]),
            Some(json!({ "items": [{ "productId": 12345 }] })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn test_committed_item_cannot_be_removed() {
    let app = TestApp::new().await;
    let taco = app.seed_taco().await;
    let account = open_account(&app, 3).await;
    let id = account["id"].as_i64().unwrap();

    let (_, body) = app
        .send(
            Method::POST,
            &format!("/api/accounts/{id}/items"),
            Some(json!({ "items": [{ "productId": taco.id }, { "productId": taco.id, "comments": "bien dorado" }] })),
        )
        .await;
    let ids = item_ids(&body["data"]);

    app.send(
        Method::POST,
        &format!("/api/accounts/{id}/send-to-kitchen"),
        Some(json!({ "itemIds": [ids[0]] })),
    )
    .await;

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/accounts/{id}/items/{}", ids[0]), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4005);

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/accounts/{id}/items/{}", ids[1]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["subtotal"], 50.0);
}

#[tokio::test]
async fn test_reopen_round_trip() {
    let app = TestApp::new().await;
    let account = open_account(&app, 4).await;
    let id = account["id"].as_i64().unwrap();

    let (status, _) = app
        .send(Method::PUT, &format!("/api/accounts/{id}/reopen"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.send(Method::PUT, &format!("/api/accounts/{id}/finalize"), None)
        .await;
    let (status, body) = app
        .send(Method::PUT, &format!("/api/accounts/{id}/reopen"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "open");
}

#[tokio::test]
async fn test_movements_and_daily_report() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/movements",
            Some(json!({
                "tenant": TENANT,
                "kind": "expense",
                "description": "Gas",
                "amount": 80.5,
                "occurredAt": 1_718_452_800_000_i64
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["paymentMethod"], "cash");
    let expense_id = body["data"]["id"].as_i64().unwrap();

    app.send(
        Method::POST,
        "/api/movements",
        Some(json!({
            "tenant": TENANT,
            "kind": "ingreso",
            "description": "Propinas",
            "amount": 100,
            "paymentMethod": "card",
            "occurredAt": 1_718_456_400_000_i64
        })),
    )
    .await;

    // 2024-06-15 (UTC)
    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/movements/restaurant/{TENANT}?fecha=2024-06-15"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let report = &body["data"];
    assert_eq!(report["date"], "2024-06-15");
    assert_eq!(report["entries"].as_array().unwrap().len(), 2);
    assert_eq!(report["entries"][0]["description"], "Propinas");
    assert_eq!(report["totals"]["balance"], 19.5);

    let (_, body) = app
        .send(
            Method::GET,
            &format!("/api/movements/restaurant/{TENANT}?date=2024-06-16"),
            None,
        )
        .await;
    assert!(body["data"]["entries"].as_array().unwrap().is_empty());

    let (status, _) = app
        .send(Method::GET, &format!("/api/movements/restaurant/{TENANT}"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/movements",
            Some(json!({ "tenant": TENANT, "kind": "refund", "description": "x", "amount": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5102);

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/movements/{expense_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Movement deleted");
    let (status, _) = app
        .send(Method::DELETE, &format!("/api/movements/{expense_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app
        .send(
            Method::GET,
            &format!("/api/movements/restaurant/{TENANT}/summary"),
            None,
        )
        .await;
    assert_eq!(body["data"]["ingresos"], 100.0);
    assert_eq!(body["data"]["egresos"], 0.0);
    assert_eq!(body["data"]["countEgresos"], 0);
}

#[tokio::test]
async fn test_health_and_request_id() {
    let app = TestApp::new().await;
    let (status, request_id, body) = app.send_raw(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert!(request_id.is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "caja-01")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("caja-01")
    );
}

#[tokio::test]
async fn test_state_initializes_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await.unwrap();

    assert!(config.database_dir().join("comanda.db").exists());
    let summary = state.ledger.cash_summary(TENANT).await.unwrap();
    assert_eq!(summary.balance, 0.0);
}
