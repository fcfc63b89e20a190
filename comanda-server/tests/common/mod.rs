//! Shared helpers for HTTP-level tests
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use comanda_server::db::repository::{dining_table, product};
use comanda_server::{Config, ServerState, build_app};
use shared::models::{DiningTableCreate, Product, ProductCreate, ProductExtra};

pub const TENANT: &str = "r1";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        comanda_server::db::run_migrations(&pool).await.unwrap();

        let mut config = Config::default();
        config.timezone = chrono_tz::Tz::UTC;
        let state = ServerState::from_pool(config, pool.clone());
        Self {
            router: build_app().with_state(state),
            pool,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, json) = self.send_raw(method, uri, body.map(|b| b.to_string())).await;
        (status, json)
    }

    /// Send a raw body; returns status, the `x-request-id` header and the JSON body
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(raw) => {
                builder = builder.header("content-type", "application/json");
                Body::from(raw)
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, request_id, json)
    }

    pub async fn seed_table(&self, number: i32) {
        dining_table::create(
            &self.pool,
            DiningTableCreate {
                tenant: TENANT.into(),
                table_number: number,
                label: None,
            },
        )
        .await
        .unwrap();
    }

    /// Taco at 50 with a 10 cheese extra, 20 in stock
    pub async fn seed_taco(&self) -> Product {
        product::create(
            &self.pool,
            ProductCreate {
                tenant: TENANT.into(),
                name: "Taco".into(),
                image: Some("taco.png".into()),
                description: None,
                category: Some("Tacos".into()),
                stock: 20,
                cost: 20.0,
                sale_price: 50.0,
                extras: vec![ProductExtra {
                    id: "queso".into(),
                    name: "Queso".into(),
                    cost: 10.0,
                    active: true,
                }],
            },
        )
        .await
        .unwrap()
    }
}
