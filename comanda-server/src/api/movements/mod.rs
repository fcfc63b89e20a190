//! Cash Movement API 模块 (现金流水)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/movements | POST | 记录收入/支出 |
//! | /api/movements/{id} | DELETE | 删除流水 |
//! | /api/movements/restaurant/{tenant}?fecha=YYYY-MM-DD | GET | 日报 |
//! | /api/movements/restaurant/{tenant}/summary | GET | 累计现金汇总 |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/movements", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
        .route("/restaurant/{tenant}", get(handler::daily_report))
        .route("/restaurant/{tenant}/summary", get(handler::summary))
}
