//! Account API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/accounts | POST | 开台 (open account) |
//! | /api/accounts/restaurant/{tenant}/open | GET | 未结账单列表 |
//! | /api/accounts/{id} | GET | 账单详情 |
//! | /api/accounts/{id}/items | POST | 加菜 |
//! | /api/accounts/{id}/send-to-kitchen | POST | 送厨 |
//! | /api/accounts/{id}/items/{item_id} | DELETE | 删除未送厨菜品 |
//! | /api/accounts/{id}/finalize | PUT | 打印小票前锁单 |
//! | /api/accounts/{id}/reopen | PUT | 重新开单 |
//! | /api/accounts/{id}/close | PUT | 结账 |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/accounts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::open))
        .route("/restaurant/{tenant}/open", get(handler::list_open))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/items", post(handler::add_items))
        .route("/{id}/send-to-kitchen", post(handler::send_to_kitchen))
        .route("/{id}/items/{item_id}", delete(handler::remove_item))
        .route("/{id}/finalize", put(handler::finalize))
        .route("/{id}/reopen", put(handler::reopen))
        .route("/{id}/close", put(handler::close))
}
