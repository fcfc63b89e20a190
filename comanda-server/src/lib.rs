//! Comanda Server - 餐厅账单 (tab) 与现金账后端
//!
//! # 模块结构
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── db/            # SQLite 连接池、迁移、repository
//! ├── accounts/      # 账单生命周期 (开台 → 送厨 → 锁单 → 结账)
//! ├── ledger/        # 现金流水、日报、累计汇总
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! ├── routes/        # 路由装配与 tower 中间件
//! └── utils/         # 日志、时间、输入校验
//! ```

pub mod accounts;
pub mod api;
pub mod core;
pub mod db;
pub mod ledger;
pub mod middleware;
pub mod money;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use accounts::{AccountEngine, AccountError};
pub use core::{Config, Server, ServerState};
pub use ledger::{LedgerError, LedgerService};
pub use routes::{build_app, build_router};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 加载 .env, 初始化日志
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_dir.as_deref(),
        config.is_production(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
   ______                                 __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
