//! Seating Server - 餐厅桌台分配服务
//!
//! # 架构概述
//!
//! - **分配引擎** (`allocation`): 最小适配选桌、时段冲突检测、候位估时
//! - **数据库** (`db`): SQLite (sqlx) 存储与迁移
//! - **业务服务** (`services`): 桌台、预订、候位与概览流程
//! - **HTTP API** (`api`): RESTful JSON 接口
//!
//! # 模块结构
//!
//! ```text
//! seating-server/src/
//! ├── allocation/    # 分配引擎、存储抽象、内存存储
//! ├── api/           # HTTP 路由和处理器
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 连接池、仓储、SqliteStore
//! ├── services/      # SeatingService
//! └── utils/         # 错误转换、日志、校验、时间
//! ```

pub mod allocation;
pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use allocation::{AllocationEngine, MemoryStore, SeatingStore};
pub use core::{Config, Server, ServerState};
pub use db::{DbService, SqliteStore};
pub use services::SeatingService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 加载 `.env` 并初始化日志，返回读取到的配置
pub fn setup_environment() -> Config {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
   _____            __  _
  / ___/___  ____ _/ /_(_)___  ____ _
  \__ \/ _ \/ __ `/ __/ / __ \/ __ `/
 ___/ /  __/ /_/ / /_/ / / / / /_/ /
/____/\___/\__,_/\__/_/_/ /_/\__, /
                            /____/
    "#
    );
}
