use std::time::Instant;

use sqlx::SqlitePool;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::SeatingService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (连接池与服务内部均为 Arc)。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | seating | SeatingService | 桌台分配与业务流程 |
/// | started_at | Instant | 启动时间 (健康检查 uptime) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 座位服务 (持有分配引擎)
    pub seating: SeatingService,
    /// 启动时间
    pub started_at: Instant,
}

impl ServerState {
    /// 由已打开的数据库构造状态
    pub fn new(config: Config, db: DbService) -> Self {
        let seating = SeatingService::new(db.pool.clone());
        Self {
            config,
            pool: db.pool,
            seating,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (打开文件、WAL、迁移)
    /// 2. 座位服务
    /// 3. 空库时写入默认桌台
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let state = Self::new(config.clone(), db);

        if config.seed_default_tables {
            state.seating.seed_default_tables().await?;
        }

        Ok(state)
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
