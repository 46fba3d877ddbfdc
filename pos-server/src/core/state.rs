use std::sync::Arc;

use crate::core::{Config, StoreBackend};
use crate::db::memory::MemoryStore;
use crate::db::surreal::{self, SurrealBillRepository, SurrealMenuRepository, SurrealSettingsRepository};
use crate::db::{BillRepository, MenuRepository, SettingsRepository};
use crate::utils::AppError;

/// 服务器状态 - 持有配置和仓储实例
///
/// 目录/账单/设置逻辑只写一份，通过 trait 对象访问存储；
/// 后端在启动时根据 [`Config::store_backend`] 选择。
/// Arc 浅拷贝，clone 成本极低。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 菜单目录仓储
    pub menu: Arc<dyn MenuRepository>,
    /// 账单仓储
    pub bills: Arc<dyn BillRepository>,
    /// 设置仓储
    pub settings: Arc<dyn SettingsRepository>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// `memory` 后端无副作用；`disk` 后端确保工作目录存在并打开
    /// work_dir/database/pos.db (嵌入式 SurrealDB, RocksDB 引擎)。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        match config.store_backend {
            StoreBackend::Memory => {
                tracing::info!("Store backend: in-memory");
                Ok(Self::with_memory_store(config.clone()))
            }
            StoreBackend::Disk => {
                let db_dir = config.database_dir();
                std::fs::create_dir_all(&db_dir).map_err(|e| {
                    AppError::internal(format!("Failed to create database dir: {}", e))
                })?;
                let db_path = db_dir.join("pos.db");
                let db = surreal::connect(&db_path).await?;
                tracing::info!(path = %db_path.display(), "Store backend: embedded SurrealDB");
                Ok(Self {
                    config: config.clone(),
                    menu: Arc::new(SurrealMenuRepository::new(db.clone())),
                    bills: Arc::new(SurrealBillRepository::new(db.clone())),
                    settings: Arc::new(SurrealSettingsRepository::new(db)),
                })
            }
        }
    }

    /// 构造内存后端状态 (测试和 memory 模式共用)
    pub fn with_memory_store(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            config,
            menu: store.clone(),
            bills: store.clone(),
            settings: store,
        }
    }
}
