//! Skillet POS Server - 餐厅收银后端
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── billing/       # 计费引擎 (购物车 → 账单)
//! ├── sales.rs       # 销售汇总 (纯读端计算)
//! ├── db/            # 仓储接口 + 内存/嵌入式数据库实现
//! └── utils/         # 错误、日志、时间、校验
//! ```
//!
//! The catalog/billing/aggregation logic is written once against the
//! repository traits in [`db`]; the backing store (in-memory or embedded
//! SurrealDB) is chosen at startup from [`core::Config`].

pub mod api;
pub mod billing;
pub mod core;
pub mod db;
pub mod sales;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState, StoreBackend};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{AppError, AppResult};

pub fn print_banner() {
    println!(
        r#"
   _____ __   _ ____     __
  / ___// /__(_) / /__  / /_
  \__ \/ //_/ / / / _ \/ __/
 ___/ / ,< / / / /  __/ /_
/____/_/|_/_/_/_/\___/\__/
        P O S
    "#
    );
}
