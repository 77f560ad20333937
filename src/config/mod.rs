// ==========================================
// 作業日報システム - 配置层
// ==========================================
// 职责: 应用配置 (存储/工厂/口令哈希/缓存/语言) 的加载与校验
// 存储: JSON 文件 + 环境变量覆写
// ==========================================

pub mod app_config;
pub mod config_manager;

// 重导出
pub use app_config::{AppConfig, FactoryConfig, StoreBackend, StoreConfig, DEFAULT_FACTORIES};
pub use config_manager::{env_keys, ConfigError, ConfigManager, ConfigResult};
