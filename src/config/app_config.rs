// ==========================================
// 作業日報システム - 应用配置
// ==========================================
// 内容: 存储后端与表名、工厂及口令哈希、管理员口令哈希、缓存、语言
// 红线: 配置中只保存口令哈希 (argon2 PHC 字符串),不保存明文
// ==========================================

use serde::{Deserialize, Serialize};

use crate::repository::cache::DEFAULT_CACHE_TTL_SECS;
use crate::repository::sheet::TableNames;

/// 默认工厂
pub const DEFAULT_FACTORIES: [&str; 2] = ["本社工場", "八尾工場"];

// ==========================================
// StoreBackend - 存储后端
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite, // 单个 SQLite 文件
    Csv,    // 目录下每表一个 CSV
}

// ==========================================
// StoreConfig - 存储配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// SQLite 文件路径或 CSV 目录; 为空时使用默认数据目录
    pub location: String,
    pub tables: TableNames,
}

// ==========================================
// FactoryConfig - 工厂与作业者口令
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    pub name: String,
    /// 未配置时该工厂作业者无法登录
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl FactoryConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password_hash: None,
        }
    }
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub factories: Vec<FactoryConfig>,
    pub admin_password_hash: Option<String>,
    pub cache_ttl_secs: u64,
    /// 同一工厂/分类下完全相同的选项是否拒绝追加
    pub reject_duplicate_options: bool,
    pub locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            factories: DEFAULT_FACTORIES.iter().map(|f| FactoryConfig::new(*f)).collect(),
            admin_password_hash: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            reject_duplicate_options: true,
            locale: "ja".to_string(),
        }
    }
}

impl AppConfig {
    /// 已配置的工厂名 (配置顺序)
    pub fn factory_names(&self) -> Vec<String> {
        self.factories.iter().map(|f| f.name.clone()).collect()
    }

    pub fn is_configured_factory(&self, factory: &str) -> bool {
        self.factories.iter().any(|f| f.name == factory)
    }
}
