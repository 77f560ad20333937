// ==========================================
// 作業日報システム - 配置管理器
// ==========================================
// 职责: 配置加载 (JSON 文件)、环境变量覆写、校验、保存
// ==========================================

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::app_config::{AppConfig, StoreBackend};

/// 配置相关环境变量
pub mod env_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "SHOPFLOOR_CONFIG_PATH";
    /// 覆写存储位置
    pub const DB_PATH: &str = "SHOPFLOOR_DB_PATH";
    /// 覆写存储后端 (sqlite / csv)
    pub const STORE_BACKEND: &str = "SHOPFLOOR_STORE_BACKEND";
    /// 覆写界面语言
    pub const LOCALE: &str = "SHOPFLOOR_LOCALE";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置无效: {0}")]
    Invalid(String),

    #[error("配置文件写入失败 ({path}): {message}")]
    WriteError { path: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 默认配置文件路径: <config_dir>/shopfloor-report/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("shopfloor-report").join("config.json"))
    }

    /// 加载配置
    ///
    /// 顺序: SHOPFLOOR_CONFIG_PATH → 默认路径 → 内置默认值; 之后应用环境变量覆写
    pub fn load() -> ConfigResult<AppConfig> {
        let explicit = std::env::var(env_keys::CONFIG_PATH)
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let mut config = match explicit {
            Some(path) => Self::load_from_path(&path)?,
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::load_from_path(&path)?,
                None => {
                    tracing::info!("未找到配置文件,使用内置默认配置");
                    AppConfig::default()
                }
            },
        };

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// 从指定 JSON 文件加载 (不应用环境变量)
    pub fn load_from_path(path: &Path) -> ConfigResult<AppConfig> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: AppConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), "已加载配置文件");
        Ok(config)
    }

    /// 保存为 JSON 文件 (必要时创建目录)
    pub fn save_to_path(config: &AppConfig, path: &Path) -> ConfigResult<()> {
        let write_err = |message: String| ConfigError::WriteError {
            path: path.display().to_string(),
            message,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(config).map_err(|e| write_err(e.to_string()))?;
        fs::write(path, json).map_err(|e| write_err(e.to_string()))?;
        Ok(())
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(config: &mut AppConfig) {
        if let Ok(location) = std::env::var(env_keys::DB_PATH) {
            let trimmed = location.trim();
            if !trimmed.is_empty() {
                config.store.location = trimmed.to_string();
            }
        }

        if let Ok(backend) = std::env::var(env_keys::STORE_BACKEND) {
            match backend.trim().to_lowercase().as_str() {
                "sqlite" => config.store.backend = StoreBackend::Sqlite,
                "csv" => config.store.backend = StoreBackend::Csv,
                other => tracing::warn!("忽略未知的存储后端: {}", other),
            }
        }

        if let Ok(locale) = std::env::var(env_keys::LOCALE) {
            let trimmed = locale.trim();
            if !trimmed.is_empty() {
                config.locale = trimmed.to_string();
            }
        }
    }

    /// 校验配置
    pub fn validate(config: &AppConfig) -> ConfigResult<()> {
        if config.factories.is_empty() {
            return Err(ConfigError::Invalid("至少需要配置一个工厂".to_string()));
        }

        let mut seen = HashSet::new();
        for factory in &config.factories {
            let name = factory.name.trim();
            if name.is_empty() {
                return Err(ConfigError::Invalid("工厂名不能为空".to_string()));
            }
            if !seen.insert(name) {
                return Err(ConfigError::Invalid(format!("工厂名重复: {}", name)));
            }
        }

        let tables = &config.store.tables;
        let names = [
            &tables.reports,
            &tables.settings,
            &tables.plans,
            &tables.plan_settings,
            &tables.schedule,
            &tables.counting_rules,
        ];
        let mut table_seen = HashSet::new();
        for name in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("表名不能为空".to_string()));
            }
            if !table_seen.insert(name.as_str()) {
                return Err(ConfigError::Invalid(format!("表名重复: {}", name)));
            }
        }

        if config.factories.iter().all(|f| f.password_hash.is_none())
            && config.admin_password_hash.is_none()
        {
            tracing::warn!("未配置任何口令哈希,所有登录都会被拒绝");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::app_config::FactoryConfig;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(ConfigManager::validate(&config).is_ok());
        assert_eq!(config.factory_names(), vec!["本社工場", "八尾工場"]);
        assert!(config.reject_duplicate_options);
    }

    #[test]
    fn test_duplicate_factory_rejected() {
        let mut config = AppConfig::default();
        config.factories.push(FactoryConfig::new("本社工場"));
        assert!(matches!(ConfigManager::validate(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_duplicate_table_name_rejected() {
        let mut config = AppConfig::default();
        config.store.tables.plans = "Reports".to_string();
        assert!(ConfigManager::validate(&config).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.cache_ttl_secs = 5;
        config.store.backend = StoreBackend::Csv;
        ConfigManager::save_to_path(&config, &path).unwrap();

        let loaded = ConfigManager::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"cache_ttl_secs": 0, "store": {"backend": "csv"}}"#).unwrap();

        let loaded = ConfigManager::load_from_path(&path).unwrap();
        assert_eq!(loaded.cache_ttl_secs, 0);
        assert_eq!(loaded.store.backend, StoreBackend::Csv);
        assert_eq!(loaded.store.tables.reports, "Reports");
        assert_eq!(loaded.factories.len(), 2);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            ConfigManager::load_from_path(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
