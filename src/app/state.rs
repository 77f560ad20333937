// ==========================================
// 作業日報システム - 应用状态
// ==========================================
// 职责: 按配置装配存储、仓储、引擎与 API 实例
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{AuthApi, DashboardApi, MasterDataApi, PlanApi, ReportApi};
use crate::auth::Authenticator;
use crate::config::{env_keys, AppConfig, StoreBackend};
use crate::engine::{ProgressAggregator, RuleProgressEngine};
use crate::repository::{
    CachedTableStore, CountingRuleRepository, CsvTableStore, MasterDataRepository,
    PlanMappingRepository, PlanRepository, ReportRepository, ScheduleRepository,
    SqliteTableStore, TableStore,
};

/// 应用状态
///
/// 画面层持有一份; 会话上下文不在此处,由调用方显式传入
pub struct AppState {
    /// 存储位置 (SQLite 文件或 CSV 目录)
    pub store_location: String,

    pub config: Arc<AppConfig>,

    /// 读缓存 (写入后自动清空,也可手动清空)
    pub cache: Arc<CachedTableStore>,

    pub auth_api: Arc<AuthApi>,
    pub master_api: Arc<MasterDataApi>,
    pub report_api: Arc<ReportApi>,
    pub plan_api: Arc<PlanApi>,
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 按配置打开存储并装配
    ///
    /// # 返回
    /// - Err(String): 存储无法打开或表结构不一致
    pub fn new(config: AppConfig) -> Result<Self, String> {
        let location = resolve_store_location(&config);
        tracing::info!(backend = ?config.store.backend, location = %location, "初始化AppState");

        let store: Arc<dyn TableStore> = match config.store.backend {
            StoreBackend::Sqlite => Arc::new(
                SqliteTableStore::open(&location, config.store.tables.clone())
                    .map_err(|e| format!("无法打开SQLite存储: {}", e))?,
            ),
            StoreBackend::Csv => Arc::new(
                CsvTableStore::open(&location, config.store.tables.clone())
                    .map_err(|e| format!("无法打开CSV存储: {}", e))?,
            ),
        };

        Ok(Self::with_store(config, store, location))
    }

    /// 用给定存储装配 (测试与工具用)
    pub fn with_store(config: AppConfig, store: Arc<dyn TableStore>, store_location: String) -> Self {
        let config = Arc::new(config);

        let cache = Arc::new(CachedTableStore::new(
            store,
            Duration::from_secs(config.cache_ttl_secs),
        ));
        let shared: Arc<dyn TableStore> = cache.clone();

        // ==========================================
        // Repository
        // ==========================================
        let master_repo = Arc::new(MasterDataRepository::new(shared.clone()));
        let report_repo = Arc::new(ReportRepository::new(shared.clone()));
        let plan_repo = Arc::new(PlanRepository::new(shared.clone()));
        let mapping_repo = Arc::new(PlanMappingRepository::new(shared.clone()));
        let schedule_repo = Arc::new(ScheduleRepository::new(shared.clone()));
        let rule_repo = Arc::new(CountingRuleRepository::new(shared));

        // ==========================================
        // Engine
        // ==========================================
        let aggregator = Arc::new(ProgressAggregator::new());
        let rule_engine = Arc::new(RuleProgressEngine::new());
        let authenticator = Arc::new(Authenticator::from_config(&config));

        // ==========================================
        // API
        // ==========================================
        let auth_api = Arc::new(AuthApi::new(authenticator));
        let master_api = Arc::new(MasterDataApi::new(master_repo, config.clone()));
        let report_api = Arc::new(ReportApi::new(report_repo.clone(), config.clone()));
        let plan_api = Arc::new(PlanApi::new(
            plan_repo.clone(),
            mapping_repo.clone(),
            schedule_repo.clone(),
            rule_repo.clone(),
        ));
        let dashboard_api = Arc::new(DashboardApi::new(
            plan_repo,
            mapping_repo,
            report_repo,
            schedule_repo,
            rule_repo,
            aggregator,
            rule_engine,
        ));

        tracing::info!("AppState初始化完成");

        Self {
            store_location,
            config,
            cache,
            auth_api,
            master_api,
            report_api,
            plan_api,
            dashboard_api,
        }
    }
}

fn resolve_store_location(config: &AppConfig) -> String {
    let configured = config.store.location.trim();
    if !configured.is_empty() {
        return configured.to_string();
    }
    match config.store.backend {
        StoreBackend::Sqlite => get_default_db_path(),
        StoreBackend::Csv => get_default_data_dir().join("tables").display().to_string(),
    }
}

fn get_default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => {
            let dir = data_dir.join("shopfloor-report");
            // 失败时交给存储打开时报错
            std::fs::create_dir_all(&dir).ok();
            dir
        }
        None => PathBuf::from("."),
    }
}

/// 获取默认数据库路径
///
/// SHOPFLOOR_DB_PATH → <data_dir>/shopfloor-report/shopfloor_report.db → ./shopfloor_report.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(env_keys::DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    get_default_data_dir()
        .join("shopfloor_report.db")
        .display()
        .to_string()
}
