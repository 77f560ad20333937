// ==========================================
// 作業日報システム - 核心库
// ==========================================
// 职责: 作业日报登记、下拉主数据维护、生产计划与进度汇总
// 技术栈: Rust + SQLite / CSV
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ja");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 表存储与记录编解码
pub mod repository;

// 引擎层 - 进度汇总与作业状态机
pub mod engine;

// 导入层 - 计划文件上传
pub mod importer;

// 配置层
pub mod config;

// 认证
pub mod auth;

// 数据库基础设施（连接初始化/表结构登记）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    CountColumn, FieldFilter, MasterCategory, ProgressStatus, Role, SetupKind, WorkStatus,
};

// 领域实体
pub use domain::{
    MasterOption, Plan, PlanMapping, PlanProgress, Report, ReportDraft, ScheduleProgress,
    SessionContext, SessionState,
};

// 引擎
pub use engine::{ProgressAggregator, RuleProgressEngine, WorkSession};

// API
pub use api::{ApiError, ApiResult, DashboardApi, MasterDataApi, PlanApi, ReportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "作業日報システム";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
