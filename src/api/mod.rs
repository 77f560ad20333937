// ==========================================
// 作業日報システム - API 层
// ==========================================
// 职责: 画面操作对应的业务入口; 会话上下文显式传入
// ==========================================

pub mod auth_api;
pub mod dashboard_api;
pub mod error;
pub mod master_api;
pub mod plan_api;
pub mod report_api;
pub mod validator;

// 重导出核心类型
pub use auth_api::AuthApi;
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult};
pub use master_api::MasterDataApi;
pub use plan_api::{PlanApi, PlanImportResult};
pub use report_api::ReportApi;
