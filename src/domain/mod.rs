// ==========================================
// 作業日報システム - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod master;
pub mod plan;
pub mod report;
pub mod session;
pub mod types;
pub mod work;

// 重导出核心类型
pub use master::{AddOptionOutcome, MasterOption};
pub use plan::{
    CountingRule, MappingContribution, MappingFilters, Plan, PlanMapping, PlanProgress,
    ScheduleEntry, ScheduleProgress,
};
pub use report::{ProductionTotals, Report, ReportDraft};
pub use session::{SessionContext, SessionState};
pub use types::{
    CountColumn, FieldFilter, MasterCategory, ProgressStatus, Role, SetupKind, WorkStatus,
};
pub use work::{WorkEvent, WorkEventKind, WorkSummary};
