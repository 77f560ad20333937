// ==========================================
// 作業日報システム - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 通过 TableStore (读取全部行 / 追加一行) 访问工作表式后端
// 约束: 行按字段名编解码,表结构带版本
// ==========================================

pub mod cache;
pub mod csv_store;
pub mod error;
pub mod master_repo;
pub mod plan_repo;
pub mod report_repo;
pub mod sheet;
pub mod sqlite_store;
pub mod table_store;

// 重导出核心仓储
pub use cache::CachedTableStore;
pub use csv_store::CsvTableStore;
pub use error::{RepositoryError, RepositoryResult};
pub use master_repo::MasterDataRepository;
pub use plan_repo::{
    CountingRuleRepository, PlanMappingRepository, PlanRepository, ScheduleRepository,
};
pub use report_repo::ReportRepository;
pub use sheet::{SheetRecord, SheetRow, TableKind, TableNames, TableSchema};
pub use sqlite_store::SqliteTableStore;
pub use table_store::TableStore;
