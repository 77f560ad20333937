// ==========================================
// 作業日報システム - 导入层
// ==========================================
// 职责: 生产计划上传 (CSV / Excel)
// ==========================================

pub mod error;
pub mod file_parser;
pub mod plan_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use plan_importer::{PlanCandidate, PlanImportBatch, PlanImporter, RowRejection};
