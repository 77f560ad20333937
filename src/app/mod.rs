// ==========================================
// 作業日報システム - 应用层
// ==========================================
// 职责: 装配各层,供画面层与命令行工具使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
