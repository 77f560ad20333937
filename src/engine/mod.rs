// ==========================================
// 作業日報システム - 引擎层
// ==========================================
// 职责: 进度汇总、规则型排程进度、作业过程状态机
// 红线: 引擎无状态/不访问存储,数据由调用方读取后传入
// ==========================================

pub mod progress;
pub mod rule_progress;
pub mod work_session;

pub use progress::{evaluate_against_target, ProgressAggregator};
pub use rule_progress::RuleProgressEngine;
pub use work_session::{WorkSession, WorkSessionError, WorkSessionResult};
