// ==========================================
// 作業日報システム - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 存储可用性错误 =====
    #[error("数据存储不可用: {0}")]
    StoreUnavailable(String),

    #[error("存储锁获取失败: {0}")]
    LockError(String),

    // ===== 表结构错误 =====
    #[error("表结构不一致 (table={table}): 期望 v{expected_version} {expected_header}, 实际 {actual}")]
    SchemaMismatch {
        table: String,
        expected_version: u32,
        expected_header: String,
        actual: String,
    },

    #[error("行解码失败 (table={table}, row={row}): {message}")]
    RowDecodeError {
        table: String,
        row: usize,
        message: String,
    },

    // ===== 数据库错误 =====
    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // ===== 数据质量错误 =====
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(
            self,
            RepositoryError::StoreUnavailable(_) | RepositoryError::LockError(_)
        )
    }
}

// 实现 From<rusqlite::Error>
// 连接/IO/锁类错误归为 StoreUnavailable,其余为查询错误
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match &err {
            rusqlite::Error::SqliteFailure(e, msg) => match e.code {
                ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::PermissionDenied
                | ErrorCode::ReadOnly
                | ErrorCode::SystemIoFailure
                | ErrorCode::DatabaseCorrupt => RepositoryError::StoreUnavailable(
                    msg.clone().unwrap_or_else(|| err.to_string()),
                ),
                _ => RepositoryError::DatabaseQueryError(
                    msg.clone().unwrap_or_else(|| err.to_string()),
                ),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for RepositoryError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            RepositoryError::StoreUnavailable(err.to_string())
        } else {
            RepositoryError::DatabaseQueryError(err.to_string())
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::StoreUnavailable(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
