// ==========================================
// 作業日報システム - API层错误类型
// ==========================================
// 职责: 汇总下层错误,提供面向作业者的本地化消息
// ==========================================

use thiserror::Error;

use crate::auth::AuthError;
use crate::engine::work_session::WorkSessionError;
use crate::i18n::{t, t_with_args};
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 存储错误
    // ==========================================
    #[error("数据存储不可用: {0}")]
    StoreUnavailable(String),

    #[error("表结构不一致: {0}")]
    SchemaMismatch(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("输入校验失败: {0}")]
    ValidationFailure(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 认证与权限
    // ==========================================
    #[error("认证失败: {0}")]
    AuthenticationFailed(String),

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 画面显示用的本地化消息
    pub fn user_message(&self) -> String {
        match self {
            ApiError::StoreUnavailable(_) => t("error.store_unavailable"),
            ApiError::SchemaMismatch(_) => t("error.schema_mismatch"),
            ApiError::ValidationFailure(detail) => {
                t_with_args("error.validation_failure", &[("detail", detail.as_str())])
            }
            ApiError::NotFound(detail) => t_with_args("error.not_found", &[("detail", detail.as_str())]),
            ApiError::InvalidStateTransition { from, to } => t_with_args(
                "error.invalid_state_transition",
                &[("from", from.as_str()), ("to", to.as_str())],
            ),
            ApiError::AuthenticationFailed(_) => t("error.authentication_failed"),
            ApiError::PermissionDenied(_) => t("error.permission_denied"),
            ApiError::ImportError(detail) => t_with_args("error.import_failed", &[("detail", detail.as_str())]),
            ApiError::InternalError(_) | ApiError::Other(_) => t("error.internal"),
        }
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, ApiError::StoreUnavailable(_))
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::StoreUnavailable(msg) => ApiError::StoreUnavailable(msg),
            RepositoryError::LockError(msg) => {
                ApiError::StoreUnavailable(format!("存储锁获取失败: {}", msg))
            }
            err @ RepositoryError::SchemaMismatch { .. } => ApiError::SchemaMismatch(err.to_string()),
            err @ RepositoryError::RowDecodeError { .. } => ApiError::InternalError(err.to_string()),
            RepositoryError::DatabaseQueryError(msg) => ApiError::InternalError(msg),
            RepositoryError::ValidationError(msg) => ApiError::ValidationFailure(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashError(msg) => ApiError::InternalError(msg),
            other => ApiError::AuthenticationFailed(other.to_string()),
        }
    }
}

impl From<WorkSessionError> for ApiError {
    fn from(err: WorkSessionError) -> Self {
        match err {
            // 状态名在转换时即按当前语言翻译
            WorkSessionError::InvalidStateTransition { from, to } => ApiError::InvalidStateTransition {
                from: t(from.message_key()),
                to: t(to.message_key()),
            },
            WorkSessionError::MissingInterruptReason => ApiError::ValidationFailure(err.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::WorkStatus;

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::StoreUnavailable("disk".to_string()).into();
        assert!(api_err.is_store_unavailable());

        let api_err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(api_err.is_store_unavailable());

        let api_err: ApiError = RepositoryError::SchemaMismatch {
            table: "Reports".to_string(),
            expected_version: 2,
            expected_header: "timestamp,...".to_string(),
            actual: "v1".to_string(),
        }
        .into();
        match api_err {
            ApiError::SchemaMismatch(msg) => assert!(msg.contains("Reports")),
            other => panic!("Expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_auth_error_conversion() {
        let api_err: ApiError = AuthError::InvalidCredentials.into();
        assert!(matches!(api_err, ApiError::AuthenticationFailed(_)));

        let api_err: ApiError = AuthError::HashError("bad phc".to_string()).into();
        assert!(matches!(api_err, ApiError::InternalError(_)));
    }

    #[test]
    fn test_work_session_error_conversion() {
        let _guard = crate::i18n::tests::LOCALE_TEST_LOCK.lock().unwrap();
        crate::i18n::set_locale("ja");
        let api_err: ApiError = WorkSessionError::InvalidStateTransition {
            from: WorkStatus::BeforeStart,
            to: WorkStatus::Paused,
        }
        .into();
        match api_err {
            ApiError::InvalidStateTransition { from, to } => {
                assert_eq!(from, "開始前");
                assert_eq!(to, "中断中");
            }
            other => panic!("Expected InvalidStateTransition, got {:?}", other),
        }
    }
}
