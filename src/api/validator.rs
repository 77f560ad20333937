// ==========================================
// 作業日報システム - 输入与权限校验
// ==========================================
// 所有拒绝都返回带字段名的 ValidationFailure / PermissionDenied
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::domain::report::{Report, MAX_REPORT_COUNT};
use crate::domain::session::SessionContext;

/// 必填文本 (去除首尾空白后非空)
pub fn require_non_empty(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationFailure(format!("{}は必須です", field)));
    }
    Ok(())
}

/// 正整数
pub fn require_positive(field: &str, value: i64) -> ApiResult<()> {
    if value <= 0 {
        return Err(ApiError::ValidationFailure(format!(
            "{}は1以上が必要です: {}",
            field, value
        )));
    }
    Ok(())
}

/// 非负整数
pub fn require_non_negative(field: &str, value: i64) -> ApiResult<()> {
    if value < 0 {
        return Err(ApiError::ValidationFailure(format!(
            "{}は0以上が必要です: {}",
            field, value
        )));
    }
    Ok(())
}

/// 日报计数 (0 以上,上限以内)
pub fn require_count(field: &str, value: i64) -> ApiResult<()> {
    require_non_negative(field, value)?;
    if value > MAX_REPORT_COUNT {
        return Err(ApiError::ValidationFailure(format!(
            "{}は{}以下が必要です: {}",
            field, MAX_REPORT_COUNT, value
        )));
    }
    Ok(())
}

/// 工厂必须在配置中登记
pub fn require_configured_factory(config: &AppConfig, factory: &str) -> ApiResult<()> {
    if !config.is_configured_factory(factory) {
        return Err(ApiError::ValidationFailure(format!(
            "未登録の工場です: {}",
            factory
        )));
    }
    Ok(())
}

/// 管理员权限
pub fn require_admin(session: &SessionContext) -> ApiResult<()> {
    if !session.is_admin() {
        return Err(ApiError::PermissionDenied(format!(
            "管理者権限が必要です (role={})",
            session.role
        )));
    }
    Ok(())
}

/// 日报的必填项与计数
pub fn validate_report(report: &Report) -> ApiResult<()> {
    require_non_empty("作業者", &report.worker)?;
    require_non_empty("ライン種別", &report.line)?;
    require_non_empty("型番", &report.model)?;
    require_non_empty("製品種別", &report.product)?;
    require_non_empty("機械種別", &report.machine)?;

    require_count("研削 研磨数", report.ground_ok)?;
    require_count("研削 不良数", report.ground_ng)?;
    require_count("ラバ研 研磨数", report.rubber_ok)?;
    require_count("ラバ研 不良数", report.rubber_ng)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ReportDraft;
    use chrono::NaiveDate;

    fn draft() -> ReportDraft {
        ReportDraft {
            worker: "廣瀬".to_string(),
            line: "外径ライン".to_string(),
            model: "UA25".to_string(),
            product: "SHI".to_string(),
            machine: "T11J".to_string(),
            ground_ok: 120,
            ..ReportDraft::default()
        }
    }

    fn at() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_valid_report_passes() {
        let report = draft().into_report("本社工場", at());
        assert!(validate_report(&report).is_ok());
    }

    #[test]
    fn test_blank_required_field_rejected() {
        let mut d = draft();
        d.machine = "   ".to_string();
        let result = validate_report(&d.into_report("本社工場", at()));
        match result {
            Err(ApiError::ValidationFailure(msg)) => assert!(msg.contains("機械種別")),
            other => panic!("Expected ValidationFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let mut d = draft();
        d.rubber_ng = -1;
        assert!(validate_report(&d.into_report("本社工場", at())).is_err());
    }

    #[test]
    fn test_count_upper_bound() {
        let mut d = draft();
        d.ground_ok = MAX_REPORT_COUNT;
        assert!(validate_report(&d.clone().into_report("本社工場", at())).is_ok());

        d.ground_ok = MAX_REPORT_COUNT + 1;
        match validate_report(&d.into_report("本社工場", at())) {
            Err(ApiError::ValidationFailure(msg)) => assert!(msg.contains("研削 研磨数")),
            other => panic!("Expected ValidationFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_require_admin() {
        let worker = SessionContext::worker("s".to_string(), "八尾工場", at());
        let admin = SessionContext::admin("a".to_string(), at());
        assert!(matches!(require_admin(&worker), Err(ApiError::PermissionDenied(_))));
        assert!(require_admin(&admin).is_ok());
    }

    #[test]
    fn test_configured_factory() {
        let config = AppConfig::default();
        assert!(require_configured_factory(&config, "本社工場").is_ok());
        assert!(require_configured_factory(&config, "京都工場").is_err());
    }
}
