// ==========================================
// 作業日報システム - 作业日报 API
// ==========================================
// 提交: 工厂取自会话,时间戳取提交时刻
// 查询: 作业者仅本工厂; 管理员可全部或按工厂
// 存储不可用: 提交直接丢弃并报错,查询降级为空
// ==========================================

use chrono::{Local, NaiveDateTime, Timelike};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_configured_factory, validate_report};
use crate::config::AppConfig;
use crate::domain::report::{ProductionTotals, Report, ReportDraft};
use crate::domain::session::SessionContext;
use crate::domain::work::WorkSummary;
use crate::engine::work_session::WorkSession;
use crate::repository::ReportRepository;

/// 提交时刻 (存储精度为秒)
fn submission_time() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub struct ReportApi {
    repo: Arc<ReportRepository>,
    config: Arc<AppConfig>,
}

impl ReportApi {
    pub fn new(repo: Arc<ReportRepository>, config: Arc<AppConfig>) -> Self {
        Self { repo, config }
    }

    fn session_factory<'a>(&self, session: &'a SessionContext) -> ApiResult<&'a str> {
        let factory = session.factory.as_deref().ok_or_else(|| {
            ApiError::ValidationFailure("工場が選択されていません".to_string())
        })?;
        require_configured_factory(&self.config, factory)?;
        Ok(factory)
    }

    /// 提交日报 (时间戳 = 当前时刻)
    pub fn submit_report(&self, session: &SessionContext, draft: ReportDraft) -> ApiResult<Report> {
        self.submit_report_at(session, draft, submission_time())
    }

    /// 提交日报 (指定时间戳)
    pub fn submit_report_at(
        &self,
        session: &SessionContext,
        draft: ReportDraft,
        timestamp: NaiveDateTime,
    ) -> ApiResult<Report> {
        let factory = self.session_factory(session)?;
        let report = draft.into_report(factory, timestamp);
        validate_report(&report)?;

        if let Err(e) = self.repo.append(&report) {
            tracing::error!(factory, worker = %report.worker, error = %e, "日报提交失败,已丢弃");
            return Err(e.into());
        }

        tracing::info!(
            factory,
            worker = %report.worker,
            machine = %report.machine,
            ground_ok = report.ground_ok,
            rubber_ok = report.rubber_ok,
            "日报已提交"
        );
        Ok(report)
    }

    /// 终了作业并提交日报
    ///
    /// 提交失败时作业仍处于终了状态,画面可重新提交
    pub fn finish_and_submit(
        &self,
        session: &SessionContext,
        work: &mut WorkSession,
        draft: ReportDraft,
    ) -> ApiResult<(WorkSummary, Report)> {
        // 先校验,避免因输入错误而终了作业
        let factory = self.session_factory(session)?;
        let now = submission_time();
        validate_report(&draft.clone().into_report(factory, now))?;

        let summary = work.finish(now)?;
        let report = self.submit_report_at(session, draft, now)?;
        Ok((summary, report))
    }

    /// 查询日报
    ///
    /// # 参数
    /// - `factory`: 管理员的工厂过滤; 作业者忽略此参数,固定为本工厂
    ///
    /// # 返回
    /// 存储不可用时返回空列表
    pub fn list_reports(&self, session: &SessionContext, factory: Option<&str>) -> Vec<Report> {
        let scope = if session.is_admin() {
            factory
        } else {
            session.factory.as_deref()
        };

        let result = match scope {
            Some(f) => self.repo.list_by_factory(f),
            None if session.is_admin() => self.repo.list_all(),
            None => Ok(Vec::new()),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!(?scope, error = %e, "日报读取失败,按空列表处理");
            Vec::new()
        })
    }

    /// 实绩合计 (范围同 list_reports)
    pub fn production_totals(&self, session: &SessionContext, factory: Option<&str>) -> ProductionTotals {
        ProductionTotals::accumulate(&self.list_reports(session, factory))
    }
}
