// ==========================================
// 作業日報システム - 主数据 (下拉选项) API
// ==========================================
// 读取失败降级为空列表; 追加仅限管理员
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::validator::{require_admin, require_configured_factory, require_non_empty};
use crate::config::AppConfig;
use crate::domain::master::{AddOptionOutcome, MasterOption};
use crate::domain::session::SessionContext;
use crate::domain::types::MasterCategory;
use crate::repository::MasterDataRepository;

pub struct MasterDataApi {
    repo: Arc<MasterDataRepository>,
    config: Arc<AppConfig>,
}

impl MasterDataApi {
    pub fn new(repo: Arc<MasterDataRepository>, config: Arc<AppConfig>) -> Self {
        Self { repo, config }
    }

    /// 查询选项 (追加顺序)
    ///
    /// # 参数
    /// - `factory`: None 时返回全部工厂的选项
    ///
    /// # 返回
    /// 存储不可用时返回空列表
    pub fn list_options(&self, category: MasterCategory, factory: Option<&str>) -> Vec<String> {
        match self.repo.list_values(category, factory) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(%category, ?factory, error = %e, "选项读取失败,按空列表处理");
                Vec::new()
            }
        }
    }

    /// 查询全部选项 (管理画面用)
    pub fn list_all_options(&self) -> Vec<MasterOption> {
        self.repo.list_all().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "选项读取失败,按空列表处理");
            Vec::new()
        })
    }

    /// 追加选项
    ///
    /// # 返回
    /// - `Ok(Added)`: 已追加
    /// - `Ok(AlreadyExists)`: 开启重复拒绝时,同一工厂/分类下已有相同值
    pub fn add_option(
        &self,
        session: &SessionContext,
        factory: &str,
        category: MasterCategory,
        value: &str,
    ) -> ApiResult<AddOptionOutcome> {
        require_admin(session)?;
        require_configured_factory(&self.config, factory)?;
        require_non_empty(category.label(), value)?;

        let option = MasterOption::new(factory, category, value.trim());

        if self.config.reject_duplicate_options {
            // 这里读失败要上报,否则可能写入重复值
            let exists = self.repo.list_all()?.iter().any(|o| o.same_key(&option));
            if exists {
                tracing::info!(factory, %category, value = %option.value, "选项已存在,未追加");
                return Ok(AddOptionOutcome::AlreadyExists);
            }
        }

        self.repo.append(&option)?;
        tracing::info!(factory, %category, value = %option.value, "选项已追加");
        Ok(AddOptionOutcome::Added)
    }
}
