// ==========================================
// 作業日報システム - 主数据仓储 (Settings 表)
// ==========================================
// 红线: Repository 不含业务逻辑 (重复校验在 API 层)
// ==========================================

use std::sync::Arc;

use crate::domain::master::MasterOption;
use crate::domain::types::MasterCategory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sheet::{SheetRecord, SheetRow, TableSchema, SETTINGS_SCHEMA};
use crate::repository::table_store::{append_record, read_records, TableStore};

impl SheetRecord for MasterOption {
    fn schema() -> &'static TableSchema {
        &SETTINGS_SCHEMA
    }

    fn to_row(&self) -> SheetRow {
        SheetRow::new()
            .with("factory", &self.factory)
            .with("category", self.category.as_str())
            .with("value", &self.value)
    }

    fn from_row(row: &SheetRow, row_no: usize) -> RepositoryResult<Self> {
        let category = row
            .text("category")
            .parse::<MasterCategory>()
            .map_err(|message| RepositoryError::RowDecodeError {
                table: "Settings".to_string(),
                row: row_no,
                message,
            })?;

        Ok(MasterOption {
            factory: row.text("factory"),
            category,
            value: row.text("value"),
        })
    }
}

// ==========================================
// MasterDataRepository
// ==========================================
pub struct MasterDataRepository {
    store: Arc<dyn TableStore>,
}

impl MasterDataRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// 查询全部选项 (追加顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<MasterOption>> {
        read_records(self.store.as_ref())
    }

    /// 查询某分类的选项值,可按工厂过滤
    ///
    /// # 返回
    /// - 追加顺序的值列表; 未登记时为空
    pub fn list_values(
        &self,
        category: MasterCategory,
        factory: Option<&str>,
    ) -> RepositoryResult<Vec<String>> {
        let values = self
            .list_all()?
            .into_iter()
            .filter(|o| o.category == category)
            .filter(|o| factory.map_or(true, |f| o.factory == f))
            .map(|o| o.value)
            .collect();

        Ok(values)
    }

    /// 追加选项 (无去重)
    pub fn append(&self, option: &MasterOption) -> RepositoryResult<()> {
        append_record(self.store.as_ref(), option)
    }
}
