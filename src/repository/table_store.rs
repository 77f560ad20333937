// ==========================================
// 作業日報システム - 表格存储接口
// ==========================================
// 核心只通过两个操作访问后端: 读取全部行 / 追加一行
// 实现: SqliteTableStore / CsvTableStore / CachedTableStore
// ==========================================

use crate::repository::error::RepositoryResult;
use crate::repository::sheet::{SheetRecord, SheetRow, TableSchema};

// ==========================================
// Trait: TableStore
// ==========================================
pub trait TableStore: Send + Sync {
    /// 读取整张表 (按追加顺序)
    fn read_all_rows(&self, schema: &TableSchema) -> RepositoryResult<Vec<SheetRow>>;

    /// 追加一行 (后端保证单行原子)
    fn append_row(&self, schema: &TableSchema, row: &SheetRow) -> RepositoryResult<()>;
}

/// 读取并解码整张表
///
/// 单行解码失败只记录告警并跳过,不影响其余行
pub fn read_records<R: SheetRecord>(store: &dyn TableStore) -> RepositoryResult<Vec<R>> {
    let schema = R::schema();
    let rows = store.read_all_rows(schema)?;

    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        match R::from_row(row, idx + 1) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(table = ?schema.kind, row = idx + 1, "跳过无法解码的行: {}", e);
            }
        }
    }

    Ok(records)
}

/// 编码并追加一条记录
pub fn append_record<R: SheetRecord>(store: &dyn TableStore, record: &R) -> RepositoryResult<()> {
    store.append_row(R::schema(), &record.to_row())
}
