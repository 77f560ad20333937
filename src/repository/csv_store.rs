// ==========================================
// 作業日報システム - CSV 表格存储
// ==========================================
// 布局: 目录下每张工作表一个 `<表名>.csv`
// 首列 `_schema_version`,其后为表头字段; 文件不存在视为空表
// ==========================================

use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sheet::{SheetRow, TableNames, TableSchema};
use crate::repository::table_store::TableStore;

const VERSION_COLUMN: &str = "_schema_version";

// ==========================================
// CsvTableStore
// ==========================================
pub struct CsvTableStore {
    dir: PathBuf,
    tables: TableNames,
    // 同一进程内串行化追加,避免交错写入
    write_lock: Mutex<()>,
}

impl CsvTableStore {
    /// 打开 (必要时创建) 存储目录
    pub fn open(dir: impl AsRef<Path>, tables: TableNames) -> RepositoryResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            RepositoryError::StoreUnavailable(format!("无法创建存储目录 {}: {}", dir.display(), e))
        })?;
        Ok(Self {
            dir,
            tables,
            write_lock: Mutex::new(()),
        })
    }

    fn file_path(&self, schema: &TableSchema) -> PathBuf {
        self.dir.join(format!("{}.csv", self.tables.name_of(schema.kind)))
    }

    fn expected_header(schema: &TableSchema) -> Vec<String> {
        std::iter::once(VERSION_COLUMN)
            .chain(schema.header.iter().copied())
            .map(|s| s.to_string())
            .collect()
    }

    fn mismatch(&self, schema: &TableSchema, actual: String) -> RepositoryError {
        RepositoryError::SchemaMismatch {
            table: self.tables.name_of(schema.kind).to_string(),
            expected_version: schema.version,
            expected_header: schema.header_text(),
            actual,
        }
    }
}

impl TableStore for CsvTableStore {
    fn read_all_rows(&self, schema: &TableSchema) -> RepositoryResult<Vec<SheetRow>> {
        let path = self.file_path(schema);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)?;

        let header: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        if header != Self::expected_header(schema) {
            return Err(self.mismatch(schema, header.join(",")));
        }

        let expected_version = schema.version.to_string();
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut fields = record.iter();
            let version = fields.next().unwrap_or("").trim();
            if version != expected_version {
                return Err(self.mismatch(schema, format!("行版本 v{}", version)));
            }
            let values: Vec<String> = fields.map(|v| v.to_string()).collect();
            rows.push(SheetRow::from_values(schema.header, values));
        }

        Ok(rows)
    }

    fn append_row(&self, schema: &TableSchema, row: &SheetRow) -> RepositoryResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let path = self.file_path(schema);
        let is_new = !path.exists() || fs::metadata(&path)?.len() == 0;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        if is_new {
            writer.write_record(Self::expected_header(schema))?;
        }

        let mut record = vec![schema.version.to_string()];
        record.extend(row.to_values(schema));
        writer.write_record(&record)?;
        writer.flush()?;

        Ok(())
    }
}
