// ==========================================
// 作業日報システム - SQLite 表格存储
// ==========================================
// 布局: 每张工作表一张 SQL 表,表头字段各占一列 TEXT,另加 row_no 自增序号
// 登记: sheet_schema 记录版本与表头,不一致时拒绝打开
// ==========================================

use rusqlite::{params_from_iter, Connection};
use std::sync::{Arc, Mutex};

use crate::db::{
    ensure_sheet_schema_table, open_sqlite_connection, quote_ident, read_sheet_schema,
    register_sheet_schema,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sheet::{SheetRow, TableNames, TableSchema, ALL_SCHEMAS};
use crate::repository::table_store::TableStore;

// ==========================================
// SqliteTableStore
// ==========================================
pub struct SqliteTableStore {
    conn: Arc<Mutex<Connection>>,
    tables: TableNames,
}

impl SqliteTableStore {
    /// 打开数据库文件并初始化全部工作表
    ///
    /// # 返回
    /// - `Err(StoreUnavailable)`: 无法打开数据库
    /// - `Err(SchemaMismatch)`: 已有表结构与当前版本不一致
    pub fn open(db_path: &str, tables: TableNames) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path).map_err(|e| {
            RepositoryError::StoreUnavailable(format!("无法打开数据库 {}: {}", db_path, e))
        })?;
        Self::from_connection(Arc::new(Mutex::new(conn)), tables)
    }

    /// 从已有连接创建 (测试用内存库等)
    pub fn from_connection(conn: Arc<Mutex<Connection>>, tables: TableNames) -> RepositoryResult<Self> {
        let store = Self { conn, tables };
        store.initialize()?;
        Ok(store)
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn initialize(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        ensure_sheet_schema_table(&conn)?;
        for schema in ALL_SCHEMAS.iter() {
            self.ensure_table(&conn, schema)?;
        }
        tracing::debug!("SQLite 工作表初始化完成");
        Ok(())
    }

    /// 建表或校验既有表结构
    fn ensure_table(&self, conn: &Connection, schema: &TableSchema) -> RepositoryResult<()> {
        let table = self.tables.name_of(schema.kind);
        let expected_header = serde_json::to_string(schema.header)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;

        match read_sheet_schema(conn, table)? {
            Some((version, header_json)) => {
                if version != i64::from(schema.version) || header_json != expected_header {
                    return Err(RepositoryError::SchemaMismatch {
                        table: table.to_string(),
                        expected_version: schema.version,
                        expected_header: schema.header_text(),
                        actual: format!("v{} {}", version, header_json),
                    });
                }
            }
            None => {
                let columns = schema
                    .header
                    .iter()
                    .map(|h| format!("{} TEXT NOT NULL DEFAULT ''", quote_ident(h)))
                    .collect::<Vec<_>>()
                    .join(", ");
                conn.execute_batch(&format!(
                    "CREATE TABLE IF NOT EXISTS {} (row_no INTEGER PRIMARY KEY AUTOINCREMENT, {})",
                    quote_ident(table),
                    columns
                ))?;
                register_sheet_schema(conn, table, schema.version, &expected_header)?;
                tracing::info!(table, version = schema.version, "已创建工作表");
            }
        }

        Ok(())
    }

    fn column_list(schema: &TableSchema) -> String {
        schema
            .header
            .iter()
            .map(|h| quote_ident(h))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TableStore for SqliteTableStore {
    fn read_all_rows(&self, schema: &TableSchema) -> RepositoryResult<Vec<SheetRow>> {
        let conn = self.get_conn()?;
        let table = self.tables.name_of(schema.kind);

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} ORDER BY row_no",
            Self::column_list(schema),
            quote_ident(table)
        ))?;

        let width = schema.header.len();
        let rows = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(width);
                for idx in 0..width {
                    values.push(row.get::<_, String>(idx)?);
                }
                Ok(SheetRow::from_values(schema.header, values))
            })?
            .collect::<Result<Vec<SheetRow>, _>>()?;

        Ok(rows)
    }

    fn append_row(&self, schema: &TableSchema, row: &SheetRow) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let table = self.tables.name_of(schema.kind);

        let placeholders = (1..=schema.header.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        conn.execute(
            &format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote_ident(table),
                Self::column_list(schema),
                placeholders
            ),
            params_from_iter(row.to_values(schema)),
        )?;

        Ok(())
    }
}
