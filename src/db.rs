// ==========================================
// 作業日報システム - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的连接配置
// - 统一 busy_timeout,减少多人同时提交时的偶发 busy 错误
// - 维护 sheet_schema 登记表 (每张工作表的版本与表头)
// ==========================================

use rusqlite::{params, Connection, OptionalExtension};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 表结构登记表名
pub const SHEET_SCHEMA_TABLE: &str = "sheet_schema";

/// 配置 SQLite 连接
///
/// 说明：busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 创建表结构登记表（幂等）
pub fn ensure_sheet_schema_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        r#"CREATE TABLE IF NOT EXISTS {} (
            table_name TEXT PRIMARY KEY,
            schema_version INTEGER NOT NULL,
            header_json TEXT NOT NULL,
            registered_at TEXT NOT NULL DEFAULT (datetime('now'))
        )"#,
        SHEET_SCHEMA_TABLE
    ))
}

/// 读取某张工作表登记的 (版本, 表头JSON)，未登记时返回 None
pub fn read_sheet_schema(conn: &Connection, table_name: &str) -> rusqlite::Result<Option<(i64, String)>> {
    conn.query_row(
        &format!(
            "SELECT schema_version, header_json FROM {} WHERE table_name = ?1",
            SHEET_SCHEMA_TABLE
        ),
        params![table_name],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
}

/// 登记工作表的版本与表头
pub fn register_sheet_schema(
    conn: &Connection,
    table_name: &str,
    version: u32,
    header_json: &str,
) -> rusqlite::Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO {} (table_name, schema_version, header_json) VALUES (?1, ?2, ?3)",
            SHEET_SCHEMA_TABLE
        ),
        params![table_name, version, header_json],
    )?;
    Ok(())
}

/// SQL 标识符转义 (表名来自配置)
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
