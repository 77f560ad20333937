// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 临时存储上的完整 AppState 与常用会话
// ==========================================

use chrono::{Local, NaiveDateTime};
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};

use shopfloor_report::app::AppState;
use shopfloor_report::config::StoreBackend;
use shopfloor_report::domain::session::SessionContext;
use shopfloor_report::repository::error::{RepositoryError, RepositoryResult};
use shopfloor_report::repository::sheet::{SheetRow, TableSchema};
use shopfloor_report::repository::TableStore;

use crate::test_helpers::{create_test_csv_dir, create_test_db, test_config};

enum TempStore {
    Sqlite(NamedTempFile),
    Csv(TempDir),
    None,
}

// ==========================================
// API测试环境
// ==========================================
pub struct ApiTestEnv {
    pub state: AppState,
    // 临时文件（确保生命周期）
    _temp: TempStore,
}

impl ApiTestEnv {
    /// SQLite 临时库
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let (temp_file, db_path) = create_test_db()?;
        let state = AppState::new(test_config(StoreBackend::Sqlite, &db_path))?;
        Ok(Self {
            state,
            _temp: TempStore::Sqlite(temp_file),
        })
    }

    /// CSV 临时目录
    pub fn new_csv() -> Result<Self, Box<dyn Error>> {
        let dir = create_test_csv_dir()?;
        let location = dir.path().display().to_string();
        let state = AppState::new(test_config(StoreBackend::Csv, &location))?;
        Ok(Self {
            state,
            _temp: TempStore::Csv(dir),
        })
    }

    /// 任意存储 (故障注入用)
    pub fn with_store(store: Arc<dyn TableStore>) -> Self {
        let state = AppState::with_store(
            test_config(StoreBackend::Sqlite, ":memory:"),
            store,
            "injected".to_string(),
        );
        Self {
            state,
            _temp: TempStore::None,
        }
    }

    pub fn admin(&self) -> SessionContext {
        SessionContext::admin("admin-session".to_string(), now())
    }

    pub fn worker(&self, factory: &str) -> SessionContext {
        SessionContext::worker(format!("worker-{}", factory), factory, now())
    }
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ==========================================
// FailingTableStore - 始终不可用的存储
// ==========================================
#[derive(Default)]
pub struct FailingTableStore {
    pub read_attempts: AtomicUsize,
    pub append_attempts: AtomicUsize,
}

impl TableStore for FailingTableStore {
    fn read_all_rows(&self, _schema: &TableSchema) -> RepositoryResult<Vec<SheetRow>> {
        self.read_attempts.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::StoreUnavailable("connection refused".to_string()))
    }

    fn append_row(&self, _schema: &TableSchema, _row: &SheetRow) -> RepositoryResult<()> {
        self.append_attempts.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::StoreUnavailable("connection refused".to_string()))
    }
}
