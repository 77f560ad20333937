// ==========================================
// 作業日報システム - 短期读缓存
// ==========================================
// 每次用户操作都会整表重读; 缓存只在 TTL 内复用读取结果
// 红线: 任何写入 (日报/计划/映射/主数据) 之后必须清空缓存
// 并发: 读取期间发生清空时,该次读取结果不写回缓存 (代数比较)
// ==========================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sheet::{SheetRow, TableKind, TableSchema};
use crate::repository::table_store::TableStore;

/// 默认缓存有效期（秒）
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

struct CacheEntry {
    loaded_at: Instant,
    rows: Vec<SheetRow>,
}

#[derive(Default)]
struct CacheState {
    /// 每次清空 +1
    generation: u64,
    entries: HashMap<TableKind, CacheEntry>,
}

// ==========================================
// CachedTableStore
// ==========================================
pub struct CachedTableStore {
    inner: Arc<dyn TableStore>,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl CachedTableStore {
    pub fn new(inner: Arc<dyn TableStore>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    fn lock_state(&self) -> RepositoryResult<MutexGuard<'_, CacheState>> {
        self.state
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 清空用: 锁中毒时仍然取得状态,保证写后不读旧数据
    fn lock_state_for_clear(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 清空全部缓存
    pub fn invalidate_all(&self) {
        let mut state = self.lock_state_for_clear();
        state.generation = state.generation.wrapping_add(1);
        state.entries.clear();
    }

    /// 清空单张表的缓存
    pub fn invalidate(&self, kind: TableKind) {
        let mut state = self.lock_state_for_clear();
        state.generation = state.generation.wrapping_add(1);
        state.entries.remove(&kind);
    }

    /// 当前缓存的表数量
    pub fn cached_tables(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }
}

impl TableStore for CachedTableStore {
    fn read_all_rows(&self, schema: &TableSchema) -> RepositoryResult<Vec<SheetRow>> {
        let generation = {
            let state = self.lock_state()?;
            if let Some(entry) = state.entries.get(&schema.kind) {
                if entry.loaded_at.elapsed() < self.ttl {
                    tracing::trace!(table = ?schema.kind, "命中读缓存");
                    return Ok(entry.rows.clone());
                }
            }
            state.generation
        };

        // 读失败不缓存
        let rows = self.inner.read_all_rows(schema)?;

        let mut state = self.lock_state()?;
        if state.generation == generation {
            state.entries.insert(
                schema.kind,
                CacheEntry {
                    loaded_at: Instant::now(),
                    rows: rows.clone(),
                },
            );
        } else {
            tracing::trace!(table = ?schema.kind, "读取期间缓存已清空,结果不写回");
        }

        Ok(rows)
    }

    fn append_row(&self, schema: &TableSchema, row: &SheetRow) -> RepositoryResult<()> {
        let result = self.inner.append_row(schema, row);
        // 写入失败同样清空
        self.invalidate_all();
        result
    }
}
