// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use shopfloor_report::domain::plan::MappingFilters;
use shopfloor_report::domain::report::{Report, ReportDraft};
use shopfloor_report::domain::types::FieldFilter;

// ==========================================
// 日报构建器
// ==========================================
pub struct ReportBuilder {
    factory: String,
    draft: ReportDraft,
    timestamp: NaiveDateTime,
}

impl ReportBuilder {
    pub fn new(factory: &str) -> Self {
        Self {
            factory: factory.to_string(),
            draft: ReportDraft {
                worker: "廣瀬".to_string(),
                line: "外径ライン".to_string(),
                model: "UA25".to_string(),
                process_lot: "L01".to_string(),
                product: "SHI".to_string(),
                machine: "T11J".to_string(),
                ..ReportDraft::default()
            },
            timestamp: NaiveDate::from_ymd_opt(2026, 10, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    pub fn worker(mut self, worker: &str) -> Self {
        self.draft.worker = worker.to_string();
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.draft.line = line.to_string();
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.draft.model = model.to_string();
        self
    }

    pub fn product(mut self, product: &str) -> Self {
        self.draft.product = product.to_string();
        self
    }

    pub fn machine(mut self, machine: &str) -> Self {
        self.draft.machine = machine.to_string();
        self
    }

    pub fn ground(mut self, ok: i64, ng: i64) -> Self {
        self.draft.ground_ok = ok;
        self.draft.ground_ng = ng;
        self
    }

    pub fn rubber(mut self, ok: i64, ng: i64) -> Self {
        self.draft.rubber_ok = ok;
        self.draft.rubber_ng = ng;
        self
    }

    pub fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn draft(self) -> ReportDraft {
        self.draft
    }

    pub fn build(self) -> Report {
        let factory = self.factory.clone();
        let timestamp = self.timestamp;
        self.draft.into_report(&factory, timestamp)
    }
}

// ==========================================
// 映射过滤条件构建器
// ==========================================
#[derive(Default)]
pub struct FiltersBuilder {
    filters: MappingFilters,
}

impl FiltersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(mut self, v: &str) -> Self {
        self.filters.factory = FieldFilter::value(v);
        self
    }

    pub fn line(mut self, v: &str) -> Self {
        self.filters.line = FieldFilter::value(v);
        self
    }

    pub fn machine(mut self, v: &str) -> Self {
        self.filters.machine = FieldFilter::value(v);
        self
    }

    pub fn product(mut self, v: &str) -> Self {
        self.filters.product = FieldFilter::value(v);
        self
    }

    pub fn model(mut self, v: &str) -> Self {
        self.filters.model = FieldFilter::value(v);
        self
    }

    pub fn build(self) -> MappingFilters {
        self.filters
    }
}
