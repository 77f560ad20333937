// ==========================================
// 作業日報システム - 主数据 (下拉选项) 领域模型
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::MasterCategory;

// ==========================================
// MasterOption - 下拉选项
// ==========================================
// (factory, category, value) 的唯一性由 API 层按配置决定是否校验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterOption {
    pub factory: String,
    pub category: MasterCategory,
    pub value: String,
}

impl MasterOption {
    pub fn new(factory: impl Into<String>, category: MasterCategory, value: impl Into<String>) -> Self {
        Self {
            factory: factory.into(),
            category,
            value: value.into(),
        }
    }

    pub fn same_key(&self, other: &MasterOption) -> bool {
        self.factory == other.factory && self.category == other.category && self.value == other.value
    }
}

/// 追加选项的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddOptionOutcome {
    Added,
    AlreadyExists,
}
