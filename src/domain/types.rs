// ==========================================
// 作業日報システム - 领域类型定义
// ==========================================
// 职责: 主数据分类、计数列、角色、进度状态、作业状态等封闭枚举
// 红线: 分类必须是封闭枚举,禁止用字符串键拼写分类
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 过滤条件"未指定"的存储哨兵值
pub const UNSPECIFIED_SENTINEL: &str = "指定なし";

// ==========================================
// 主数据分类 (Master Category)
// ==========================================
// 序列化格式: snake_case (与 Settings 表 category 列一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterCategory {
    Line,    // ライン種別
    Worker,  // 作業者
    Model,   // 型番
    Product, // 製品種別
    Machine, // 機械種別
}

impl MasterCategory {
    pub const ALL: [MasterCategory; 5] = [
        MasterCategory::Line,
        MasterCategory::Worker,
        MasterCategory::Model,
        MasterCategory::Product,
        MasterCategory::Machine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MasterCategory::Line => "line",
            MasterCategory::Worker => "worker",
            MasterCategory::Model => "model",
            MasterCategory::Product => "product",
            MasterCategory::Machine => "machine",
        }
    }

    /// 画面显示名
    pub fn label(&self) -> &'static str {
        match self {
            MasterCategory::Line => "ライン種別",
            MasterCategory::Worker => "作業者",
            MasterCategory::Model => "型番",
            MasterCategory::Product => "製品種別",
            MasterCategory::Machine => "機械種別",
        }
    }
}

impl fmt::Display for MasterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MasterCategory {
    type Err = String;

    /// 同时接受英文键与画面显示名
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        MasterCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(key) || c.label() == key)
            .ok_or_else(|| format!("未知的主数据分类: {}", key))
    }
}

// ==========================================
// 计数列 (Count Column)
// ==========================================
// 只允许良品计数列,不良数永远不参与进度汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountColumn {
    GroundOk, // 研削 研磨数
    RubberOk, // ラバ研 研磨数
}

impl CountColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountColumn::GroundOk => "GROUND_OK",
            CountColumn::RubberOk => "RUBBER_OK",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountColumn::GroundOk => "研削 研磨数",
            CountColumn::RubberOk => "ラバ研 研磨数",
        }
    }
}

impl fmt::Display for CountColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CountColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "GROUND_OK" | "ground_ok" | "研削 研磨数" | "研削研磨数" => Ok(CountColumn::GroundOk),
            "RUBBER_OK" | "rubber_ok" | "ラバ研 研磨数" | "ラバ研研磨数" => {
                Ok(CountColumn::RubberOk)
            }
            other => Err(format!("未知的计数列: {}", other)),
        }
    }
}

// ==========================================
// 字段过滤条件 (Field Filter)
// ==========================================
// Unspecified 表示不过滤; 空文本同样视为未指定
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FieldFilter {
    #[default]
    Unspecified,
    Value(String),
}

impl FieldFilter {
    pub fn value(value: impl Into<String>) -> Self {
        FieldFilter::Value(value.into())
    }

    /// 从存储文本解析
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == UNSPECIFIED_SENTINEL {
            FieldFilter::Unspecified
        } else {
            FieldFilter::Value(trimmed.to_string())
        }
    }

    /// 序列化为存储文本
    pub fn as_stored(&self) -> &str {
        match self {
            FieldFilter::Unspecified => UNSPECIFIED_SENTINEL,
            FieldFilter::Value(v) => v.as_str(),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, FieldFilter::Unspecified)
    }

    /// 判断字段值是否满足过滤条件 (精确匹配)
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            FieldFilter::Unspecified => true,
            FieldFilter::Value(expected) => expected == actual,
        }
    }
}

// ==========================================
// 角色 (Role)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,  // 作业者 (工厂范围)
    Admin, // 管理员 (全范围)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

// ==========================================
// 进度状态 (Progress Status)
// ==========================================
// Delayed 仅由规则型进度 (排程 + 计数规则) 产生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    InProgress,
    Complete,
    Delayed,
}

impl ProgressStatus {
    /// i18n 键
    pub fn message_key(&self) -> &'static str {
        match self {
            ProgressStatus::InProgress => "status.in_progress",
            ProgressStatus::Complete => "status.complete",
            ProgressStatus::Delayed => "status.delayed",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressStatus::InProgress => write!(f, "IN_PROGRESS"),
            ProgressStatus::Complete => write!(f, "COMPLETE"),
            ProgressStatus::Delayed => write!(f, "DELAYED"),
        }
    }
}

// ==========================================
// 作业状态 (Work Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    BeforeStart, // 開始前
    Working,     // 作業中
    Setup,       // 段取り中
    Paused,      // 中断中
    Finished,    // 終了
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkStatus::BeforeStart => write!(f, "BEFORE_START"),
            WorkStatus::Working => write!(f, "WORKING"),
            WorkStatus::Setup => write!(f, "SETUP"),
            WorkStatus::Paused => write!(f, "PAUSED"),
            WorkStatus::Finished => write!(f, "FINISHED"),
        }
    }
}

impl WorkStatus {
    /// 画面显示用的翻译键
    pub fn message_key(&self) -> &'static str {
        match self {
            WorkStatus::BeforeStart => "work.before_start",
            WorkStatus::Working => "work.working",
            WorkStatus::Setup => "work.setup",
            WorkStatus::Paused => "work.paused",
            WorkStatus::Finished => "work.finished",
        }
    }
}

// ==========================================
// 段取种别 (Setup Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetupKind {
    Major, // 大段取
    Minor, // 小段取
}

impl SetupKind {
    pub fn label(&self) -> &'static str {
        match self {
            SetupKind::Major => "大段取",
            SetupKind::Minor => "小段取",
        }
    }
}
