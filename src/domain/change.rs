// ==========================================
// 生产工单重排系统 - 变更记录领域模型
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 5. 变更原因分类
// 红线: 所有位移必须输出带标签的原因 (可解释性)
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// ChangeReason - 位移原因 (带负载的和类型)
// ==========================================
// 设计: 使用枚举携带负载,新增原因种类时由穷尽匹配兜底
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ChangeReason {
    /// 原计划可行,未发生位移
    NoChange,
    /// 维修类工单,按契约不移动
    FixedMaintenance,
    /// 某前序工单的完工时刻晚于本单原计划开始
    Predecessor { predecessor_no: String },
    /// 工作中心被先放置的工单占用
    CenterBusy { blocking_order_no: String },
    /// 原计划区间与检修窗口重叠
    MaintenanceWindow {
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    },
}

impl ChangeReason {
    /// 原因标签 (与序列化标签一致)
    pub fn tag(&self) -> &'static str {
        match self {
            ChangeReason::NoChange => "no_change",
            ChangeReason::FixedMaintenance => "fixed_maintenance",
            ChangeReason::Predecessor { .. } => "predecessor",
            ChangeReason::CenterBusy { .. } => "center_busy",
            ChangeReason::MaintenanceWindow { .. } => "maintenance_window",
        }
    }

    /// 是否表示实际位移 (排除 no_change 与维修固定)
    pub fn is_displacement(&self) -> bool {
        !matches!(
            self,
            ChangeReason::NoChange | ChangeReason::FixedMaintenance
        )
    }

    /// 生成人类可读说明 (仅展示用途,行为以标签与负载为准)
    pub fn explanation(&self) -> String {
        match self {
            ChangeReason::NoChange => "原计划可行,无需调整".to_string(),
            ChangeReason::FixedMaintenance => "维修类工单,按契约保持原计划".to_string(),
            ChangeReason::Predecessor { predecessor_no } => {
                format!("前序工单 {} 的完工时刻晚于本单原计划开始", predecessor_no)
            }
            ChangeReason::CenterBusy { blocking_order_no } => {
                format!("工作中心已被工单 {} 占用", blocking_order_no)
            }
            ChangeReason::MaintenanceWindow {
                window_start,
                window_end,
            } => {
                format!("原计划区间与检修窗口 [{} ~ {}] 重叠", window_start, window_end)
            }
        }
    }
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ==========================================
// ChangeRecord - 工单变更记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub work_order_no: String,          // 工单号
    pub original_start: NaiveDateTime,  // 原计划开始
    pub original_end: NaiveDateTime,    // 原计划结束
    pub new_start: NaiveDateTime,       // 新计划开始
    pub new_end: NaiveDateTime,         // 新计划结束
    pub displacement_minutes: i64,      // 带符号位移 (分钟)
    pub reason: ChangeReason,           // 位移原因
    pub explanation: String,            // 人类可读说明
}

impl ChangeRecord {
    /// 由放置结果构造变更记录,位移与说明同步派生
    pub fn build(
        work_order_no: impl Into<String>,
        original_start: NaiveDateTime,
        original_end: NaiveDateTime,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
        reason: ChangeReason,
    ) -> Self {
        let explanation = reason.explanation();
        Self {
            work_order_no: work_order_no.into(),
            original_start,
            original_end,
            new_start,
            new_end,
            displacement_minutes: (new_start - original_start).num_minutes(),
            reason,
            explanation,
        }
    }

    /// 计划是否发生变更 (起止任一变化)
    pub fn is_changed(&self) -> bool {
        self.new_start != self.original_start || self.new_end != self.original_end
    }
}
