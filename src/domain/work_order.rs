// ==========================================
// 生产工单重排系统 - 工单领域模型
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 2. 工单与依赖关系
// 红线: 引擎输出新的工单记录,不得修改输入记录
// ==========================================

use crate::domain::types::OrderKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// WorkOrder - 工单
// ==========================================
// 不变式: end ≥ start; duration_minutes > 0;
// depends_on 中的每个工单号都必须属于同一工作中心且出现在同一次调用中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub work_order_no: String,                // 工单号 (稳定标识,全程唯一键)
    pub manufacturing_order_id: Option<String>, // 所属制造订单ID
    pub work_center_id: String,               // 所属工作中心名称
    pub start: NaiveDateTime,                 // 原计划开始
    pub end: NaiveDateTime,                   // 原计划结束
    pub duration_minutes: i64,                // 工时 (工作分钟,非墙钟跨度)
    pub kind: OrderKind,                      // 工单类别 (生产/维修)
    pub depends_on: Vec<String>,              // 前序工单号集合
}

impl WorkOrder {
    /// 是否为固定 (维修) 类工单
    pub fn is_fixed(&self) -> bool {
        self.kind.is_fixed()
    }

    /// 生成一份更新了起止时刻的新工单记录
    ///
    /// 输入工单保持只读,排产结果以新记录形式输出
    pub fn rescheduled(&self, new_start: NaiveDateTime, new_end: NaiveDateTime) -> Self {
        let mut order = self.clone();
        order.start = new_start;
        order.end = new_end;
        order
    }
}

// ==========================================
// ManufacturingOrder - 制造订单
// ==========================================
// 注: 引擎不消费制造订单,仅在导入层保留用于报表口径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturingOrder {
    pub manufacturing_order_id: String, // 制造订单ID
    pub description: Option<String>,    // 描述 (可选)
}
