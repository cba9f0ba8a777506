// ==========================================
// 生产工单重排系统 - 领域类型定义
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 0.2 工单分类
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单类别 (Order Kind)
// ==========================================
// 红线: 维修类工单不可移动,原位参与排他
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Production,  // 生产工单 (可移动)
    Maintenance, // 维修工单 (固定,不可移动)
}

impl OrderKind {
    /// 从导入文档的 isMaintenance 标志转换
    pub fn from_maintenance_flag(is_maintenance: bool) -> Self {
        if is_maintenance {
            OrderKind::Maintenance
        } else {
            OrderKind::Production
        }
    }

    /// 是否为固定 (维修) 类工单
    pub fn is_fixed(&self) -> bool {
        *self == OrderKind::Maintenance
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Production => write!(f, "PRODUCTION"),
            OrderKind::Maintenance => write!(f, "MAINTENANCE"),
        }
    }
}

// ==========================================
// 文档类型 (Doc Type)
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 9.1 输入流契约
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocType {
    WorkCenter,
    WorkOrder,
    ManufacturingOrder,
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocType::WorkCenter => write!(f, "workCenter"),
            DocType::WorkOrder => write!(f, "workOrder"),
            DocType::ManufacturingOrder => write!(f, "manufacturingOrder"),
        }
    }
}
