// ==========================================
// 生产工单重排系统 - 工作中心领域模型
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 1. 工作中心与班次
// 红线: 工作中心至少有一个班次,否则不可实例化
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Shift - 周期性班次
// ==========================================
// 语义: 每周在 day_of_week 重复的工作窗口,小时为整点边界
// 上界为开区间: 09:00-17:00 包含 16:59,不包含 17:00
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub day_of_week: u8, // 星期 (0=周日 .. 6=周六)
    pub start_hour: u8,  // 起始小时 (0..23)
    pub end_hour: u8,    // 结束小时 (0..23, 开区间)
}

impl Shift {
    pub fn new(day_of_week: u8, start_hour: u8, end_hour: u8) -> Self {
        Self {
            day_of_week,
            start_hour,
            end_hour,
        }
    }

    /// 班次是否跨越午夜
    ///
    /// 约定: end_hour ≤ start_hour 即视为跨午夜,
    /// 午夜后的部分归属于下一个星期日的凌晨
    pub fn spans_midnight(&self) -> bool {
        self.end_hour <= self.start_hour
    }

    /// 起始分钟 (当日 0 点起算)
    pub fn start_minute(&self) -> u32 {
        self.start_hour as u32 * 60
    }

    /// 结束分钟 (当日 0 点起算, 开区间)
    pub fn end_minute(&self) -> u32 {
        self.end_hour as u32 * 60
    }
}

// ==========================================
// MaintenanceWindow - 检修停机窗口
// ==========================================
// 语义: [start, end] 闭区间内工作中心停产
// 允许多日窗口,允许互相重叠,引擎不做合并
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceWindow {
    pub start: NaiveDateTime,   // 停机开始 (含)
    pub end: NaiveDateTime,     // 停机结束 (含)
    pub reason: Option<String>, // 停机原因 (可选)
}

impl MaintenanceWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            reason: None,
        }
    }

    /// 某时刻是否落在停机窗口内 (闭区间判定)
    pub fn blocks(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }
}

// ==========================================
// WorkCenter - 工作中心
// ==========================================
// 语义: 同一时刻至多生产一个工单的资源,
// 携带周期性班次表与检修停机窗口
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkCenter {
    pub name: String,                              // 工作中心名称 (唯一标识)
    pub shifts: Vec<Shift>,                        // 班次集合 (顺序无关)
    pub maintenance_windows: Vec<MaintenanceWindow>, // 检修窗口集合
}

impl WorkCenter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shifts: Vec::new(),
            maintenance_windows: Vec::new(),
        }
    }

    /// 追加一个班次 (建造者风格,测试与导入层使用)
    pub fn with_shift(mut self, day_of_week: u8, start_hour: u8, end_hour: u8) -> Self {
        self.shifts.push(Shift::new(day_of_week, start_hour, end_hour));
        self
    }

    /// 追加一个检修窗口
    pub fn with_maintenance(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.maintenance_windows.push(MaintenanceWindow::new(start, end));
        self
    }
}
