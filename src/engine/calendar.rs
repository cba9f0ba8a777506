// ==========================================
// 生产工单重排系统 - 工作日历引擎
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 3. 工作日历原语
// ==========================================
// 职责: 判定任意时刻是否可生产; 将"自 T 起消耗 D 个工作分钟"
//       换算为真实结束时刻 (跨班次间隙/周末/多日检修/跨午夜班次)
// 输入: 工作中心的班次表 + 检修窗口
// 输出: is_working / next_working / end_of_work 三个纯函数
// ==========================================
// 红线: 班次上界为开区间 (17:00 不属于 09:00-17:00 班次)
// 红线: 检修窗口为闭区间 (边界时刻同样停产)
// ==========================================

use crate::config::EngineConfig;
use crate::domain::{MaintenanceWindow, Shift, WorkCenter};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

// ==========================================
// CalendarEngine - 工作日历引擎
// ==========================================
// 无状态纯函数引擎: 构造后对同一工作中心可重复查询
#[derive(Debug)]
pub struct CalendarEngine {
    work_center: String,
    shifts: Vec<Shift>,
    windows: Vec<MaintenanceWindow>,
    search_horizon_minutes: i64,
    traversal_cap_minutes: i64,
}

impl CalendarEngine {
    /// 基于工作中心构造日历引擎
    ///
    /// # 返回
    /// - `Ok(CalendarEngine)`: 构造成功
    /// - `Err(NoShifts)`: 工作中心不含任何班次,不可实例化
    pub fn new(center: &WorkCenter, config: &EngineConfig) -> EngineResult<Self> {
        if center.shifts.is_empty() {
            return Err(EngineError::NoShifts {
                work_center: center.name.clone(),
            });
        }

        Ok(Self {
            work_center: center.name.clone(),
            shifts: center.shifts.clone(),
            windows: center.maintenance_windows.clone(),
            search_horizon_minutes: config.search_horizon_days * 24 * 60,
            traversal_cap_minutes: config.traversal_cap_minutes,
        })
    }

    // ==========================================
    // 核心原语
    // ==========================================

    /// 判定时刻 t 是否为工作时间
    ///
    /// 条件: t 落在某个班次内,且不落在任何检修窗口内
    ///
    /// 班次归属判定:
    /// - 普通班次: 星期相同且 start*60 ≤ tod < end*60
    /// - 跨午夜班次: 在班次当日看午夜前段 (tod ≥ start*60),
    ///   在次日看午夜后段 (tod < end*60)
    pub fn is_working(&self, t: NaiveDateTime) -> bool {
        self.in_any_shift(t) && !self.in_any_window(t)
    }

    /// 自 t 起 (含 t) 最早的工作时刻
    ///
    /// # 返回
    /// - `Ok(t')`: 满足 is_working(t') 的最小 t' ≥ t
    /// - `Err(NoWorkingTime)`: 搜索视界 (默认 30 天) 内不存在工作时刻
    pub fn next_working(&self, t: NaiveDateTime) -> EngineResult<NaiveDateTime> {
        let mut cursor = t;
        let mut advanced: i64 = 0;

        while advanced <= self.search_horizon_minutes {
            if self.is_working(cursor) {
                return Ok(cursor);
            }
            cursor += Duration::minutes(1);
            advanced += 1;
        }

        Err(EngineError::NoWorkingTime {
            work_center: self.work_center.clone(),
            from: t,
            detail: format!(
                "{} 分钟 (约 {} 天) 内无任何工作时刻",
                self.search_horizon_minutes,
                self.search_horizon_minutes / (24 * 60)
            ),
        })
    }

    /// 自 start 起消耗 duration_minutes 个工作分钟后的结束时刻
    ///
    /// 算法: 逐分钟推进游标,工作分钟计数递减,返回最后一次递减后
    /// 再前进一分钟的游标位置 (即第 D 个工作分钟完成的时刻)
    ///
    /// # 返回
    /// - `Ok(end)`: 结束时刻
    /// - `Err(NoWorkingTime)`: 游标推进超过安全上限 (默认 10,000 分钟)
    pub fn end_of_work(
        &self,
        start: NaiveDateTime,
        duration_minutes: i64,
    ) -> EngineResult<NaiveDateTime> {
        if duration_minutes <= 0 {
            return Err(EngineError::Internal(format!(
                "工时必须为正: duration_minutes={}",
                duration_minutes
            )));
        }

        let mut cursor = start;
        let mut remaining = duration_minutes;
        let mut advanced: i64 = 0;

        while remaining > 0 {
            if advanced >= self.traversal_cap_minutes {
                return Err(EngineError::NoWorkingTime {
                    work_center: self.work_center.clone(),
                    from: start,
                    detail: format!(
                        "工时推进超过安全上限 {} 分钟 (剩余工时 {} 分钟)",
                        self.traversal_cap_minutes, remaining
                    ),
                });
            }
            if self.is_working(cursor) {
                remaining -= 1;
            }
            cursor += Duration::minutes(1);
            advanced += 1;
        }

        Ok(cursor)
    }

    // ==========================================
    // 内部判定
    // ==========================================

    /// t 是否落在任一班次内 (不考虑检修窗口)
    fn in_any_shift(&self, t: NaiveDateTime) -> bool {
        let weekday = t.weekday().num_days_from_sunday() as u8;
        let prev_weekday = (weekday + 6) % 7;
        let tod = t.hour() * 60 + t.minute();

        self.shifts.iter().any(|shift| {
            if shift.spans_midnight() {
                // 午夜前段归属班次当日,午夜后段归属次日
                (shift.day_of_week == weekday && tod >= shift.start_minute())
                    || (shift.day_of_week == prev_weekday && tod < shift.end_minute())
            } else {
                shift.day_of_week == weekday
                    && tod >= shift.start_minute()
                    && tod < shift.end_minute()
            }
        })
    }

    /// t 是否落在任一检修窗口内 (闭区间)
    fn in_any_window(&self, t: NaiveDateTime) -> bool {
        self.windows.iter().any(|w| w.blocks(t))
    }
}
