// ==========================================
// 生产工单重排系统 - 冲突放置引擎
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 5. 冲突驱动放置
// ==========================================
// 职责: 沿线性化顺序为每个工单求最早可行开始时刻
// 约束: (a) 前序完工下限 (b) 工作日历 (c) 工作中心排他
//       (d) 检修窗口 (e) 维修类工单原位固定
// 输出: (新开始, 新结束) + 带标签的变更记录
// ==========================================
// 红线: 工单全程以稳定工单号为键,禁止位置下标别名
// 红线: 已放置区间在本次调用内不可再变
// 注: 起点吸附到工作时间之后重新校验排他,防止吸附间隙
//     被先放置工单占用导致的区间重叠
// ==========================================

use crate::domain::{ChangeReason, ChangeRecord, MaintenanceWindow, WorkOrder};
use crate::engine::calendar::CalendarEngine;
use crate::engine::error::{EngineError, EngineResult};
use chrono::NaiveDateTime;
use std::collections::HashMap;

// ==========================================
// PlacedInterval - 已放置区间
// ==========================================
// 区间语义: [start, end),右端点相接不算重叠
#[derive(Debug, Clone)]
struct PlacedInterval {
    work_order_no: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

// ==========================================
// OrderPlacer - 冲突放置引擎
// ==========================================
pub struct OrderPlacer<'a> {
    calendar: &'a CalendarEngine,
    windows: &'a [MaintenanceWindow],
    /// 已放置区间表,按放置顺序追加,本次调用内只增不改
    placed: Vec<PlacedInterval>,
    /// 工单号 → placed 下标 (前序完工时刻查询)
    index_by_no: HashMap<String, usize>,
}

impl<'a> OrderPlacer<'a> {
    pub fn new(calendar: &'a CalendarEngine, windows: &'a [MaintenanceWindow]) -> Self {
        Self {
            calendar,
            windows,
            placed: Vec::new(),
            index_by_no: HashMap::new(),
        }
    }

    // ==========================================
    // 固定工单放置
    // ==========================================

    /// 原位放置维修类工单
    ///
    /// 维修工单按契约不移动,以原始起止进入排他表,
    /// 与普通工单一样参与后续的排他与前序判定
    pub fn place_fixed(&mut self, order: &WorkOrder) -> ChangeRecord {
        self.commit(order.work_order_no.clone(), order.start, order.end);

        tracing::debug!(
            work_order_no = %order.work_order_no,
            start = %order.start,
            end = %order.end,
            "维修工单原位放置"
        );

        ChangeRecord::build(
            order.work_order_no.clone(),
            order.start,
            order.end,
            order.start,
            order.end,
            ChangeReason::FixedMaintenance,
        )
    }

    // ==========================================
    // 可移动工单放置
    // ==========================================

    /// 为可移动工单求最早可行位置并提交
    ///
    /// 算法:
    /// 1. 下限取 max(原计划开始, 各前序完工时刻)
    /// 2. 冲突推进: 试算结束时刻,与已放置区间或检修窗口
    ///    重叠则把下限推到占用方右端点,重试
    /// 3. 起点吸附到最早工作时刻;吸附若移动了起点,回到第 2 步复验
    /// 4. 按工作日历计算结束时刻并提交
    pub fn place_movable(&mut self, order: &WorkOrder) -> EngineResult<ChangeRecord> {
        let original_start = order.start;
        let original_end = order.end;

        // ----- Step 1: 前序完工下限 -----
        let mut floor = original_start;
        for predecessor_no in &order.depends_on {
            let end = self.scheduled_end(predecessor_no).ok_or_else(|| {
                // 线性化应当已排除该情形
                EngineError::Internal(format!(
                    "前序工单尚未放置: {} (工单 {})",
                    predecessor_no, order.work_order_no
                ))
            })?;
            if end > floor {
                floor = end;
            }
        }

        // ----- Step 2/3: 冲突推进 + 起点吸附复验 -----
        // 每轮下限严格右移,占用方右端点与吸附结果有限,必然终止
        let mut candidate = floor;
        let (new_start, new_end) = loop {
            let tentative_end = self
                .calendar
                .end_of_work(candidate, order.duration_minutes)?;

            if let Some(blocking) = self.find_placed_conflict(candidate, tentative_end) {
                candidate = blocking.end;
                continue;
            }
            if let Some(window) = self.find_window_conflict(candidate, tentative_end) {
                candidate = window.end;
                continue;
            }

            let snapped = self.calendar.next_working(candidate)?;
            if snapped != candidate {
                candidate = snapped;
                continue;
            }

            break (candidate, tentative_end);
        };

        // ----- Step 4: 原因分类 + 提交 -----
        let reason = if new_start == original_start && new_end == original_end {
            ChangeReason::NoChange
        } else {
            self.classify_displacement(order)
        };

        self.commit(order.work_order_no.clone(), new_start, new_end);

        if reason.is_displacement() {
            tracing::debug!(
                work_order_no = %order.work_order_no,
                original_start = %original_start,
                new_start = %new_start,
                reason = %reason,
                "工单发生位移"
            );
        }

        Ok(ChangeRecord::build(
            order.work_order_no.clone(),
            original_start,
            original_end,
            new_start,
            new_end,
            reason,
        ))
    }

    /// 查询某工单的已排结束时刻
    pub fn scheduled_end(&self, work_order_no: &str) -> Option<NaiveDateTime> {
        self.index_by_no
            .get(work_order_no)
            .map(|&idx| self.placed[idx].end)
    }

    // ==========================================
    // 原因分类
    // ==========================================

    /// 对已确认发生位移的工单判定主导原因
    ///
    /// 优先级 (命中即返回):
    /// 1) 某前序完工时刻严格晚于原计划开始 → predecessor (取完工最晚者)
    /// 2) 原计划区间与某已放置区间重叠 → center_busy (取放置顺序最先者)
    /// 3) 原计划区间与某检修窗口重叠 → maintenance_window
    /// 4) 兜底 → no_change (仅因班次吸附产生的位移不单独分类)
    fn classify_displacement(&self, order: &WorkOrder) -> ChangeReason {
        // 1) 前序
        let mut latest: Option<(&str, NaiveDateTime)> = None;
        for predecessor_no in &order.depends_on {
            if let Some(end) = self.scheduled_end(predecessor_no) {
                if end > order.start {
                    let is_later = latest.map_or(true, |(_, latest_end)| end > latest_end);
                    if is_later {
                        latest = Some((predecessor_no.as_str(), end));
                    }
                }
            }
        }
        if let Some((predecessor_no, _)) = latest {
            return ChangeReason::Predecessor {
                predecessor_no: predecessor_no.to_string(),
            };
        }

        // 2) 排他
        if let Some(blocking) = self.find_placed_conflict(order.start, order.end) {
            return ChangeReason::CenterBusy {
                blocking_order_no: blocking.work_order_no.clone(),
            };
        }

        // 3) 检修窗口 (此处沿用开区间比较口径)
        if let Some(window) = self.find_window_conflict(order.start, order.end) {
            return ChangeReason::MaintenanceWindow {
                window_start: window.start,
                window_end: window.end,
            };
        }

        // 4) 兜底
        ChangeReason::NoChange
    }

    // ==========================================
    // 内部: 重叠检测与提交
    // ==========================================

    /// [start, end) 与已放置区间的首个重叠 (按放置顺序)
    ///
    /// 端点相接 (start == 对方 end) 不算重叠
    fn find_placed_conflict(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<&PlacedInterval> {
        self.placed
            .iter()
            .find(|p| start < p.end && end > p.start)
    }

    /// [start, end) 与检修窗口的首个重叠 (按输入顺序,开区间比较)
    fn find_window_conflict(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<&MaintenanceWindow> {
        self.windows
            .iter()
            .find(|w| start < w.end && end > w.start)
    }

    /// 把区间写入排他表
    fn commit(&mut self, work_order_no: String, start: NaiveDateTime, end: NaiveDateTime) {
        self.index_by_no
            .insert(work_order_no.clone(), self.placed.len());
        self.placed.push(PlacedInterval {
            work_order_no,
            start,
            end,
        });
    }
}
