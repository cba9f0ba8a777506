// ==========================================
// 生产工单重排系统 - 重排引擎 (单工作中心编排)
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 6. 重排编排
// ==========================================
// 职责: 校验输入归属 → 拆分固定/可移动 → 线性化 → 逐单放置 → 汇总
// 输入: 工作中心 + 该中心的工单集 (输入记录只读)
// 输出: 新工单记录 (按输入原始顺序) + 变更记录 + 汇总统计
// ==========================================
// 红线: 任何失败即整次调用失败,不返回部分排产结果
// 红线: 引擎不做优化 (不压缩总工期,不跨中心协调)
// ==========================================

use crate::config::EngineConfig;
use crate::domain::{ChangeReason, ChangeRecord, WorkCenter, WorkOrder};
use crate::engine::calendar::CalendarEngine;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::linearizer::DependencyLinearizer;
use crate::engine::placer::OrderPlacer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use uuid::Uuid;

// ==========================================
// RecalcSummary - 重排汇总统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcSummary {
    pub total: usize,                    // 工单总数
    pub changed: usize,                  // 发生位移的工单数
    pub unchanged: usize,                // 原计划可行的工单数
    pub fixed: usize,                    // 维修固定工单数
    pub displaced_minutes_total: i64,    // 正向位移分钟合计
}

// ==========================================
// RecalcResult - 重排结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalcResult {
    pub run_id: Uuid,                    // 本次重排运行ID
    pub work_center: String,             // 工作中心名称
    pub scheduled_orders: Vec<WorkOrder>, // 排产后的新工单记录 (输入原始顺序)
    pub changes: Vec<ChangeRecord>,      // 变更记录 (输入原始顺序)
    pub summary: RecalcSummary,          // 汇总统计
    pub elapsed_ms: i64,                 // 耗时(毫秒)
}

// ==========================================
// RecalcEngine - 重排引擎
// ==========================================
pub struct RecalcEngine {
    config: EngineConfig,
}

impl RecalcEngine {
    /// 以默认配置构造重排引擎
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// 以指定配置构造重排引擎
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 对单一工作中心执行重排
    ///
    /// # 参数
    /// - `center`: 工作中心 (本次调用内只读)
    /// - `orders`: 分配到该中心的工单集 (只读,结果以新记录输出)
    ///
    /// # 返回
    /// - `Ok(RecalcResult)`: 全部工单的可行排产 + 变更解释
    /// - `Err`: 任一校验或放置失败,无部分结果
    pub fn execute_recalc(
        &self,
        center: &WorkCenter,
        orders: &[WorkOrder],
    ) -> EngineResult<RecalcResult> {
        let started = Instant::now();
        let run_id = Uuid::new_v4();

        tracing::info!(
            run_id = %run_id,
            work_center = %center.name,
            order_count = orders.len(),
            "开始重排"
        );

        // ===== Step 1: 输入校验 =====
        self.validate_inputs(center, orders)?;

        // ===== Step 2: 构造日历引擎 (班次缺失在此失败) =====
        let calendar = CalendarEngine::new(center, &self.config)?;

        // ===== Step 3: 先放置维修固定工单 =====
        // 固定工单原位进入排他表,与普通工单一样参与前序判定
        let mut placer = OrderPlacer::new(&calendar, &center.maintenance_windows);
        let mut change_slots: Vec<Option<ChangeRecord>> = vec![None; orders.len()];

        for (idx, order) in orders.iter().enumerate() {
            if order.is_fixed() {
                change_slots[idx] = Some(placer.place_fixed(order));
            }
        }

        // ===== Step 4: 全集线性化 (固定工单一并参与,保证跨类前序成立) =====
        let linearizer = DependencyLinearizer::new();
        let linearized = linearizer.linearize(&center.name, orders)?;

        // ===== Step 5: 沿线性化放置可移动工单 =====
        for &idx in &linearized {
            let order = &orders[idx];
            if order.is_fixed() {
                continue; // 已于 Step 3 原位放置
            }
            change_slots[idx] = Some(placer.place_movable(order)?);
        }

        // ===== Step 6: 按输入原始顺序装配结果 =====
        let mut scheduled_orders = Vec::with_capacity(orders.len());
        let mut changes = Vec::with_capacity(orders.len());
        for (idx, order) in orders.iter().enumerate() {
            let change = change_slots[idx].take().ok_or_else(|| {
                EngineError::Internal(format!("工单缺少放置结果: {}", order.work_order_no))
            })?;
            scheduled_orders.push(order.rescheduled(change.new_start, change.new_end));
            changes.push(change);
        }

        let summary = Self::summarize(&changes);
        let elapsed_ms = started.elapsed().as_millis() as i64;

        tracing::info!(
            run_id = %run_id,
            work_center = %center.name,
            changed = summary.changed,
            unchanged = summary.unchanged,
            fixed = summary.fixed,
            displaced_minutes_total = summary.displaced_minutes_total,
            elapsed_ms,
            "重排完成"
        );

        Ok(RecalcResult {
            run_id,
            work_center: center.name.clone(),
            scheduled_orders,
            changes,
            summary,
            elapsed_ms,
        })
    }

    // ==========================================
    // 输入校验
    // ==========================================

    /// 校验工单归属与基本合法性
    ///
    /// 检查项:
    /// 1) 每个工单的 work_center_id 必须等于中心名称 (否则 foreign_order)
    /// 2) 工单号不得重复
    /// 3) duration_minutes > 0
    /// 4) end ≥ start
    fn validate_inputs(&self, center: &WorkCenter, orders: &[WorkOrder]) -> EngineResult<()> {
        let offenders: Vec<String> = orders
            .iter()
            .filter(|o| o.work_center_id != center.name)
            .map(|o| o.work_order_no.clone())
            .collect();
        if !offenders.is_empty() {
            return Err(EngineError::ForeignOrder {
                work_center: center.name.clone(),
                offenders,
            });
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(orders.len());
        for order in orders {
            if !seen.insert(order.work_order_no.as_str()) {
                return Err(EngineError::InputInvalid {
                    work_order_no: order.work_order_no.clone(),
                    message: "工单号重复".to_string(),
                });
            }
            if order.duration_minutes <= 0 {
                return Err(EngineError::InputInvalid {
                    work_order_no: order.work_order_no.clone(),
                    message: format!("工时必须为正: {}", order.duration_minutes),
                });
            }
            if order.end < order.start {
                return Err(EngineError::InputInvalid {
                    work_order_no: order.work_order_no.clone(),
                    message: format!("结束早于开始: {} < {}", order.end, order.start),
                });
            }
        }

        Ok(())
    }

    /// 由变更记录派生汇总统计
    fn summarize(changes: &[ChangeRecord]) -> RecalcSummary {
        let mut summary = RecalcSummary {
            total: changes.len(),
            changed: 0,
            unchanged: 0,
            fixed: 0,
            displaced_minutes_total: 0,
        };

        for change in changes {
            if change.reason == ChangeReason::FixedMaintenance {
                summary.fixed += 1;
            } else if change.is_changed() {
                summary.changed += 1;
            } else {
                summary.unchanged += 1;
            }
            if change.displacement_minutes > 0 {
                summary.displaced_minutes_total += change.displacement_minutes;
            }
        }

        summary
    }
}

impl Default for RecalcEngine {
    fn default() -> Self {
        Self::new()
    }
}
