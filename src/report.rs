// ==========================================
// 生产工单重排系统 - 重排报表渲染
// ==========================================
// 职责: 把引擎结果渲染为人类可读的标准输出报表
// 红线: 报表是展示层,行为以变更记录的标签与负载为准
// ==========================================

use crate::domain::ChangeReason;
use crate::engine::RecalcResult;
use std::fmt::Write as _;

const LINE_HEAVY: &str = "==================================================";
const LINE_LIGHT: &str = "--------------------------------------------------";

// ==========================================
// ReportRenderer - 报表渲染器
// ==========================================
pub struct ReportRenderer {
    // 无状态渲染器
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// 渲染多个工作中心的重排结果
    pub fn render(&self, results: &[RecalcResult]) -> String {
        let mut out = String::new();

        for result in results {
            self.render_center(&mut out, result);
        }
        self.render_totals(&mut out, results);

        out
    }

    /// 单个工作中心的明细段
    fn render_center(&self, out: &mut String, result: &RecalcResult) {
        let _ = writeln!(out, "{}", LINE_HEAVY);
        let _ = writeln!(out, "工作中心: {}  (运行 {})", result.work_center, result.run_id);
        let _ = writeln!(out, "{}", LINE_LIGHT);

        for change in &result.changes {
            let marker = match &change.reason {
                ChangeReason::FixedMaintenance => "[维修]",
                ChangeReason::NoChange if !change.is_changed() => "[不变]",
                _ => "[变更]",
            };

            let _ = writeln!(
                out,
                "  {} {}  {} ~ {}  →  {} ~ {}  ({:+} 分钟)",
                marker,
                change.work_order_no,
                change.original_start,
                change.original_end,
                change.new_start,
                change.new_end,
                change.displacement_minutes,
            );
            if change.is_changed() || change.reason == ChangeReason::FixedMaintenance {
                let _ = writeln!(
                    out,
                    "         原因: {} - {}",
                    change.reason.tag(),
                    change.explanation
                );
            }
        }

        let s = &result.summary;
        let _ = writeln!(out, "{}", LINE_LIGHT);
        let _ = writeln!(
            out,
            "  合计 {} 个工单: 变更 {} / 不变 {} / 维修固定 {}; 累计后移 {} 分钟 (耗时 {} ms)",
            s.total, s.changed, s.unchanged, s.fixed, s.displaced_minutes_total, result.elapsed_ms,
        );
    }

    /// 跨中心的汇总段
    fn render_totals(&self, out: &mut String, results: &[RecalcResult]) {
        let centers = results.len();
        let total: usize = results.iter().map(|r| r.summary.total).sum();
        let changed: usize = results.iter().map(|r| r.summary.changed).sum();
        let displaced: i64 = results
            .iter()
            .map(|r| r.summary.displaced_minutes_total)
            .sum();

        let _ = writeln!(out, "{}", LINE_HEAVY);
        let _ = writeln!(
            out,
            "重排结束: {} 个工作中心 / {} 个工单, 其中 {} 个发生位移, 累计后移 {} 分钟",
            centers, total, changed, displaced,
        );
        let _ = writeln!(out, "{}", LINE_HEAVY);
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}
