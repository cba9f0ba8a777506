// ==========================================
// 生产工单重排系统 - 依赖线性化引擎
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 4. 依赖线性化
// 参考: Kahn 拓扑排序 (入度初始化 → 零入度队列 → 出队松弛)
// ==========================================
// 职责: 将工单集线性化,保证任何工单不早于其前序出现
// 输入: 单一工作中心的工单集
// 输出: 输入下标的一个排列; 平局按输入顺序决出 (可复现)
// 复杂度: O(V + E),无递归深度依赖
// ==========================================

use crate::domain::WorkOrder;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::{BTreeSet, HashMap, VecDeque};

// ==========================================
// DependencyLinearizer - 依赖线性化引擎
// ==========================================
pub struct DependencyLinearizer {
    // 无状态引擎,不需要注入依赖
}

impl DependencyLinearizer {
    pub fn new() -> Self {
        Self {}
    }

    /// 对工单集做拓扑排序
    ///
    /// # 参数
    /// - `work_center`: 工作中心名称 (仅用于错误定位)
    /// - `orders`: 工单集
    ///
    /// # 返回
    /// - `Ok(Vec<usize>)`: 输入下标的排列,前序恒在后继之前
    /// - `Err(MissingPredecessor)`: 某前序工单号不在输入集内,列出全部缺失号
    /// - `Err(Cycle)`: 不存在完整线性化,列出算法结束后仍有非零入度的工单号
    pub fn linearize(
        &self,
        work_center: &str,
        orders: &[WorkOrder],
    ) -> EngineResult<Vec<usize>> {
        // ===== Step 1: 建号→下标索引 =====
        let mut index_by_no: HashMap<&str, usize> = HashMap::with_capacity(orders.len());
        for (idx, order) in orders.iter().enumerate() {
            index_by_no.insert(order.work_order_no.as_str(), idx);
        }

        // ===== Step 2: 校验前序引用,建邻接表与入度 =====
        let mut missing: BTreeSet<String> = BTreeSet::new();
        let mut in_degree: Vec<usize> = vec![0; orders.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); orders.len()];

        for (idx, order) in orders.iter().enumerate() {
            for predecessor_no in &order.depends_on {
                match index_by_no.get(predecessor_no.as_str()) {
                    Some(&pred_idx) => {
                        successors[pred_idx].push(idx);
                        in_degree[idx] += 1;
                    }
                    None => {
                        missing.insert(predecessor_no.clone());
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(EngineError::MissingPredecessor {
                work_center: work_center.to_string(),
                missing: missing.into_iter().collect(),
            });
        }

        // ===== Step 3: Kahn 主循环 (零入度按输入顺序入队) =====
        let mut queue: VecDeque<usize> = (0..orders.len())
            .filter(|&idx| in_degree[idx] == 0)
            .collect();
        let mut linearized: Vec<usize> = Vec::with_capacity(orders.len());

        while let Some(idx) = queue.pop_front() {
            linearized.push(idx);
            for &succ_idx in &successors[idx] {
                in_degree[succ_idx] -= 1;
                if in_degree[succ_idx] == 0 {
                    queue.push_back(succ_idx);
                }
            }
        }

        // ===== Step 4: 环检测 (残留非零入度即成环或被环可达) =====
        if linearized.len() < orders.len() {
            let members: Vec<String> = orders
                .iter()
                .enumerate()
                .filter(|(idx, _)| in_degree[*idx] > 0)
                .map(|(_, order)| order.work_order_no.clone())
                .collect();
            return Err(EngineError::Cycle {
                work_center: work_center.to_string(),
                members,
            });
        }

        Ok(linearized)
    }
}

impl Default for DependencyLinearizer {
    fn default() -> Self {
        Self::new()
    }
}
