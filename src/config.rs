// ==========================================
// 生产工单重排系统 - 引擎配置
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 3.3 遍历保护阈值
// ==========================================

use serde::{Deserialize, Serialize};

/// 引擎可调参数 (由调用方构造并注入,不做持久化)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 可用工作时间的搜索视界 (天)
    ///
    /// next_working 自起点向后搜索的上限,超出即判定 no_working_time
    #[serde(default = "default_search_horizon_days")]
    pub search_horizon_days: i64,

    /// 工时推进的安全上限 (墙钟分钟)
    ///
    /// end_of_work 的逐分钟游标最多推进该数量,超出即判定 no_working_time
    /// (防止停机窗口配置错误导致的死循环)
    #[serde(default = "default_traversal_cap_minutes")]
    pub traversal_cap_minutes: i64,
}

fn default_search_horizon_days() -> i64 {
    30
}

fn default_traversal_cap_minutes() -> i64 {
    10_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_horizon_days: default_search_horizon_days(),
            traversal_cap_minutes: default_traversal_cap_minutes(),
        }
    }
}
