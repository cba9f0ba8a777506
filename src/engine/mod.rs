// ==========================================
// 生产工单重排系统 - 引擎层
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 1.2 模块拆分
// ==========================================
// 职责: 实现重排业务规则
// 红线: 所有位移必须输出带标签的原因
// 红线: 引擎单线程同步,C1 为纯函数,无共享可变状态
// ==========================================

pub mod calendar;
pub mod error;
pub mod linearizer;
pub mod placer;
pub mod recalc;

// 重导出核心引擎
pub use calendar::CalendarEngine;
pub use error::{EngineError, EngineResult};
pub use linearizer::DependencyLinearizer;
pub use placer::OrderPlacer;
pub use recalc::{RecalcEngine, RecalcResult, RecalcSummary};
