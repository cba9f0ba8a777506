// ==========================================
// 生产工单重排系统 - 核心库
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 系统总览
// 技术栈: Rust + chrono + serde
// 系统定位: 扰动后重新计算可行排产 (非优化器)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎参数
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 报表层 - 标准输出报表
pub mod report;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DocType, OrderKind};

// 领域实体
pub use domain::{
    ChangeReason, ChangeRecord, MaintenanceWindow, ManufacturingOrder, Shift, WorkCenter,
    WorkOrder,
};

// 引擎
pub use engine::{
    CalendarEngine, DependencyLinearizer, EngineError, EngineResult, OrderPlacer, RecalcEngine,
    RecalcResult, RecalcSummary,
};

// 配置
pub use config::EngineConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产工单重排系统";

// ==========================================
// 预编译检查
// ==========================================
