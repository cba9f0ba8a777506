// ==========================================
// 生产工单重排系统 - 引擎层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// 红线: 失败即整次调用失败,不返回部分排产结果
// ==========================================

use chrono::NaiveDateTime;
use thiserror::Error;

/// 引擎层错误类型
///
/// 每个变体都携带足以定位问题输入的标识符;
/// 引擎内部不做重试,由调用方修正输入后重新调用
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 输入合法性错误 =====
    #[error("输入数据非法 (工单 {work_order_no}): {message}")]
    InputInvalid {
        work_order_no: String,
        message: String,
    },

    #[error("工单不属于工作中心 {work_center}: {offenders:?}")]
    ForeignOrder {
        work_center: String,
        offenders: Vec<String>,
    },

    // ===== 依赖图错误 =====
    #[error("前序工单缺失 (工作中心 {work_center}): {missing:?}")]
    MissingPredecessor {
        work_center: String,
        missing: Vec<String>,
    },

    #[error("依赖图存在环 (工作中心 {work_center}): {members:?}")]
    Cycle {
        work_center: String,
        members: Vec<String>,
    },

    // ===== 日历错误 =====
    #[error("工作中心 {work_center} 自 {from} 起找不到可用工作时间: {detail}")]
    NoWorkingTime {
        work_center: String,
        from: NaiveDateTime,
        detail: String,
    },

    #[error("工作中心没有任何班次: {work_center}")]
    NoShifts { work_center: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
