// ==========================================
// 生产工单重排系统 - 导入模块错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 记录解析错误 =====
    #[error("JSON 解析失败 (行 {line}): {message}")]
    JsonParseError { line: usize, message: String },

    #[error("未知文档类型 (行 {line}): {doc_type}")]
    UnknownDocType { line: usize, doc_type: String },

    #[error("日期格式错误 (行 {line}, 字段 {field}): 期望 ISO-8601,实际 {value}")]
    DateFormatError {
        line: usize,
        field: String,
        value: String,
    },

    #[error("字段值错误 (行 {line}, 字段 {field}): {message}")]
    FieldValueError {
        line: usize,
        field: String,
        message: String,
    },

    // ===== 归组错误 =====
    #[error("工单引用了不在本次输入中的工作中心: {offenders:?}")]
    UnknownWorkCenter { offenders: Vec<String> },

    #[error("工作中心名称重复: {0}")]
    DuplicateWorkCenter(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
