// ==========================================
// 生产工单重排系统 - 导入层
// ==========================================
// 职责: 解析外部输入流,按工作中心归组工单
// 红线: 引擎只消费已定型实体,解析与归组不进入引擎层
// ==========================================

pub mod error;
pub mod stream_parser;

pub use error::{ImportError, ImportResult};
pub use stream_parser::{ImportedBundle, StreamParser};

use crate::domain::{WorkCenter, WorkOrder};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 读取并解析 JSONL 输入文件
pub fn load_jsonl(path: &Path) -> ImportResult<ImportedBundle> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    StreamParser::new().parse(BufReader::new(file))
}

/// 将工单按工作中心归组
///
/// 工作中心与工单都保持输入出现顺序;
/// 引用了未知工作中心的工单会使整次导入失败
pub fn group_by_center(
    bundle: ImportedBundle,
) -> ImportResult<Vec<(WorkCenter, Vec<WorkOrder>)>> {
    let mut index_by_name: HashMap<String, usize> =
        HashMap::with_capacity(bundle.work_centers.len());
    let mut groups: Vec<(WorkCenter, Vec<WorkOrder>)> =
        Vec::with_capacity(bundle.work_centers.len());

    for center in bundle.work_centers {
        if index_by_name.contains_key(&center.name) {
            return Err(ImportError::DuplicateWorkCenter(center.name));
        }
        index_by_name.insert(center.name.clone(), groups.len());
        groups.push((center, Vec::new()));
    }

    let mut offenders: Vec<String> = Vec::new();
    for order in bundle.work_orders {
        match index_by_name.get(&order.work_center_id) {
            Some(&idx) => groups[idx].1.push(order),
            None => offenders.push(order.work_order_no),
        }
    }

    if !offenders.is_empty() {
        return Err(ImportError::UnknownWorkCenter { offenders });
    }

    Ok(groups)
}
