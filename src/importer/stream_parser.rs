// ==========================================
// 生产工单重排系统 - 输入流解析器
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 9.1 输入流契约
// 格式: 按行分隔的 JSON,每行 { docId, docType, data }
// 注: 流内记录无序,时刻为 ISO-8601 字符串
// ==========================================

use crate::domain::{
    DocType, MaintenanceWindow, ManufacturingOrder, OrderKind, Shift, WorkCenter, WorkOrder,
};
use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use std::io::BufRead;

// ==========================================
// 外层记录
// ==========================================
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDoc {
    doc_id: String,
    doc_type: String,
    data: serde_json::Value,
}

// ==========================================
// 工作中心载荷
// ==========================================
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkCenterPayload {
    name: String,
    #[serde(default)]
    shifts: Vec<ShiftPayload>,
    #[serde(default)]
    maintenance_windows: Vec<MaintenanceWindowPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShiftPayload {
    day_of_week: u8,
    start_hour: u8,
    end_hour: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaintenanceWindowPayload {
    start_date: String,
    end_date: String,
    #[serde(default)]
    reason: Option<String>,
}

// ==========================================
// 工单载荷
// ==========================================
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkOrderPayload {
    work_order_number: String,
    #[serde(default)]
    manufacturing_order_id: Option<String>,
    work_center_id: String,
    start_date: String,
    end_date: String,
    duration_minutes: i64,
    #[serde(default)]
    is_maintenance: bool,
    #[serde(default)]
    depends_on_work_order_ids: Vec<String>,
}

// ==========================================
// 制造订单载荷 (宽松解析,仅报表口径使用)
// ==========================================
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManufacturingOrderPayload {
    #[serde(default, alias = "manufacturingOrderId")]
    id: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

// ==========================================
// 解析产物
// ==========================================
#[derive(Debug, Default)]
pub struct ImportedBundle {
    pub work_centers: Vec<WorkCenter>,
    pub work_orders: Vec<WorkOrder>,
    pub manufacturing_orders: Vec<ManufacturingOrder>,
}

// ==========================================
// StreamParser - 输入流解析器
// ==========================================
pub struct StreamParser {
    // 无状态解析器
}

impl StreamParser {
    pub fn new() -> Self {
        Self {}
    }

    /// 解析按行分隔的 JSON 输入流
    ///
    /// # 返回
    /// - `Ok(ImportedBundle)`: 按记录出现顺序收集的已定型实体
    /// - `Err`: 任何一行解析失败即整体失败 (行号随错误返回)
    pub fn parse<R: BufRead>(&self, reader: R) -> ImportResult<ImportedBundle> {
        let mut bundle = ImportedBundle::default();

        for (line_idx, line_result) in reader.lines().enumerate() {
            let line_no = line_idx + 1;
            let line = line_result?;
            let trimmed = line.trim();

            // 跳过空白行
            if trimmed.is_empty() {
                continue;
            }

            let doc: RawDoc =
                serde_json::from_str(trimmed).map_err(|e| ImportError::JsonParseError {
                    line: line_no,
                    message: e.to_string(),
                })?;

            let doc_type = match doc.doc_type.as_str() {
                "workCenter" => DocType::WorkCenter,
                "workOrder" => DocType::WorkOrder,
                "manufacturingOrder" => DocType::ManufacturingOrder,
                other => {
                    return Err(ImportError::UnknownDocType {
                        line: line_no,
                        doc_type: other.to_string(),
                    });
                }
            };

            match doc_type {
                DocType::WorkCenter => {
                    let payload: WorkCenterPayload = serde_json::from_value(doc.data)
                        .map_err(|e| ImportError::JsonParseError {
                            line: line_no,
                            message: e.to_string(),
                        })?;
                    bundle
                        .work_centers
                        .push(self.convert_work_center(line_no, payload)?);
                }
                DocType::WorkOrder => {
                    let payload: WorkOrderPayload = serde_json::from_value(doc.data)
                        .map_err(|e| ImportError::JsonParseError {
                            line: line_no,
                            message: e.to_string(),
                        })?;
                    bundle
                        .work_orders
                        .push(self.convert_work_order(line_no, payload)?);
                }
                DocType::ManufacturingOrder => {
                    let payload: ManufacturingOrderPayload = serde_json::from_value(doc.data)
                        .map_err(|e| ImportError::JsonParseError {
                            line: line_no,
                            message: e.to_string(),
                        })?;
                    bundle.manufacturing_orders.push(ManufacturingOrder {
                        manufacturing_order_id: payload.id.unwrap_or_else(|| doc.doc_id.clone()),
                        description: payload.description,
                    });
                }
            }
        }

        tracing::info!(
            work_centers = bundle.work_centers.len(),
            work_orders = bundle.work_orders.len(),
            manufacturing_orders = bundle.manufacturing_orders.len(),
            "输入流解析完成"
        );

        Ok(bundle)
    }

    // ==========================================
    // 载荷 → 领域实体
    // ==========================================

    fn convert_work_center(
        &self,
        line: usize,
        payload: WorkCenterPayload,
    ) -> ImportResult<WorkCenter> {
        let mut center = WorkCenter::new(payload.name);

        for shift in payload.shifts {
            if shift.day_of_week > 6 {
                return Err(ImportError::FieldValueError {
                    line,
                    field: "dayOfWeek".to_string(),
                    message: format!("取值必须在 0..6: {}", shift.day_of_week),
                });
            }
            if shift.start_hour > 23 || shift.end_hour > 23 {
                return Err(ImportError::FieldValueError {
                    line,
                    field: "startHour/endHour".to_string(),
                    message: format!("取值必须在 0..23: {}-{}", shift.start_hour, shift.end_hour),
                });
            }
            center
                .shifts
                .push(Shift::new(shift.day_of_week, shift.start_hour, shift.end_hour));
        }

        for window in payload.maintenance_windows {
            let start = parse_instant(&window.start_date).ok_or_else(|| {
                ImportError::DateFormatError {
                    line,
                    field: "startDate".to_string(),
                    value: window.start_date.clone(),
                }
            })?;
            let end = parse_instant(&window.end_date).ok_or_else(|| {
                ImportError::DateFormatError {
                    line,
                    field: "endDate".to_string(),
                    value: window.end_date.clone(),
                }
            })?;
            if end < start {
                return Err(ImportError::FieldValueError {
                    line,
                    field: "endDate".to_string(),
                    message: format!("检修窗口结束早于开始: {} < {}", end, start),
                });
            }
            center.maintenance_windows.push(MaintenanceWindow {
                start,
                end,
                reason: window.reason,
            });
        }

        Ok(center)
    }

    fn convert_work_order(
        &self,
        line: usize,
        payload: WorkOrderPayload,
    ) -> ImportResult<WorkOrder> {
        let start = parse_instant(&payload.start_date).ok_or_else(|| {
            ImportError::DateFormatError {
                line,
                field: "startDate".to_string(),
                value: payload.start_date.clone(),
            }
        })?;
        let end = parse_instant(&payload.end_date).ok_or_else(|| {
            ImportError::DateFormatError {
                line,
                field: "endDate".to_string(),
                value: payload.end_date.clone(),
            }
        })?;

        if payload.duration_minutes <= 0 {
            return Err(ImportError::FieldValueError {
                line,
                field: "durationMinutes".to_string(),
                message: format!("工时必须为正: {}", payload.duration_minutes),
            });
        }
        if end < start {
            return Err(ImportError::FieldValueError {
                line,
                field: "endDate".to_string(),
                message: format!("结束早于开始: {} < {}", end, start),
            });
        }

        Ok(WorkOrder {
            work_order_no: payload.work_order_number,
            manufacturing_order_id: payload.manufacturing_order_id,
            work_center_id: payload.work_center_id,
            start,
            end,
            duration_minutes: payload.duration_minutes,
            kind: OrderKind::from_maintenance_flag(payload.is_maintenance),
            depends_on: payload.depends_on_work_order_ids,
        })
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析 ISO-8601 时刻字符串
///
/// 先按无时区的本地时刻解析,再退回带偏移量的 RFC3339
/// (输入约定锚定在工作中心本地民用时间)
fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    None
}
