// ==========================================
// 导入层测试
// ==========================================
// 职责: 验证 JSONL 输入流解析与按工作中心归组
// ==========================================

use std::io::Cursor;
use workorder_replan::domain::OrderKind;
use workorder_replan::importer::{self, ImportError, StreamParser};

// ==========================================
// 测试辅助函数
// ==========================================

fn parse(input: &str) -> Result<workorder_replan::importer::ImportedBundle, ImportError> {
    StreamParser::new().parse(Cursor::new(input))
}

fn sample_center_line() -> &'static str {
    r#"{"docId":"wc-1","docType":"workCenter","data":{"name":"A","shifts":[{"dayOfWeek":1,"startHour":8,"endHour":17}],"maintenanceWindows":[{"startDate":"2026-01-14T10:00:00","endDate":"2026-01-14T13:00:00","reason":"电机检修"}]}}"#
}

fn sample_order_line() -> &'static str {
    r#"{"docId":"wo-1","docType":"workOrder","data":{"workOrderNumber":"001","manufacturingOrderId":"MO-9","workCenterId":"A","startDate":"2026-01-12T08:00:00","endDate":"2026-01-12T11:00:00","durationMinutes":180,"isMaintenance":false,"dependsOnWorkOrderIds":["000"]}}"#
}

// ==========================================
// 测试1: 三类文档解析
// ==========================================
#[test]
fn test_parse_all_doc_types() {
    let input = format!(
        "{}\n{}\n{}\n",
        sample_center_line(),
        sample_order_line(),
        r#"{"docId":"mo-1","docType":"manufacturingOrder","data":{"id":"MO-9","description":"批次九"}}"#,
    );

    let bundle = parse(&input).expect("解析失败");

    assert_eq!(bundle.work_centers.len(), 1);
    assert_eq!(bundle.work_orders.len(), 1);
    assert_eq!(bundle.manufacturing_orders.len(), 1);

    let center = &bundle.work_centers[0];
    assert_eq!(center.name, "A");
    assert_eq!(center.shifts.len(), 1);
    assert_eq!(center.shifts[0].day_of_week, 1);
    assert_eq!(center.shifts[0].start_hour, 8);
    assert_eq!(center.shifts[0].end_hour, 17);
    assert_eq!(center.maintenance_windows.len(), 1);
    assert_eq!(
        center.maintenance_windows[0].reason.as_deref(),
        Some("电机检修")
    );

    let order = &bundle.work_orders[0];
    assert_eq!(order.work_order_no, "001");
    assert_eq!(order.manufacturing_order_id.as_deref(), Some("MO-9"));
    assert_eq!(order.work_center_id, "A");
    assert_eq!(order.duration_minutes, 180);
    assert_eq!(order.kind, OrderKind::Production);
    assert_eq!(order.depends_on, vec!["000".to_string()]);

    assert_eq!(bundle.manufacturing_orders[0].manufacturing_order_id, "MO-9");
}

// ==========================================
// 测试2: 维修标志映射为固定类别
// ==========================================
#[test]
fn test_maintenance_flag_maps_to_kind() {
    let input = r#"{"docId":"wo-2","docType":"workOrder","data":{"workOrderNumber":"M01","workCenterId":"A","startDate":"2026-01-12T10:00:00","endDate":"2026-01-12T12:00:00","durationMinutes":120,"isMaintenance":true,"dependsOnWorkOrderIds":[]}}"#;

    let bundle = parse(input).expect("解析失败");
    assert_eq!(bundle.work_orders[0].kind, OrderKind::Maintenance);
    assert!(bundle.work_orders[0].is_fixed());
}

// ==========================================
// 测试3: 空白行跳过,记录无序
// ==========================================
#[test]
fn test_blank_lines_and_unordered_records() {
    let input = format!("\n{}\n\n{}\n", sample_order_line(), sample_center_line());
    let bundle = parse(&input).expect("解析失败");
    assert_eq!(bundle.work_centers.len(), 1);
    assert_eq!(bundle.work_orders.len(), 1);
}

// ==========================================
// 测试4: 带偏移量的 ISO-8601 同样接受
// ==========================================
#[test]
fn test_rfc3339_offset_accepted() {
    let input = r#"{"docId":"wo-3","docType":"workOrder","data":{"workOrderNumber":"002","workCenterId":"A","startDate":"2026-01-12T08:00:00+08:00","endDate":"2026-01-12T09:00:00+08:00","durationMinutes":60,"isMaintenance":false,"dependsOnWorkOrderIds":[]}}"#;

    let bundle = parse(input).expect("解析失败");
    let order = &bundle.work_orders[0];
    assert_eq!(order.start.format("%H:%M").to_string(), "08:00", "应取本地民用时刻");
}

// ==========================================
// 测试5: 解析失败携带行号
// ==========================================
#[test]
fn test_parse_errors_carry_line_number() {
    // 第 2 行非法 JSON
    let input = format!("{}\n{{bad json}}\n", sample_center_line());
    match parse(&input).unwrap_err() {
        ImportError::JsonParseError { line, .. } => assert_eq!(line, 2, "应定位到第 2 行"),
        other => panic!("应返回 JSON 解析错误,实际: {:?}", other),
    }

    // 未知文档类型
    let input = r#"{"docId":"x","docType":"unknownThing","data":{}}"#;
    match parse(input).unwrap_err() {
        ImportError::UnknownDocType { doc_type, .. } => assert_eq!(doc_type, "unknownThing"),
        other => panic!("应返回未知文档类型,实际: {:?}", other),
    }

    // 日期格式错误
    let input = r#"{"docId":"wo","docType":"workOrder","data":{"workOrderNumber":"001","workCenterId":"A","startDate":"not-a-date","endDate":"2026-01-12T09:00:00","durationMinutes":60,"isMaintenance":false,"dependsOnWorkOrderIds":[]}}"#;
    match parse(input).unwrap_err() {
        ImportError::DateFormatError { field, .. } => assert_eq!(field, "startDate"),
        other => panic!("应返回日期格式错误,实际: {:?}", other),
    }
}

// ==========================================
// 测试6: 字段取值校验
// ==========================================
#[test]
fn test_field_value_validation() {
    // 星期越界
    let input = r#"{"docId":"wc","docType":"workCenter","data":{"name":"A","shifts":[{"dayOfWeek":7,"startHour":8,"endHour":17}],"maintenanceWindows":[]}}"#;
    assert!(
        matches!(parse(input).unwrap_err(), ImportError::FieldValueError { .. }),
        "dayOfWeek=7 应拒绝"
    );

    // 非正工时
    let input = r#"{"docId":"wo","docType":"workOrder","data":{"workOrderNumber":"001","workCenterId":"A","startDate":"2026-01-12T08:00:00","endDate":"2026-01-12T09:00:00","durationMinutes":0,"isMaintenance":false,"dependsOnWorkOrderIds":[]}}"#;
    assert!(
        matches!(parse(input).unwrap_err(), ImportError::FieldValueError { .. }),
        "durationMinutes=0 应拒绝"
    );

    // 结束早于开始
    let input = r#"{"docId":"wo","docType":"workOrder","data":{"workOrderNumber":"001","workCenterId":"A","startDate":"2026-01-12T09:00:00","endDate":"2026-01-12T08:00:00","durationMinutes":60,"isMaintenance":false,"dependsOnWorkOrderIds":[]}}"#;
    assert!(
        matches!(parse(input).unwrap_err(), ImportError::FieldValueError { .. }),
        "结束早于开始应拒绝"
    );
}

// ==========================================
// 测试7: 按工作中心归组
// ==========================================
#[test]
fn test_group_by_center() {
    let input = r#"{"docId":"wc-1","docType":"workCenter","data":{"name":"A","shifts":[{"dayOfWeek":1,"startHour":8,"endHour":17}],"maintenanceWindows":[]}}
{"docId":"wc-2","docType":"workCenter","data":{"name":"B","shifts":[{"dayOfWeek":1,"startHour":6,"endHour":14}],"maintenanceWindows":[]}}
{"docId":"wo-1","docType":"workOrder","data":{"workOrderNumber":"001","workCenterId":"B","startDate":"2026-01-12T08:00:00","endDate":"2026-01-12T09:00:00","durationMinutes":60,"isMaintenance":false,"dependsOnWorkOrderIds":[]}}
{"docId":"wo-2","docType":"workOrder","data":{"workOrderNumber":"002","workCenterId":"A","startDate":"2026-01-12T08:00:00","endDate":"2026-01-12T09:00:00","durationMinutes":60,"isMaintenance":false,"dependsOnWorkOrderIds":[]}}
{"docId":"wo-3","docType":"workOrder","data":{"workOrderNumber":"003","workCenterId":"B","startDate":"2026-01-12T09:00:00","endDate":"2026-01-12T10:00:00","durationMinutes":60,"isMaintenance":false,"dependsOnWorkOrderIds":[]}}
"#;

    let bundle = parse(input).expect("解析失败");
    let groups = importer::group_by_center(bundle).expect("归组失败");

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0.name, "A", "工作中心保持输入顺序");
    assert_eq!(groups[1].0.name, "B");

    let a_nos: Vec<&str> = groups[0].1.iter().map(|o| o.work_order_no.as_str()).collect();
    let b_nos: Vec<&str> = groups[1].1.iter().map(|o| o.work_order_no.as_str()).collect();
    assert_eq!(a_nos, vec!["002"]);
    assert_eq!(b_nos, vec!["001", "003"], "组内工单保持输入顺序");
}

// ==========================================
// 测试8: 引用未知工作中心即整体失败
// ==========================================
#[test]
fn test_unknown_work_center_fails_import() {
    let input = r#"{"docId":"wc-1","docType":"workCenter","data":{"name":"A","shifts":[{"dayOfWeek":1,"startHour":8,"endHour":17}],"maintenanceWindows":[]}}
{"docId":"wo-1","docType":"workOrder","data":{"workOrderNumber":"001","workCenterId":"Z","startDate":"2026-01-12T08:00:00","endDate":"2026-01-12T09:00:00","durationMinutes":60,"isMaintenance":false,"dependsOnWorkOrderIds":[]}}
"#;

    let bundle = parse(input).expect("解析失败");
    match importer::group_by_center(bundle).unwrap_err() {
        ImportError::UnknownWorkCenter { offenders } => {
            assert_eq!(offenders, vec!["001".to_string()], "应列出越界工单号");
        }
        other => panic!("应返回未知工作中心错误,实际: {:?}", other),
    }
}

// ==========================================
// 测试9: 文件不存在
// ==========================================
#[test]
fn test_missing_file() {
    let err = importer::load_jsonl(std::path::Path::new("/no/such/file.jsonl")).unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)), "应返回文件不存在");
}
