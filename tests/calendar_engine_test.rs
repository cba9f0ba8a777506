// ==========================================
// 工作日历引擎测试
// ==========================================
// 职责: 验证 is_working / next_working / end_of_work
// 场景: 班次边界 / 跨午夜班次 / 午休间隙 / 跨周末 / 检修窗口 / 安全上限
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use workorder_replan::config::EngineConfig;
use workorder_replan::domain::WorkCenter;
use workorder_replan::engine::{CalendarEngine, EngineError};

// ==========================================
// 测试辅助函数
// ==========================================

/// 构造时刻 (2026 年,分钟精度)
fn dt(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// 创建测试用工作中心: 周一至周五 08:00-17:00
fn create_weekday_center() -> WorkCenter {
    let mut center = WorkCenter::new("A");
    for day in 1..=5 {
        center = center.with_shift(day, 8, 17);
    }
    center
}

fn create_calendar(center: &WorkCenter) -> CalendarEngine {
    CalendarEngine::new(center, &EngineConfig::default()).expect("日历引擎构造失败")
}

// ==========================================
// 测试1: 班次边界 (下界含,上界不含)
// ==========================================
#[test]
fn test_shift_boundaries_half_open() {
    let calendar = create_calendar(&create_weekday_center());

    // 2026-01-12 是周一
    assert!(calendar.is_working(dt(1, 12, 8, 0)), "08:00 应在班次内");
    assert!(!calendar.is_working(dt(1, 12, 7, 59)), "07:59 应在班次外");
    assert!(calendar.is_working(dt(1, 12, 16, 59)), "16:59 应在班次内");
    assert!(!calendar.is_working(dt(1, 12, 17, 0)), "17:00 应在班次外 (上界不含)");

    // 周末无班次
    assert!(!calendar.is_working(dt(1, 17, 10, 0)), "周六应在班次外");
    assert!(!calendar.is_working(dt(1, 18, 10, 0)), "周日应在班次外");
}

// ==========================================
// 测试2: 跨午夜班次 (午夜后段归属次日)
// ==========================================
#[test]
fn test_midnight_spanning_shift() {
    // 周五 22:00 - 周六 06:00
    let center = WorkCenter::new("NIGHT").with_shift(5, 22, 6);
    let calendar = create_calendar(&center);

    // 2026-01-16 是周五, 01-17 是周六
    assert!(!calendar.is_working(dt(1, 16, 21, 59)), "周五 21:59 应在班次外");
    assert!(calendar.is_working(dt(1, 16, 22, 0)), "周五 22:00 应在班次内");
    assert!(calendar.is_working(dt(1, 16, 23, 59)), "周五 23:59 应在班次内");
    assert!(calendar.is_working(dt(1, 17, 0, 0)), "周六 00:00 应在班次内 (午夜后段)");
    assert!(calendar.is_working(dt(1, 17, 5, 59)), "周六 05:59 应在班次内");
    assert!(!calendar.is_working(dt(1, 17, 6, 0)), "周六 06:00 应在班次外 (上界不含)");

    // 午夜后段只归属班次次日,不归属班次当日清晨
    assert!(!calendar.is_working(dt(1, 16, 5, 0)), "周五清晨应在班次外");
    // 也不归属其他日
    assert!(!calendar.is_working(dt(1, 15, 23, 0)), "周四夜间应在班次外");
}

// ==========================================
// 测试3: 检修窗口 (闭区间,边界时刻停产)
// ==========================================
#[test]
fn test_maintenance_window_inclusive_bounds() {
    let center = create_weekday_center().with_maintenance(dt(1, 12, 10, 0), dt(1, 12, 13, 0));
    let calendar = create_calendar(&center);

    assert!(calendar.is_working(dt(1, 12, 9, 59)), "窗口前应可生产");
    assert!(!calendar.is_working(dt(1, 12, 10, 0)), "窗口起点应停产 (闭区间)");
    assert!(!calendar.is_working(dt(1, 12, 11, 30)), "窗口中段应停产");
    assert!(!calendar.is_working(dt(1, 12, 13, 0)), "窗口终点应停产 (闭区间)");
    assert!(calendar.is_working(dt(1, 12, 13, 1)), "窗口终点次分钟应可生产");
}

// ==========================================
// 测试4: 多日检修窗口允许互相重叠
// ==========================================
#[test]
fn test_overlapping_multi_day_windows() {
    let center = create_weekday_center()
        .with_maintenance(dt(1, 12, 12, 0), dt(1, 14, 12, 0))
        .with_maintenance(dt(1, 13, 8, 0), dt(1, 13, 17, 0));
    let calendar = create_calendar(&center);

    assert!(!calendar.is_working(dt(1, 13, 10, 0)), "双窗口重叠段应停产");
    assert!(!calendar.is_working(dt(1, 14, 11, 0)), "第一窗口尾段应停产");
    assert!(calendar.is_working(dt(1, 14, 12, 1)), "窗口结束后应可生产");
}

// ==========================================
// 测试5: next_working 吸附
// ==========================================
#[test]
fn test_next_working_snaps_forward() {
    let calendar = create_calendar(&create_weekday_center());

    // 已是工作时刻: 原样返回
    assert_eq!(calendar.next_working(dt(1, 12, 9, 0)).unwrap(), dt(1, 12, 9, 0));

    // 下班后吸附到次日开班
    assert_eq!(
        calendar.next_working(dt(1, 12, 17, 0)).unwrap(),
        dt(1, 13, 8, 0),
        "周一 17:00 应吸附到周二 08:00"
    );

    // 周五下班后跨周末吸附到周一开班
    assert_eq!(
        calendar.next_working(dt(1, 16, 18, 30)).unwrap(),
        dt(1, 19, 8, 0),
        "周五晚应吸附到下周一 08:00"
    );
}

// ==========================================
// 测试6: next_working 视界内无工作时刻
// ==========================================
#[test]
fn test_next_working_no_working_time() {
    // 检修窗口覆盖超过搜索视界 (30 天)
    let center = create_weekday_center().with_maintenance(dt(1, 1, 0, 0), dt(3, 15, 0, 0));
    let calendar = create_calendar(&center);

    let err = calendar.next_working(dt(1, 5, 8, 0)).unwrap_err();
    assert!(
        matches!(err, EngineError::NoWorkingTime { .. }),
        "应返回 no_working_time,实际: {:?}",
        err
    );
}

// ==========================================
// 测试7: 午休间隙 (08-12 / 13-17 双班次)
// ==========================================
#[test]
fn test_end_of_work_pauses_over_lunch_break() {
    let center = WorkCenter::new("D").with_shift(1, 8, 12).with_shift(1, 13, 17);
    let calendar = create_calendar(&center);

    // 11:00 起 180 工作分钟: 午休前 1 小时 + 午休后 2 小时
    let end = calendar.end_of_work(dt(1, 12, 11, 0), 180).unwrap();
    assert_eq!(end, dt(1, 12, 15, 0), "180 工作分钟应在 15:00 完成");
}

// ==========================================
// 测试8: 跨周末推进 (仅周五与周一有班次)
// ==========================================
#[test]
fn test_end_of_work_spans_weekend() {
    let center = WorkCenter::new("F").with_shift(5, 8, 17).with_shift(1, 8, 17);
    let calendar = create_calendar(&center);

    // 周五 16:00 起 480 工作分钟: 周五 1 小时 (16:00-17:00 上界不含)
    // + 周一 08:00 起 7 小时
    let end = calendar.end_of_work(dt(1, 16, 16, 0), 480).unwrap();
    assert_eq!(end, dt(1, 19, 15, 0), "480 工作分钟应在下周一 15:00 完成");
}

// ==========================================
// 测试9: 无间断推进时结束时刻 = 开始 + 工时
// ==========================================
#[test]
fn test_end_of_work_contiguous() {
    let calendar = create_calendar(&create_weekday_center());

    let end = calendar.end_of_work(dt(1, 12, 9, 0), 240).unwrap();
    assert_eq!(end, dt(1, 12, 13, 0), "连续 240 分钟应在 13:00 完成");

    // 单分钟工时
    let end = calendar.end_of_work(dt(1, 12, 9, 0), 1).unwrap();
    assert_eq!(end, dt(1, 12, 9, 1), "1 个工作分钟应在 09:01 完成");
}

// ==========================================
// 测试10: 工时推进安全上限
// ==========================================
#[test]
fn test_end_of_work_traversal_cap() {
    // 每周仅周一 08:00-09:00 一小时班次:
    // 120 分钟工时需要跨周,游标在触及第二周前即超过 10,000 分钟上限
    let center = WorkCenter::new("SCARCE").with_shift(1, 8, 9);
    let calendar = create_calendar(&center);

    let err = calendar.end_of_work(dt(1, 12, 8, 0), 120).unwrap_err();
    assert!(
        matches!(err, EngineError::NoWorkingTime { .. }),
        "超过安全上限应返回 no_working_time,实际: {:?}",
        err
    );
}

// ==========================================
// 测试11: 工作中心无班次不可实例化
// ==========================================
#[test]
fn test_no_shifts_rejected_at_construction() {
    let center = WorkCenter::new("EMPTY");
    let err = CalendarEngine::new(&center, &EngineConfig::default()).unwrap_err();
    assert!(
        matches!(err, EngineError::NoShifts { .. }),
        "零班次应返回 no_shifts,实际: {:?}",
        err
    );
}
