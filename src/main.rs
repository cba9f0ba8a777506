// ==========================================
// 生产工单重排系统 - 命令行主入口
// ==========================================
// 依据: Replan_Engine_Specs_v0.2.md - 9.2 CLI 契约
// 契约: 单一位置参数 (JSONL 输入路径);
//       成功退出码 0,任何引擎或解析失败退出非零;
//       诊断走标准错误,报表走标准输出; 无持久化状态
// ==========================================

use std::path::PathBuf;
use std::process::ExitCode;

use workorder_replan::engine::{RecalcEngine, RecalcResult};
use workorder_replan::perf::PerfGuard;
use workorder_replan::report::ReportRenderer;
use workorder_replan::{importer, logging};

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", workorder_replan::APP_NAME);
    tracing::info!("系统版本: {}", workorder_replan::VERSION);
    tracing::info!("==================================================");

    // 解析命令行参数
    let Some(input_path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("用法: workorder_replan <输入文件.jsonl>");
        return ExitCode::from(2);
    };

    match run(&input_path) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "重排失败");
            eprintln!("重排失败: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// 完整执行链: 解析 → 归组 → 逐中心重排 → 渲染报表
fn run(input_path: &std::path::Path) -> anyhow::Result<String> {
    let _perf = PerfGuard::new("replan_run");

    tracing::info!(input = %input_path.display(), "读取输入文件");

    // ===== Step 1: 解析输入流 =====
    let bundle = importer::load_jsonl(input_path)?;

    // ===== Step 2: 按工作中心归组 =====
    let groups = importer::group_by_center(bundle)?;

    // ===== Step 3: 逐工作中心执行重排 =====
    // 各中心数据互不共享,引擎按中心独立调用
    let engine = RecalcEngine::new();
    let mut results: Vec<RecalcResult> = Vec::with_capacity(groups.len());

    for (center, orders) in &groups {
        let result = engine.execute_recalc(center, orders)?;
        results.push(result);
    }

    // ===== Step 4: 渲染报表 =====
    Ok(ReportRenderer::new().render(&results))
}
