/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;
use crate::models::{ActionKind, Flow};
use crate::services::RefactorDiff;

/// 记录程序启动信息
pub fn log_startup(config: &Config, flow: Flow, action: ActionKind) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {} ({})",
        flow,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 分析服务: {}", config.api_base_url);
    info!("🎯 当前动作: {} [{}]", action.tab_label(), action.code());
    info!("{}", "=".repeat(60));
}

/// 记录重构对比的统计
pub fn log_diff_stats(file_name: &str, diff: &RefactorDiff) {
    if diff.is_unchanged() {
        info!("📝 {} 重构前后没有差异", file_name);
    } else {
        info!(
            "📝 {} 重构对比: +{} / -{} 行",
            file_name, diff.added, diff.removed
        );
    }
}

/// 打印结束信息
pub fn print_final_stats(flow: Flow, succeeded: bool, export_path: Option<&str>) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📊 {} 结束 - {}",
        flow,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    if succeeded {
        info!("✅ 分析成功");
    } else {
        info!("❌ 分析失败");
    }
    if let Some(path) = export_path {
        info!("📄 PDF 已保存至: {}", path);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
