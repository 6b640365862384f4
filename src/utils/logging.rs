/// 日志工具模块
///
/// 提供日志初始化和会话输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{Quiz, UserResult};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose_logging` 选择 debug 或 info
pub fn init(config: &Config) {
    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 Quizker 评分会话启动");
    info!("🌐 评分服务: {}", config.api_base_url);
    info!("📷 单次最多选择 {} 张照片", config.max_photos);
    info!("{}", "=".repeat(60));
}

/// 记录测验目录
///
/// # 参数
/// - `quizzes`: 测验列表
/// - `selected`: 当前选择的测验ID
pub fn log_catalog(quizzes: &[Quiz], selected: Option<&str>) {
    if quizzes.is_empty() {
        info!("⚠️ 测验目录为空");
        return;
    }
    info!("📋 共 {} 个测验:", quizzes.len());
    for (i, quiz) in quizzes.iter().enumerate() {
        let marker = if Some(quiz.id.as_str()) == selected { "→" } else { " " };
        info!("{} {}. {} [{}]", marker, i + 1, truncate_text(&quiz.name, 40), quiz.id);
    }
}

/// 打印成绩表
///
/// # 参数
/// - `results`: 成绩列表
pub fn print_results(results: &[UserResult]) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评分结果");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    if results.is_empty() {
        info!("（无结果）");
    }
    for result in results {
        info!("{:<40} {:>10}", truncate_text(&result.name, 40), result.score);
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
