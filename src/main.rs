use std::path::PathBuf;

use anyhow::Result;
use quizker::utils::logging;
use quizker::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：QUIZKER_CONFIG 指向 TOML 文件时优先使用
    let config = match std::env::var("QUIZKER_CONFIG") {
        Ok(path) => Config::from_file(path)?,
        Err(_) => Config::from_env()?,
    };

    // 初始化日志
    logging::init(&config);

    let photo_paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if photo_paths.is_empty() {
        anyhow::bail!("用法: quizker <照片1> [照片2 ...]");
    }

    // 初始化并运行应用
    App::initialize(config)?.run(&photo_paths).await?;

    Ok(())
}
