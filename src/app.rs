//! 命令行会话驱动
//!
//! 没有界面时的"展示层"：按顺序点击前进，把命令行给出的照片作为一次选择

use std::path::PathBuf;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use tracing::{error, info, warn};

use crate::clients::HttpGradingClient;
use crate::config::Config;
use crate::models::UserResult;
use crate::utils::logging::{log_catalog, log_startup, print_results};
use crate::workflow::{SessionController, SessionStep};

/// 应用主结构
pub struct App {
    config: Config,
    session: SessionController<HttpGradingClient>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = HttpGradingClient::new(&config).context("无法创建 HTTP 客户端")?;
        let session = SessionController::new(client, &config);

        Ok(Self { config, session })
    }

    /// 走完一次会话
    ///
    /// # 参数
    /// - `photo_paths`: 照片文件路径，按提交顺序
    ///
    /// # 返回
    /// 返回评分结果
    pub async fn run(&mut self, photo_paths: &[PathBuf]) -> Result<Vec<UserResult>> {
        // Welcome → SelectQuiz
        self.session.advance().await?;

        if !self.session.sync_catalog().await {
            warn!("⚠️ 没有可用的测验");
        }

        if let Some(id) = self.config.preferred_quiz_id.clone() {
            if let Err(e) = self.session.select_quiz(&id) {
                warn!("⚠️ 无法选择测验 {}，使用默认测验: {}", id, e);
            }
        }

        log_catalog(
            self.session.quizzes(),
            self.session.selected_quiz().map(|q| q.id.as_str()),
        );

        // SelectQuiz → SelectPhotos
        self.session.advance().await?;

        let photos = load_photos(photo_paths).await?;
        let kept = self.session.add_photos(photos)?;
        info!("📷 已选择 {} 张照片", kept);

        // SelectPhotos → Results
        match self.session.advance().await {
            Ok(SessionStep::Results) => {
                print_results(self.session.results());
                Ok(self.session.results().to_vec())
            }
            Ok(step) => anyhow::bail!("会话停在 {}", step),
            Err(e) => {
                error!("❌ 提交失败: {}", e);
                Err(e).context("评分提交失败")
            }
        }
    }
}

/// 并发读取照片文件，保持输入顺序
pub async fn load_photos(paths: &[PathBuf]) -> Result<Vec<Vec<u8>>> {
    try_join_all(paths.iter().map(|path| async move {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("无法读取照片: {}", path.display()))
    }))
    .await
}
