/// 测验目录客户端
///
/// 只负责 `GET /quiz`，失败时返回错误，由流程层决定如何处理
use tracing::{debug, info};

use super::{endpoint, read_json};
use crate::error::{AppError, AppResult};
use crate::models::{Quiz, QuizzesResponse};

pub struct CatalogClient {
    http: reqwest::Client,
    url: String,
}

impl CatalogClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            url: endpoint(base_url, "quiz"),
        }
    }

    /// 获取测验目录
    ///
    /// # 返回
    /// 返回服务端顺序的测验列表（第一项会成为默认选择）
    pub async fn fetch_quizzes(&self) -> AppResult<Vec<Quiz>> {
        debug!("获取测验目录: {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&self.url, e))?;

        let parsed: QuizzesResponse = read_json(response, &self.url).await?;

        info!("✓ 获取到 {} 个测验", parsed.quizzes.len());
        Ok(parsed.quizzes)
    }
}
