//! 评分服务客户端
//!
//! - `CatalogClient` - `GET /quiz`，获取测验目录
//! - `SubmissionClient` - `POST /quiz/submit`，上传照片并解析成绩
//! - `GradingService` - 流程层依赖的能力接口，测试时可替换

pub mod catalog_client;
pub mod submission_client;

pub use catalog_client::CatalogClient;
pub use submission_client::SubmissionClient;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Quiz, SelectedImage, UserResult};

/// 评分服务能力
#[async_trait]
pub trait GradingService: Send + Sync {
    /// 获取测验目录，保持服务端顺序
    async fn fetch_quizzes(&self) -> AppResult<Vec<Quiz>>;

    /// 提交照片，返回按响应顺序排列的成绩
    async fn submit(&self, quiz_id: &str, images: &[SelectedImage]) -> AppResult<Vec<UserResult>>;
}

/// 基于 HTTP 的评分服务客户端
pub struct HttpGradingClient {
    catalog: CatalogClient,
    submission: SubmissionClient,
}

impl HttpGradingClient {
    /// 创建新的客户端，两个子客户端共享同一个连接池
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| AppError::api_request_failed(&config.api_base_url, e))?;

        Ok(Self {
            catalog: CatalogClient::new(http.clone(), &config.api_base_url),
            submission: SubmissionClient::new(http, &config.api_base_url),
        })
    }
}

#[async_trait]
impl GradingService for HttpGradingClient {
    async fn fetch_quizzes(&self) -> AppResult<Vec<Quiz>> {
        self.catalog.fetch_quizzes().await
    }

    async fn submit(&self, quiz_id: &str, images: &[SelectedImage]) -> AppResult<Vec<UserResult>> {
        self.submission.submit(quiz_id, images).await
    }
}

/// 拼接接口地址
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// 检查状态码并解析 JSON 响应体
///
/// 非 2xx 状态直接丢弃响应体；解析失败单独归类为 JSON 错误
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> AppResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::api_bad_status(url, status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| AppError::api_request_failed(url, e))?;

    debug!("响应体长度: {} 字节", body.len());

    serde_json::from_slice(&body).map_err(|e| AppError::api_json_failed(url, e))
}
