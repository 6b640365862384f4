/// 照片提交客户端
///
/// 把测验ID和照片打包为一个 multipart 请求，解析每位答题者的成绩
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use super::{endpoint, read_json};
use crate::error::{AppError, AppResult, ImageError};
use crate::models::{SelectedImage, SubmitResponse, UserResult};

/// 照片分片的字段名
pub const FILES_FIELD: &str = "files";
/// 测验ID的字段名
pub const QUIZ_ID_FIELD: &str = "quizId";

pub struct SubmissionClient {
    http: reqwest::Client,
    url: String,
}

impl SubmissionClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            url: endpoint(base_url, "quiz/submit"),
        }
    }

    /// 提交照片
    ///
    /// # 参数
    /// - `quiz_id`: 已选择测验的ID
    /// - `images`: 按选择顺序排列的照片
    ///
    /// # 返回
    /// 返回成绩列表，每项带有新生成的ID；任一照片编码失败时不会发出请求
    pub async fn submit(
        &self,
        quiz_id: &str,
        images: &[SelectedImage],
    ) -> AppResult<Vec<UserResult>> {
        if images.is_empty() {
            warn!("⚠️ 没有照片，仍然提交测验 {}", quiz_id);
        }

        let form = build_form(quiz_id, images)?;

        info!("📤 正在提交 {} 张照片 (测验: {})", images.len(), quiz_id);

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&self.url, e))?;

        let parsed: SubmitResponse = read_json(response, &self.url).await?;

        info!("✓ 提交完成，收到 {} 条成绩", parsed.results.len());

        Ok(parsed.results.into_iter().map(UserResult::from).collect())
    }
}

/// 构建 multipart 请求体
///
/// 每张照片一个 `files` 分片（文件名为 `<序号>.png`），最后是 `quizId` 文本字段
pub fn build_form(quiz_id: &str, images: &[SelectedImage]) -> Result<Form, ImageError> {
    let mut form = Form::new();

    for image in images {
        let format = image.encode()?;
        debug!(
            "照片 {} 格式: {:?}, 大小: {} 字节",
            image.index(),
            format,
            image.bytes().len()
        );

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name())
            .mime_str("image/png")
            .map_err(|source| ImageError::EncodeFailed {
                index: image.index(),
                source,
            })?;

        form = form.part(FILES_FIELD, part);
    }

    Ok(form.text(QUIZ_ID_FIELD, quiz_id.to_string()))
}
