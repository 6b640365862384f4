use thiserror::Error;

use crate::workflow::SessionStep;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 评分服务 API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 图片编码错误
    #[error("图片错误: {0}")]
    Image(#[from] ImageError),
    /// 流程（状态机）错误
    #[error("流程错误: {0}")]
    Workflow(#[from] WorkflowError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（无连接、DNS、超时等）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回非 2xx 状态码
    #[error("API返回错误状态 ({endpoint}): HTTP {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// JSON 结构与预期不符
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 图片编码错误
///
/// 任意一张图片编码失败都会让整个提交在发送请求之前中止
#[derive(Debug, Error)]
pub enum ImageError {
    /// 图片数据为空
    #[error("第 {index} 张图片数据为空")]
    EmptyPayload { index: usize },
    /// 无法识别的图片格式
    #[error("第 {index} 张图片格式无法识别")]
    UnsupportedFormat { index: usize },
    /// 构建 multipart 分片失败
    #[error("第 {index} 张图片编码失败: {source}")]
    EncodeFailed {
        index: usize,
        #[source]
        source: reqwest::Error,
    },
}

/// 流程错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// 尚未选择测验
    #[error("尚未选择测验")]
    NoQuizSelected,
    /// 测验ID不在已获取的目录中
    #[error("测验ID不存在: {id}")]
    UnknownQuiz { id: String },
    /// 本次会话已经提交过，不再重复提交
    #[error("本次会话已提交过照片")]
    AlreadySubmitted,
    /// 当前步骤不允许该操作
    #[error("当前步骤为 {actual:?}，该操作需要 {expected:?}")]
    WrongStep {
        expected: SessionStep,
        actual: SessionStep,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建状态码错误
    pub fn api_bad_status(endpoint: impl Into<String>, status: u16) -> Self {
        AppError::Api(ApiError::BadStatus {
            endpoint: endpoint.into(),
            status,
        })
    }

    /// 创建JSON解析错误
    pub fn api_json_failed(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 是否为网络/服务端错误
    pub fn is_api(&self) -> bool {
        matches!(self, AppError::Api(_))
    }

    /// 错误类别，供界面决定是否显示提示
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Api(ApiError::RequestFailed { .. }) => ErrorKind::Transport,
            AppError::Api(ApiError::BadStatus { .. }) => ErrorKind::Status,
            AppError::Api(ApiError::JsonParseFailed { .. }) => ErrorKind::Decode,
            AppError::Image(_) => ErrorKind::ImageEncode,
            AppError::Workflow(_) => ErrorKind::Workflow,
            AppError::Config(_) => ErrorKind::Config,
        }
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 无连接、DNS 失败、超时
    Transport,
    /// 非 2xx 状态码
    Status,
    /// 响应体结构不符
    Decode,
    /// 照片无法转换为上传格式
    ImageEncode,
    Workflow,
    Config,
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_error_display() {
        let err = AppError::from(WorkflowError::UnknownQuiz {
            id: "q-9".to_string(),
        });
        assert_eq!(err.to_string(), "流程错误: 测验ID不存在: q-9");
        assert!(!err.is_api());
    }

    #[test]
    fn test_bad_status_is_api_error() {
        let err = AppError::api_bad_status("/quiz", 503);
        assert!(err.is_api());
        assert!(err.to_string().contains("HTTP 503"));
        assert_eq!(err.kind(), ErrorKind::Status);
    }
}
