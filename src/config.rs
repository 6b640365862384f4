use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 评分服务地址（协议 + 主机 + 端口）
    pub api_base_url: String,
    /// 单次选择最多接收的照片数量
    pub max_photos: usize,
    /// 请求超时（秒），不设置时使用传输层默认值
    pub request_timeout_secs: Option<u64>,
    /// 优先选择的测验ID，不设置时使用目录中的第一个
    pub preferred_quiz_id: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://192.168.21.8:3069".to_string(),
            max_photos: 5,
            request_timeout_secs: None,
            preferred_quiz_id: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载配置，环境变量优先
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;

        config.with_overrides(|name| std::env::var(name).ok())
    }

    /// 用查找函数覆盖字段
    ///
    /// # 参数
    /// - `lookup`: 变量名 -> 值，返回 `None` 表示不覆盖
    pub fn with_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QUIZKER_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("QUIZKER_MAX_PHOTOS") {
            self.max_photos = parse_var("QUIZKER_MAX_PHOTOS", &v, "usize")?;
        }
        if let Some(v) = lookup("QUIZKER_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs =
                Some(parse_var("QUIZKER_REQUEST_TIMEOUT_SECS", &v, "u64")?);
        }
        if let Some(v) = lookup("QUIZKER_QUIZ_ID") {
            self.preferred_quiz_id = Some(v);
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = parse_var("VERBOSE_LOGGING", &v, "bool")?;
        }
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> AppResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        }
        .into()
    })
}
