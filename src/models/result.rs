use serde::Deserialize;
use uuid::Uuid;

/// 服务端返回的一条成绩
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// 仅用于显示，不做数值解析
    pub score: String,
}

/// `POST /quiz/submit` 的响应体
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub results: Vec<ScoreEntry>,
}

/// 一位答题者的评分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserResult {
    /// 客户端生成的唯一标识
    pub id: Uuid,
    pub name: String,
    pub score: String,
}

impl From<ScoreEntry> for UserResult {
    fn from(entry: ScoreEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: entry.name,
            score: entry.score,
        }
    }
}
