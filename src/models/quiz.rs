use serde::Deserialize;

/// 评分服务上的一个测验
///
/// `id` 唯一；`name` 只用于显示，服务端不保证唯一
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub name: String,
}

/// `GET /quiz` 的响应体
#[derive(Debug, Clone, Deserialize)]
pub struct QuizzesResponse {
    pub quizzes: Vec<Quiz>,
}
