//! 会话状态
//!
//! 只由 `SessionController` 持有和修改，外部只能通过控制器的只读方法访问

use std::fmt::Display;

use crate::error::{AppResult, WorkflowError};
use crate::models::{Quiz, UserResult};
use crate::services::ImageBatch;
use crate::workflow::{button_label_for, SessionStep};

/// 一次会话积累的全部数据
#[derive(Debug, Clone)]
pub struct SessionState {
    step: SessionStep,
    /// 按钮文字，在最后一步再次点击后变为 "Next"
    button_label: &'static str,
    quizzes: Vec<Quiz>,
    /// 按ID记录选择，名称可能重复
    selected_quiz_id: Option<String>,
    images: ImageBatch,
    results: Vec<UserResult>,
    /// 每次会话只提交一次，请求发出前置位
    submission_attempted: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            step: SessionStep::Welcome,
            button_label: SessionStep::Welcome.button_label(),
            quizzes: Vec::new(),
            selected_quiz_id: None,
            images: ImageBatch::new(),
            results: Vec::new(),
            submission_attempted: false,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SessionStep {
        self.step
    }

    pub fn button_label(&self) -> &'static str {
        self.button_label
    }

    pub fn submission_attempted(&self) -> bool {
        self.submission_attempted
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn selected_quiz(&self) -> Option<&Quiz> {
        let id = self.selected_quiz_id.as_deref()?;
        self.quizzes.iter().find(|q| q.id == id)
    }

    pub fn images(&self) -> &ImageBatch {
        &self.images
    }

    pub fn results(&self) -> &[UserResult] {
        &self.results
    }

    /// 前进一步并更新按钮文字
    ///
    /// 已在最后一步时步骤不变，按钮文字变为 "Next"
    pub(crate) fn step_forward(&mut self) -> SessionStep {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                self.button_label = next.button_label();
            }
            None => self.button_label = button_label_for(self.step.index() + 1),
        }
        self.step
    }

    pub(crate) fn mark_submission_attempted(&mut self) {
        self.submission_attempted = true;
    }

    /// 写入测验目录，第一项成为默认选择
    pub(crate) fn apply_catalog(&mut self, quizzes: Vec<Quiz>) {
        self.selected_quiz_id = quizzes.first().map(|q| q.id.clone());
        self.quizzes = quizzes;
    }

    pub(crate) fn select_quiz(&mut self, id: &str) -> AppResult<&Quiz> {
        let quiz = self
            .quizzes
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| WorkflowError::UnknownQuiz { id: id.to_string() })?;
        self.selected_quiz_id = Some(quiz.id.clone());
        Ok(quiz)
    }

    pub(crate) fn images_mut(&mut self) -> &mut ImageBatch {
        &mut self.images
    }

    /// 追加成绩（只追加，不修改已有项）
    pub(crate) fn append_results(&mut self, results: Vec<UserResult>) {
        self.results.extend(results);
    }
}

impl Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} 测验#{} 照片#{} 成绩#{}",
            self.step,
            self.selected_quiz_id.as_deref().unwrap_or("-"),
            self.images.len(),
            self.results.len()
        )
    }
}
