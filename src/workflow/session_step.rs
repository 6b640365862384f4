//! 会话步骤
//!
//! 只能向前：Welcome → SelectQuiz → SelectPhotos → Results

use std::fmt::Display;

/// 会话当前所处的步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionStep {
    Welcome,
    SelectQuiz,
    SelectPhotos,
    Results,
}

impl SessionStep {
    /// 步骤序号（0-3）
    pub fn index(self) -> usize {
        match self {
            SessionStep::Welcome => 0,
            SessionStep::SelectQuiz => 1,
            SessionStep::SelectPhotos => 2,
            SessionStep::Results => 3,
        }
    }

    /// 下一步；已经是最后一步时返回 `None`
    pub fn next(self) -> Option<Self> {
        match self {
            SessionStep::Welcome => Some(SessionStep::SelectQuiz),
            SessionStep::SelectQuiz => Some(SessionStep::SelectPhotos),
            SessionStep::SelectPhotos => Some(SessionStep::Results),
            SessionStep::Results => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// 当前步骤的按钮文字
    pub fn button_label(self) -> &'static str {
        button_label_for(self.index())
    }
}

/// 按序号取按钮文字，超出范围统一为 "Next"
pub fn button_label_for(index: usize) -> &'static str {
    match index {
        0 => "Choose quiz",
        1 => "Select photos",
        2 => "Results",
        3 => "Finish",
        _ => "Next",
    }
}

impl Display for SessionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[步骤 {} {:?}]", self.index(), self)
    }
}
