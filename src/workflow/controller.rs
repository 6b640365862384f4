//! 会话流程控制器 - 流程层
//!
//! 核心职责：定义一次评分会话的完整步骤
//!
//! 流程顺序：
//! 1. Welcome → SelectQuiz（进入时后台获取测验目录）
//! 2. SelectQuiz → SelectPhotos
//! 3. SelectPhotos → Results（提交照片，成功后才前进；每次会话只提交一次）
//! 4. Results 为终点，再次前进只把按钮文字改为 "Next"

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::clients::GradingService;
use crate::config::Config;
use crate::error::{AppError, AppResult, ErrorKind, WorkflowError};
use crate::models::{Quiz, SelectedImage, UserResult};
use crate::workflow::{SessionState, SessionStep};

type CatalogTask = JoinHandle<AppResult<Vec<Quiz>>>;

/// 会话流程控制器
///
/// - 独占 `SessionState`，只通过只读方法对外暴露
/// - `advance()` 是唯一能改变步骤的方法
/// - 网络失败只记录日志和错误类别，不会前进到结果页
pub struct SessionController<S: GradingService + 'static> {
    service: Arc<S>,
    state: SessionState,
    max_photos: usize,
    pending_catalog: Option<CatalogTask>,
    last_failure: Option<ErrorKind>,
}

impl<S: GradingService + 'static> SessionController<S> {
    /// 创建新的会话，从 Welcome 开始
    pub fn new(service: S, config: &Config) -> Self {
        Self::with_shared(Arc::new(service), config)
    }

    /// 使用共享的评分服务创建会话
    pub fn with_shared(service: Arc<S>, config: &Config) -> Self {
        Self {
            service,
            state: SessionState::new(),
            max_photos: config.max_photos,
            pending_catalog: None,
            last_failure: None,
        }
    }

    // ========== 只读访问 ==========

    pub fn current_step(&self) -> SessionStep {
        self.state.step()
    }

    /// 当前步骤的按钮文字
    pub fn button_label(&self) -> &'static str {
        self.state.button_label()
    }

    pub fn quizzes(&self) -> &[Quiz] {
        self.state.quizzes()
    }

    pub fn selected_quiz(&self) -> Option<&Quiz> {
        self.state.selected_quiz()
    }

    pub fn photos(&self) -> &[SelectedImage] {
        self.state.images().drain()
    }

    pub fn results(&self) -> &[UserResult] {
        self.state.results()
    }

    /// 最近一次网络操作的失败类别，成功后清空
    pub fn last_failure(&self) -> Option<ErrorKind> {
        self.last_failure
    }

    /// 目录是否仍在获取中
    pub fn is_catalog_pending(&self) -> bool {
        self.pending_catalog.is_some()
    }

    // ========== 用户操作 ==========

    /// 按ID选择测验
    pub fn select_quiz(&mut self, id: &str) -> AppResult<&Quiz> {
        self.expect_step(SessionStep::SelectQuiz)?;
        let quiz = self.state.select_quiz(id)?;
        info!("✓ 已选择测验: {} ({})", quiz.name, quiz.id);
        Ok(quiz)
    }

    /// 接收一次照片选择
    ///
    /// # 参数
    /// - `payloads`: 用户本次选择的照片数据，按选择顺序
    ///
    /// # 返回
    /// 返回实际保留的照片数量（超过上限的部分被丢弃）
    pub fn add_photos(&mut self, payloads: Vec<Vec<u8>>) -> AppResult<usize> {
        self.expect_step(SessionStep::SelectPhotos)?;

        let offered = payloads.len();
        if offered > self.max_photos {
            warn!(
                "⚠️ 本次选择了 {} 张照片，只保留前 {} 张",
                offered, self.max_photos
            );
        }

        let kept = offered.min(self.max_photos);
        self.state
            .images_mut()
            .extend(payloads.into_iter().take(kept));

        debug!("{} 新增 {} 张照片", self.state, kept);
        Ok(kept)
    }

    /// 等待后台目录获取完成并写入状态
    ///
    /// # 返回
    /// 返回目录是否非空
    pub async fn sync_catalog(&mut self) -> bool {
        if let Some(task) = self.pending_catalog.take() {
            match task.await {
                Ok(Ok(quizzes)) => {
                    self.state.apply_catalog(quizzes);
                    self.last_failure = None;
                    if let Some(quiz) = self.state.selected_quiz() {
                        info!("默认选择测验: {} ({})", quiz.name, quiz.id);
                    }
                }
                Ok(Err(e)) => {
                    warn!("⚠️ 获取测验目录失败，目录保持为空: {}", e);
                    self.last_failure = Some(e.kind());
                }
                Err(e) => {
                    error!("❌ 目录任务执行失败: {}", e);
                    self.last_failure = Some(ErrorKind::Transport);
                }
            }
        }

        !self.state.quizzes().is_empty()
    }

    /// 前进一步
    ///
    /// # 返回
    /// 返回前进后的步骤；提交失败时返回错误且步骤保持在 SelectPhotos，
    /// 之后的点击返回 `WorkflowError::AlreadySubmitted`，不会再次提交
    pub async fn advance(&mut self) -> AppResult<SessionStep> {
        match self.state.step() {
            SessionStep::Welcome => {
                let step = self.move_forward();
                self.spawn_catalog_fetch();
                Ok(step)
            }
            SessionStep::SelectQuiz => Ok(self.move_forward()),
            SessionStep::SelectPhotos => self.submit_photos().await,
            SessionStep::Results => {
                debug!("{} 已是最后一步", self.state.step());
                Ok(self.state.step_forward())
            }
        }
    }

    // ========== 内部步骤 ==========

    fn move_forward(&mut self) -> SessionStep {
        let step = self.state.step_forward();
        info!("➡️ {} 按钮: {}", step, self.state.button_label());
        step
    }

    fn spawn_catalog_fetch(&mut self) {
        let service = Arc::clone(&self.service);
        info!("🔍 正在获取测验目录...");
        self.pending_catalog = Some(tokio::spawn(
            async move { service.fetch_quizzes().await },
        ));
    }

    async fn submit_photos(&mut self) -> AppResult<SessionStep> {
        if self.state.submission_attempted() {
            return Err(self.fail(WorkflowError::AlreadySubmitted.into()));
        }

        self.sync_catalog().await;

        // 未选择测验时不调用评分服务，不算一次提交
        let Some(quiz_id) = self.state.selected_quiz().map(|q| q.id.clone()) else {
            return Err(self.fail(WorkflowError::NoQuizSelected.into()));
        };

        // 照片编码失败发生在评分服务内部，同样算作已提交
        self.state.mark_submission_attempted();

        let outcome = self
            .service
            .submit(&quiz_id, self.state.images().drain())
            .await;

        match outcome {
            Ok(results) => {
                info!("✓ 收到 {} 条成绩", results.len());
                self.state.append_results(results);
                self.last_failure = None;
                Ok(self.move_forward())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, e: AppError) -> AppError {
        warn!("⚠️ {} 提交失败，停留在当前步骤: {}", self.state.step(), e);
        self.last_failure = Some(e.kind());
        e
    }

    fn expect_step(&self, expected: SessionStep) -> AppResult<()> {
        let actual = self.state.step();
        if actual != expected {
            return Err(WorkflowError::WrongStep { expected, actual }.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreEntry;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 返回预设结果的评分服务，记录每次提交
    struct MockGradingService {
        catalog: Option<Vec<Quiz>>,
        scores: Option<Vec<ScoreEntry>>,
        submissions: Mutex<Vec<(String, usize)>>,
    }

    impl MockGradingService {
        fn new(catalog: Option<Vec<Quiz>>, scores: Option<Vec<ScoreEntry>>) -> Self {
            Self {
                catalog,
                scores,
                submissions: Mutex::new(Vec::new()),
            }
        }

        fn submission_count(&self) -> usize {
            self.submissions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GradingService for MockGradingService {
        async fn fetch_quizzes(&self) -> AppResult<Vec<Quiz>> {
            self.catalog
                .clone()
                .ok_or_else(|| AppError::api_bad_status("/quiz", 500))
        }

        async fn submit(
            &self,
            quiz_id: &str,
            images: &[SelectedImage],
        ) -> AppResult<Vec<UserResult>> {
            self.submissions
                .lock()
                .unwrap()
                .push((quiz_id.to_string(), images.len()));
            self.scores
                .clone()
                .map(|scores| scores.into_iter().map(UserResult::from).collect())
                .ok_or_else(|| AppError::api_bad_status("/quiz/submit", 502))
        }
    }

    fn quiz(id: &str, name: &str) -> Quiz {
        Quiz {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn score(name: &str, score: &str) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score: score.to_string(),
        }
    }

    fn jpeg() -> Vec<u8> {
        vec![0xFF, 0xD8, 0xFF, 0xE0]
    }

    fn controller(
        service: MockGradingService,
    ) -> (
        SessionController<MockGradingService>,
        Arc<MockGradingService>,
    ) {
        let service = Arc::new(service);
        let controller =
            SessionController::with_shared(Arc::clone(&service), &Config::default());
        (controller, service)
    }

    #[tokio::test]
    async fn test_full_session_reaches_results_once() {
        let (mut session, service) = controller(MockGradingService::new(
            Some(vec![quiz("q-1", "Algebra"), quiz("q-2", "History")]),
            Some(vec![score("Alice", "80%"), score("Bob", "60%")]),
        ));

        assert_eq!(session.current_step(), SessionStep::Welcome);
        assert_eq!(session.button_label(), "Choose quiz");

        assert_eq!(session.advance().await.unwrap(), SessionStep::SelectQuiz);
        assert_eq!(session.button_label(), "Select photos");
        assert_eq!(session.advance().await.unwrap(), SessionStep::SelectPhotos);
        assert_eq!(session.button_label(), "Results");

        session.add_photos(vec![jpeg(), jpeg()]).unwrap();

        assert_eq!(session.advance().await.unwrap(), SessionStep::Results);
        assert_eq!(session.button_label(), "Finish");
        assert_eq!(session.advance().await.unwrap(), SessionStep::Results);
        assert_eq!(session.button_label(), "Next");
        assert_eq!(session.advance().await.unwrap(), SessionStep::Results);
        assert_eq!(session.button_label(), "Next");

        assert_eq!(service.submission_count(), 1);
        assert_eq!(
            service.submissions.lock().unwrap()[0],
            ("q-1".to_string(), 2)
        );

        let results = session.results();
        assert_eq!(results.len(), 2);
        assert_eq!(
            (results[0].name.as_str(), results[0].score.as_str()),
            ("Alice", "80%")
        );
        assert_eq!(
            (results[1].name.as_str(), results[1].score.as_str()),
            ("Bob", "60%")
        );
        assert_ne!(results[0].id, results[1].id);
        assert_eq!(session.last_failure(), None);
    }

    #[tokio::test]
    async fn test_catalog_default_selection() {
        let (mut session, _) = controller(MockGradingService::new(
            Some(vec![quiz("q-9", "Final"), quiz("q-1", "Quiz 1")]),
            None,
        ));

        session.advance().await.unwrap();
        assert!(session.is_catalog_pending());
        assert!(session.sync_catalog().await);
        assert!(!session.is_catalog_pending());

        assert_eq!(session.quizzes().len(), 2);
        assert_eq!(session.selected_quiz().unwrap().id, "q-9");
    }

    #[tokio::test]
    async fn test_failed_catalog_blocks_submission() {
        let (mut session, service) = controller(MockGradingService::new(
            None,
            Some(vec![score("Alice", "80%")]),
        ));

        session.advance().await.unwrap();
        assert!(!session.sync_catalog().await);
        assert!(session.quizzes().is_empty());
        assert!(session.selected_quiz().is_none());
        assert_eq!(session.last_failure(), Some(ErrorKind::Status));

        session.advance().await.unwrap();
        session.add_photos(vec![jpeg()]).unwrap();

        let err = session.advance().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Workflow(WorkflowError::NoQuizSelected)
        ));
        assert_eq!(session.current_step(), SessionStep::SelectPhotos);
        assert_eq!(service.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_submission_stays_on_photos() {
        let (mut session, service) = controller(MockGradingService::new(
            Some(vec![quiz("q-1", "Algebra")]),
            None,
        ));

        session.advance().await.unwrap();
        session.advance().await.unwrap();
        session.add_photos(vec![jpeg()]).unwrap();

        let err = session.advance().await.unwrap_err();
        assert!(err.is_api());
        assert_eq!(session.current_step(), SessionStep::SelectPhotos);
        assert_eq!(session.button_label(), "Results");
        assert!(session.results().is_empty());
        assert_eq!(session.last_failure(), Some(ErrorKind::Status));
        assert_eq!(service.submission_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_is_not_retried() {
        let (mut session, service) = controller(MockGradingService::new(
            Some(vec![quiz("q-1", "Algebra")]),
            None,
        ));

        session.advance().await.unwrap();
        session.advance().await.unwrap();
        session.add_photos(vec![jpeg()]).unwrap();

        assert!(session.advance().await.unwrap_err().is_api());

        // 再次点击不会重新提交
        for _ in 0..2 {
            let err = session.advance().await.unwrap_err();
            assert!(matches!(
                err,
                AppError::Workflow(WorkflowError::AlreadySubmitted)
            ));
        }

        assert_eq!(service.submission_count(), 1);
        assert_eq!(session.current_step(), SessionStep::SelectPhotos);
        assert!(session.results().is_empty());
        assert_eq!(session.last_failure(), Some(ErrorKind::Workflow));
    }

    #[tokio::test]
    async fn test_missing_quiz_does_not_use_up_submission() {
        let (mut session, service) = controller(MockGradingService::new(
            None,
            Some(vec![score("Alice", "80%")]),
        ));

        session.advance().await.unwrap();
        session.advance().await.unwrap();

        for _ in 0..2 {
            let err = session.advance().await.unwrap_err();
            assert!(matches!(
                err,
                AppError::Workflow(WorkflowError::NoQuizSelected)
            ));
        }
        assert_eq!(service.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_select_quiz_by_id() {
        let (mut session, service) = controller(MockGradingService::new(
            Some(vec![quiz("a", "Midterm"), quiz("b", "Midterm")]),
            Some(Vec::new()),
        ));

        session.advance().await.unwrap();
        session.sync_catalog().await;

        assert_eq!(session.select_quiz("b").unwrap().id, "b");
        assert!(session.select_quiz("zzz").is_err());

        session.advance().await.unwrap();
        session.advance().await.unwrap();

        assert_eq!(service.submissions.lock().unwrap()[0].0, "b");
    }

    #[tokio::test]
    async fn test_photos_only_accepted_while_selecting_photos() {
        let (mut session, _) = controller(MockGradingService::new(Some(Vec::new()), None));

        let err = session.add_photos(vec![jpeg()]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Workflow(WorkflowError::WrongStep {
                expected: SessionStep::SelectPhotos,
                actual: SessionStep::Welcome,
            })
        ));

        session.advance().await.unwrap();
        session.advance().await.unwrap();

        let kept = session.add_photos((0..7).map(|_| jpeg()).collect()).unwrap();
        assert_eq!(kept, 5);
        assert_eq!(session.add_photos(vec![jpeg()]).unwrap(), 1);

        let indices: Vec<usize> = session.photos().iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }
}
