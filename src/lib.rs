//! # Quizker
//!
//! 测验评分客户端的会话核心：选择测验 → 拍摄答卷 → 提交评分 → 显示成绩
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与评分服务的两次交互
//! - `CatalogClient` - `GET /quiz` 获取测验目录
//! - `SubmissionClient` - `POST /quiz/submit` 上传照片
//! - `GradingService` - 流程层依赖的能力接口
//!
//! ### ② 业务能力层（Services）
//! - `ImageBatch` - 按顺序缓存用户选择的照片
//!
//! ### ③ 流程层（Workflow）
//! - `SessionStep` - Welcome → SelectQuiz → SelectPhotos → Results
//! - `SessionState` - 一次会话积累的数据
//! - `SessionController` - 唯一的状态持有者，决定每次前进做什么
//!
//! ### ④ 驱动层
//! - `App` - 无界面的会话驱动
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{GradingService, HttpGradingClient};
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind};
pub use models::{Quiz, SelectedImage, UserResult};
pub use services::ImageBatch;
pub use workflow::{SessionController, SessionStep};
