//! # AI Studio Client
//!
//! 代码审查工具的客户端编排层：把单个源文件或打包好的项目提交给远端分析服务，
//! 把返回的结果整理成结构化的展示内容，并可以导出同一结果的 PDF。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露能力，不认识业务
//! - `DiskSink` - 把二进制内容原子地写成文件
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 与远端分析服务的 HTTP 交互
//! - `ReviewBackend` - 分析 / 导出接口，`ReviewClient` 是 reqwest 实现
//!
//! ### ③ 业务能力层（Services）
//! - `interview_parser` - 面试问答文本解析
//! - `result_adapter` - 动作 → 渲染位的静态查表
//! - `export_gateway` - 以固定文件名保存 PDF
//! - `language` / `code_diff` - 语言识别、重构对比
//!
//! ### ④ 流程层（Workflow）
//! - `RequestLifecycle` - 单个请求的状态机（Idle / Running / Failed）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `SessionController` - 会话状态与纯状态转换
//! - `Session` - 把用户意图接到状态机并发出请求

pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{ReviewBackend, ReviewClient, ReviewRequest};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{BinarySink, DiskSink};
pub use models::{ActionKind, AnalysisResult, Flow, InterviewBlock, SelectedFile};
pub use orchestrator::{ExportOutcome, RunOutcome, Session, SessionController};
pub use services::ExportGateway;
pub use workflow::{LifecycleState, RequestLifecycle};
