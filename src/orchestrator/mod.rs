//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `session_controller` - 会话状态
//! - 持有选中文件、当前动作、最近一次结果
//! - 分析 / 导出两个独立的请求生命周期
//! - 纯同步的状态转换，不做 IO
//!
//! ### `session` - 会话驱动
//! - 把用户意图转成状态转换
//! - 调用分析服务、保存 PDF
//!
//! ## 层次关系
//!
//! ```text
//! session (用户意图 → 请求)
//!     ↓
//! session_controller (状态转换)
//!     ↓
//! workflow::RequestLifecycle (单个请求的生命周期)
//!     ↓
//! services (能力层：解析 / 适配 / 导出)
//!     ↓
//! clients + infrastructure (HTTP / 落盘)
//! ```

pub mod session;
pub mod session_controller;

pub use session::{ExportOutcome, RunOutcome, Session};
pub use session_controller::{PendingRequest, Rejection, SessionController, SessionSnapshot};
