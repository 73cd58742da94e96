//! 会话驱动 - 编排层
//!
//! 把用户意图（选文件、选动作、运行、导出）接到 `SessionController` 上，
//! 并负责真正发出请求。锁只在状态转换时持有，等待网络时不持有，
//! 所以等待期间仍可读取快照，重复点击会被生命周期直接拒绝。

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::clients::ReviewBackend;
use crate::error::{AppError, AppResult};
use crate::infrastructure::BinarySink;
use crate::models::{ActionKind, AnalysisResult, Flow, SelectedFile};
use crate::orchestrator::session_controller::{Rejection, SessionController, SessionSnapshot};
use crate::services::{ExportGateway, RenderSlot};

/// 一次运行的结果
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// 前置条件不满足，没有发出请求
    Rejected(Rejection),
    Completed(Arc<AnalysisResult>),
    Failed(String),
}

/// 一次导出的结果
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// 前置条件不满足，没有发出请求
    Rejected(Rejection),
    Saved(PathBuf),
    Failed(String),
}

pub struct Session<B, S> {
    controller: Mutex<SessionController>,
    backend: B,
    gateway: Arc<ExportGateway<S>>,
}

impl<B, S> Session<B, S>
where
    B: ReviewBackend,
    S: BinarySink + Send + Sync + 'static,
{
    pub fn new(flow: Flow, backend: B, gateway: ExportGateway<S>) -> Self {
        Self {
            controller: Mutex::new(SessionController::new(flow)),
            backend,
            gateway: Arc::new(gateway),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn pick_file(&self, file: SelectedFile) {
        self.controller.lock().await.pick_file(file);
    }

    pub async fn pick_action(&self, action: ActionKind) -> Result<(), Rejection> {
        self.controller.lock().await.pick_action(action)
    }

    /// 确认失败，回到空闲
    pub async fn acknowledge(&self) {
        self.controller.lock().await.acknowledge_failures();
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.controller.lock().await.snapshot()
    }

    pub async fn render_plan(&self) -> Vec<RenderSlot> {
        self.controller.lock().await.render_plan()
    }

    /// 运行分析
    pub async fn run(&self) -> RunOutcome {
        let pending = match self.controller.lock().await.begin_run() {
            Ok(pending) => pending,
            Err(rejection) => {
                debug!("运行请求被忽略: {}", rejection);
                return RunOutcome::Rejected(rejection);
            }
        };

        let request = &pending.request;
        info!(
            "[{}] 🔍 正在分析 {} (动作: {})",
            request.flow,
            request.file.name(),
            request.action
        );

        let outcome = self.backend.analyze(request).await;

        let mut controller = self.controller.lock().await;
        match outcome {
            Ok(result) => match controller.finish_run(pending.ticket, Ok(result)) {
                Some(result) => {
                    info!(
                        "[{}] ✓ 分析完成，返回字段: {:?}",
                        request.flow,
                        result.populated_fields()
                    );
                    RunOutcome::Completed(result)
                }
                None => {
                    warn!("[{}] ⚠️ 分析响应已过期，未采用", request.flow);
                    RunOutcome::Failed("响应已过期".to_string())
                }
            },
            Err(e) => {
                let reason = e.to_string();
                error!("[{}] ❌ 分析失败: {}", request.flow, reason);
                controller.finish_run(pending.ticket, Err(reason.clone()));
                RunOutcome::Failed(reason)
            }
        }
    }

    /// 导出 PDF
    ///
    /// 与分析相互独立；不会改动当前结果。
    pub async fn export(&self) -> ExportOutcome {
        let pending = match self.controller.lock().await.begin_export() {
            Ok(pending) => pending,
            Err(rejection) => {
                debug!("导出请求被忽略: {}", rejection);
                return ExportOutcome::Rejected(rejection);
            }
        };

        let request = &pending.request;
        info!("[{}] 📥 正在生成 PDF...", request.flow);

        let saved = match self.backend.export_pdf(request).await {
            Ok(payload) => self.save(request.flow, payload).await,
            Err(e) => Err(e),
        };

        let mut controller = self.controller.lock().await;
        match saved {
            Ok(path) => {
                controller.finish_export(pending.ticket, Ok(path.clone()));
                ExportOutcome::Saved(path)
            }
            Err(e) => {
                let reason = e.to_string();
                error!("[{}] ❌ PDF 导出失败: {}", request.flow, reason);
                controller.finish_export(pending.ticket, Err(reason.clone()));
                ExportOutcome::Failed(reason)
            }
        }
    }

    /// 落盘是阻塞 IO，放到阻塞线程池里执行
    async fn save(&self, flow: Flow, payload: Vec<u8>) -> AppResult<PathBuf> {
        let gateway = Arc::clone(&self.gateway);
        tokio::task::spawn_blocking(move || gateway.export(flow, &payload))
            .await
            .map_err(|e| AppError::Other(format!("保存 PDF 的任务异常结束: {}", e)))?
    }
}
