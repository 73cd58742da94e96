//! 会话状态 - 编排层
//!
//! 持有选中的文件、当前动作、最近一次结果，以及分析 / 导出两个独立的生命周期。
//! 所有方法都是同步的纯状态转换，不做任何 IO，可以脱离网络单独测试。

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::clients::ReviewRequest;
use crate::models::{ActionKind, AnalysisResult, Flow, SelectedFile};
use crate::services::{detect_language, result_adapter, RenderSlot};
use crate::workflow::{LifecycleKind, LifecycleState, RequestLifecycle, RequestTicket};

/// 被拒绝的用户意图（不是错误，只是前置条件不满足）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// 还没有选择文件
    NoFileSelected,
    /// 已有分析请求在途
    AnalyzeInFlight,
    /// 已有导出请求在途
    ExportInFlight,
    /// 还没有可导出的结果
    NoResult,
    /// 动作不属于当前流程
    ActionNotInFlow,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::NoFileSelected => "尚未选择文件",
            Rejection::AnalyzeInFlight => "分析正在进行中",
            Rejection::ExportInFlight => "导出正在进行中",
            Rejection::NoResult => "还没有分析结果",
            Rejection::ActionNotInFlow => "该动作不属于当前流程",
        };
        f.write_str(text)
    }
}

/// 已发放凭据、等待发送的请求
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub request: ReviewRequest,
}

/// 给展示层的只读快照
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub flow: Flow,
    pub file_name: Option<String>,
    pub action: ActionKind,
    pub result: Option<Arc<AnalysisResult>>,
    pub analyze: LifecycleState,
    pub export: LifecycleState,
    pub last_export: Option<PathBuf>,
}

impl SessionSnapshot {
    /// 运行按钮是否可用
    pub fn can_run(&self) -> bool {
        self.file_name.is_some() && self.analyze != LifecycleState::Running
    }

    /// 导出按钮是否可用
    pub fn can_export(&self) -> bool {
        self.file_name.is_some() && self.result.is_some() && self.export != LifecycleState::Running
    }
}

#[derive(Debug)]
pub struct SessionController {
    flow: Flow,
    file: Option<SelectedFile>,
    action: ActionKind,
    result: Option<Arc<AnalysisResult>>,
    analyze: RequestLifecycle,
    export: RequestLifecycle,
    last_export: Option<PathBuf>,
}

impl SessionController {
    pub fn new(flow: Flow) -> Self {
        Self {
            flow,
            file: None,
            action: flow.default_action(),
            result: None,
            analyze: RequestLifecycle::new(LifecycleKind::Analyze),
            export: RequestLifecycle::new(LifecycleKind::Export),
            last_export: None,
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        self.result.as_ref()
    }

    pub fn analyze_lifecycle(&self) -> &RequestLifecycle {
        &self.analyze
    }

    pub fn export_lifecycle(&self) -> &RequestLifecycle {
        &self.export
    }

    /// 选择文件，整体替换之前的文件
    pub fn pick_file(&mut self, file: SelectedFile) {
        debug!("[{}] 选择文件: {} ({} 字节)", self.flow, file.name(), file.len());
        self.file = Some(file);
    }

    /// 切换动作；不会清空已有结果
    pub fn pick_action(&mut self, action: ActionKind) -> Result<(), Rejection> {
        if action.flow() != self.flow {
            return Err(Rejection::ActionNotInFlow);
        }
        self.action = action;
        Ok(())
    }

    /// 开始一次分析
    ///
    /// 成功时清空旧结果，保证旧结果不会被当作本次运行的结果。
    pub fn begin_run(&mut self) -> Result<PendingRequest, Rejection> {
        let file = self.file.clone().ok_or(Rejection::NoFileSelected)?;
        let ticket = self.analyze.submit().ok_or(Rejection::AnalyzeInFlight)?;

        self.result = None;
        Ok(PendingRequest {
            ticket,
            request: ReviewRequest {
                flow: self.flow,
                action: self.action,
                file,
            },
        })
    }

    /// 结算分析请求
    ///
    /// 成功时保存并返回新结果；失败时结果保持不变。凭据无效时什么也不改。
    pub fn finish_run(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<AnalysisResult, String>,
    ) -> Option<Arc<AnalysisResult>> {
        match outcome {
            Ok(result) => {
                if !self.analyze.succeed(ticket) {
                    debug!("[{}] 忽略过期的分析响应", self.flow);
                    return None;
                }
                let result = Arc::new(result);
                self.result = Some(Arc::clone(&result));
                Some(result)
            }
            Err(reason) => {
                if !self.analyze.fail(ticket, reason) {
                    debug!("[{}] 忽略过期的分析失败", self.flow);
                }
                None
            }
        }
    }

    /// 开始一次导出，只在已有结果时允许
    pub fn begin_export(&mut self) -> Result<PendingRequest, Rejection> {
        let file = self.file.clone().ok_or(Rejection::NoFileSelected)?;
        if self.result.is_none() {
            return Err(Rejection::NoResult);
        }
        let ticket = self.export.submit().ok_or(Rejection::ExportInFlight)?;

        Ok(PendingRequest {
            ticket,
            request: ReviewRequest {
                flow: self.flow,
                action: self.action,
                file,
            },
        })
    }

    /// 结算导出请求；无论成败都不改动分析结果
    pub fn finish_export(&mut self, ticket: RequestTicket, outcome: Result<PathBuf, String>) -> bool {
        match outcome {
            Ok(path) => {
                if !self.export.succeed(ticket) {
                    return false;
                }
                self.last_export = Some(path);
                true
            }
            Err(reason) => {
                self.export.fail(ticket, reason);
                false
            }
        }
    }

    /// 确认两个生命周期上的失败
    pub fn acknowledge_failures(&mut self) {
        self.analyze.acknowledge();
        self.export.acknowledge();
    }

    /// 当前动作下要渲染的内容
    pub fn render_plan(&self) -> Vec<RenderSlot> {
        let Some(result) = &self.result else {
            return Vec::new();
        };
        let language = self
            .file
            .as_ref()
            .map(|f| detect_language(f.name()))
            .unwrap_or("text");

        result_adapter::plan(self.action, result)
            .into_iter()
            .map(|slot| slot.with_language(language))
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            flow: self.flow,
            file_name: self.file.as_ref().map(|f| f.name().to_string()),
            action: self.action,
            result: self.result.clone(),
            analyze: self.analyze.state().clone(),
            export: self.export.state().clone(),
            last_export: self.last_export.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeReviewReport, ProjectReport};

    fn project_with_file() -> SessionController {
        let mut controller = SessionController::new(Flow::Project);
        controller.pick_file(SelectedFile::new("app.zip", b"PK\x03\x04".to_vec()));
        controller
    }

    fn review_only(text: &str) -> AnalysisResult {
        AnalysisResult::Project(ProjectReport {
            review_report: Some(text.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_run_without_file_is_rejected_and_stays_idle() {
        let mut controller = SessionController::new(Flow::Project);
        assert_eq!(controller.begin_run().unwrap_err(), Rejection::NoFileSelected);
        assert_eq!(controller.analyze_lifecycle().state(), &LifecycleState::Idle);
    }

    #[test]
    fn test_run_carries_current_file_and_action() {
        let mut controller = project_with_file();
        controller.pick_action(ActionKind::Interview).unwrap();

        let pending = controller.begin_run().unwrap();
        assert_eq!(pending.request.flow, Flow::Project);
        assert_eq!(pending.request.action, ActionKind::Interview);
        assert_eq!(pending.request.file.name(), "app.zip");
        assert!(controller.analyze_lifecycle().is_running());
    }

    #[test]
    fn test_second_run_while_running_is_rejected() {
        let mut controller = project_with_file();
        controller.begin_run().unwrap();
        assert_eq!(controller.begin_run().unwrap_err(), Rejection::AnalyzeInFlight);
    }

    #[test]
    fn test_new_run_clears_previous_result() {
        let mut controller = project_with_file();
        let first = controller.begin_run().unwrap();
        controller.finish_run(first.ticket, Ok(review_only("v1")));
        assert!(controller.result().is_some());

        controller.begin_run().unwrap();
        assert!(controller.result().is_none());
        assert!(!controller.snapshot().can_export());
    }

    #[test]
    fn test_failed_run_leaves_cleared_result_and_reports_reason() {
        let mut controller = project_with_file();
        let pending = controller.begin_run().unwrap();

        assert!(controller
            .finish_run(pending.ticket, Err("502 Bad Gateway".into()))
            .is_none());
        assert_eq!(controller.analyze_lifecycle().failure(), Some("502 Bad Gateway"));
        assert!(controller.result().is_none());

        controller.acknowledge_failures();
        assert_eq!(controller.analyze_lifecycle().state(), &LifecycleState::Idle);
    }

    #[test]
    fn test_switching_action_does_not_fabricate_result() {
        let mut controller = project_with_file();
        let pending = controller.begin_run().unwrap();
        controller.finish_run(pending.ticket, Ok(review_only("all good")));
        assert_eq!(controller.render_plan().len(), 1);

        controller.pick_action(ActionKind::Interview).unwrap();
        assert!(controller.result().is_some());
        assert!(controller.render_plan().is_empty());
    }

    #[test]
    fn test_action_from_other_flow_is_rejected() {
        let mut controller = SessionController::new(Flow::SingleFile);
        assert_eq!(
            controller.pick_action(ActionKind::Interview).unwrap_err(),
            Rejection::ActionNotInFlow
        );
        assert_eq!(controller.action(), ActionKind::CodeReview);
    }

    #[test]
    fn test_export_requires_result() {
        let mut controller = project_with_file();
        assert_eq!(controller.begin_export().unwrap_err(), Rejection::NoResult);

        let pending = controller.begin_run().unwrap();
        controller.finish_run(pending.ticket, Ok(review_only("ok")));
        assert!(controller.begin_export().is_ok());
        assert_eq!(controller.begin_export().unwrap_err(), Rejection::ExportInFlight);
    }

    #[test]
    fn test_export_failure_leaves_result_untouched() {
        let mut controller = project_with_file();
        let run = controller.begin_run().unwrap();
        controller.finish_run(run.ticket, Ok(review_only("keep me")));
        let before = controller.result().cloned();

        let export = controller.begin_export().unwrap();
        assert!(!controller.finish_export(export.ticket, Err("timeout".into())));

        assert_eq!(controller.result().cloned(), before);
        assert_eq!(controller.snapshot().last_export, None);
        assert_eq!(controller.export_lifecycle().failure(), Some("timeout"));
    }

    #[test]
    fn test_export_success_records_path() {
        let mut controller = project_with_file();
        let run = controller.begin_run().unwrap();
        controller.finish_run(run.ticket, Ok(review_only("ok")));

        let export = controller.begin_export().unwrap();
        assert!(controller.finish_export(export.ticket, Ok(PathBuf::from("ai_project_report.pdf"))));
        assert_eq!(
            controller.snapshot().last_export,
            Some(PathBuf::from("ai_project_report.pdf"))
        );
    }

    #[test]
    fn test_single_file_plan_labels_refactored_code() {
        let mut controller = SessionController::new(Flow::SingleFile);
        controller.pick_file(SelectedFile::new("calc.py", b"x=1".to_vec()));
        let run = controller.begin_run().unwrap();
        controller.finish_run(
            run.ticket,
            Ok(AnalysisResult::SingleFile(CodeReviewReport {
                review_code: "r".into(),
                test_report: "t".into(),
                refactored_code: "x = 1\n".into(),
            })),
        );

        let slots = controller.render_plan();
        assert_eq!(slots.len(), 3);
        assert!(slots[2].to_string().contains("```python"));
    }
}
