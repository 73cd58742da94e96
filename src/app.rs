use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::cli::Command;
use crate::clients::ReviewClient;
use crate::config::Config;
use crate::infrastructure::DiskSink;
use crate::models::{AnalysisResult, SelectedFile};
use crate::orchestrator::{ExportOutcome, RunOutcome, Session};
use crate::services::{refactor_diff, ExportGateway};
use crate::utils::logging::{log_diff_stats, log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    session: Session<ReviewClient, DiskSink>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, command: &Command) -> Result<Self> {
        log_startup(&config, command.flow(), command.action());

        let client = ReviewClient::new(&config).context("无法创建 HTTP 客户端")?;
        let gateway = ExportGateway::new(DiskSink::new(config.output_dir.clone()));
        let session = Session::new(command.flow(), client, gateway);

        Ok(Self { config, session })
    }

    /// 运行一次完整流程：选文件 → 选动作 → 分析 → 展示 → （可选）导出
    pub async fn run(&self, command: &Command) -> Result<()> {
        let file = SelectedFile::load(command.file())
            .await
            .context("无法读取待分析的文件")?;
        let source_text = file.text_lossy();
        let file_name = file.name().to_string();

        self.session.pick_file(file).await;
        if let Err(rejection) = self.session.pick_action(command.action()).await {
            bail!("无法切换动作: {}", rejection);
        }

        let result = match self.session.run().await {
            RunOutcome::Completed(result) => result,
            RunOutcome::Failed(reason) => {
                print_final_stats(command.flow(), false, None);
                bail!("分析失败: {}", reason);
            }
            RunOutcome::Rejected(rejection) => bail!("分析未执行: {}", rejection),
        };

        let slots = self.session.render_plan().await;
        if slots.is_empty() {
            warn!("⚠️ 结果中没有当前动作对应的内容");
        }
        for slot in &slots {
            println!("{}", slot);
        }

        if command.wants_diff() {
            if let AnalysisResult::SingleFile(report) = result.as_ref() {
                let diff = refactor_diff(&source_text, &report.refactored_code, &file_name);
                log_diff_stats(&file_name, &diff);
                println!("{}", diff.unified);
            }
        }

        let mut export_path = None;
        if command.wants_pdf() {
            match self.session.export().await {
                ExportOutcome::Saved(path) => export_path = Some(path.display().to_string()),
                ExportOutcome::Failed(reason) => {
                    print_final_stats(command.flow(), true, None);
                    bail!("PDF 导出失败: {}", reason);
                }
                ExportOutcome::Rejected(rejection) => {
                    warn!("⚠️ PDF 导出未执行: {}", rejection);
                }
            }
        }

        print_final_stats(command.flow(), true, export_path.as_deref());
        info!("输出目录: {}", self.config.output_dir.display());
        Ok(())
    }
}
