//! 命令行参数

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::models::{ActionKind, Flow};

#[derive(Parser, Debug)]
#[command(name = "ai_studio_client")]
#[command(about = "Submit a source file or a zipped project for AI review")]
#[command(version)]
pub struct Args {
    /// TOML 配置文件
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出 debug 日志
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a zipped project
    Project {
        /// Project archive (.zip)
        #[arg(short, long)]
        file: PathBuf,

        /// What the service should produce
        #[arg(short, long, value_enum, default_value_t = ProjectAction::Review)]
        action: ProjectAction,

        /// Also download the PDF report
        #[arg(long)]
        pdf: bool,
    },

    /// Review a single source file
    Single {
        /// Source file
        #[arg(short, long)]
        file: PathBuf,

        /// Also download the PDF report
        #[arg(long)]
        pdf: bool,

        /// Print a diff between the file and the refactored code
        #[arg(long)]
        diff: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectAction {
    Review,
    Explain,
    Interview,
}

impl From<ProjectAction> for ActionKind {
    fn from(action: ProjectAction) -> Self {
        match action {
            ProjectAction::Review => ActionKind::ProjectReview,
            ProjectAction::Explain => ActionKind::ProjectExplain,
            ProjectAction::Interview => ActionKind::Interview,
        }
    }
}

impl Command {
    pub fn flow(&self) -> Flow {
        match self {
            Command::Project { .. } => Flow::Project,
            Command::Single { .. } => Flow::SingleFile,
        }
    }

    pub fn action(&self) -> ActionKind {
        match self {
            Command::Project { action, .. } => (*action).into(),
            Command::Single { .. } => ActionKind::CodeReview,
        }
    }

    pub fn file(&self) -> &PathBuf {
        match self {
            Command::Project { file, .. } | Command::Single { file, .. } => file,
        }
    }

    pub fn wants_pdf(&self) -> bool {
        match self {
            Command::Project { pdf, .. } | Command::Single { pdf, .. } => *pdf,
        }
    }

    pub fn wants_diff(&self) -> bool {
        matches!(self, Command::Single { diff: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_defaults_to_review() {
        let args = Args::try_parse_from(["ai_studio_client", "project", "--file", "app.zip"]).unwrap();
        assert_eq!(args.command.flow(), Flow::Project);
        assert_eq!(args.command.action(), ActionKind::ProjectReview);
        assert!(!args.command.wants_pdf());
    }

    #[test]
    fn test_single_with_pdf_and_diff() {
        let args = Args::try_parse_from([
            "ai_studio_client",
            "-v",
            "single",
            "--file",
            "calc.py",
            "--pdf",
            "--diff",
        ])
        .unwrap();
        assert!(args.verbose);
        assert_eq!(args.command.action(), ActionKind::CodeReview);
        assert!(args.command.wants_pdf());
        assert!(args.command.wants_diff());
    }

    #[test]
    fn test_interview_action_is_parsed() {
        let args = Args::try_parse_from([
            "ai_studio_client",
            "project",
            "-f",
            "app.zip",
            "--action",
            "interview",
        ])
        .unwrap();
        assert_eq!(args.command.action(), ActionKind::Interview);
    }
}
