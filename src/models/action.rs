use std::fmt;

/// 分析流程
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    /// 整个项目（zip 压缩包）
    Project,
    /// 单个源文件
    SingleFile,
}

impl Flow {
    /// 流程的中文名称（用于日志）
    pub fn label(self) -> &'static str {
        match self {
            Flow::Project => "项目分析",
            Flow::SingleFile => "单文件审查",
        }
    }

    /// 该流程下默认激活的动作
    pub fn default_action(self) -> ActionKind {
        match self {
            Flow::Project => ActionKind::ProjectReview,
            Flow::SingleFile => ActionKind::CodeReview,
        }
    }

    /// 分析接口路径
    pub fn analyze_path(self) -> &'static str {
        match self {
            Flow::Project => "/project-review",
            Flow::SingleFile => "/single-review",
        }
    }

    /// PDF 导出接口路径
    pub fn pdf_path(self) -> &'static str {
        match self {
            Flow::Project => "/project-review/pdf",
            Flow::SingleFile => "/single-review/pdf",
        }
    }

    /// 导出 PDF 的固定文件名
    pub fn export_file_name(self) -> &'static str {
        match self {
            Flow::Project => "ai_project_report.pdf",
            Flow::SingleFile => "ai_code_review_report.pdf",
        }
    }

    /// 请求体是否需要携带 `action` 字段
    pub fn sends_action(self) -> bool {
        matches!(self, Flow::Project)
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 后端要产出的内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// 项目审查报告
    ProjectReview,
    /// 项目架构讲解
    ProjectExplain,
    /// 面试问答
    Interview,
    /// 单文件流程的隐含动作：审查 + 测试建议 + 重构
    CodeReview,
}

impl ActionKind {
    /// 项目流程可选的动作（按标签页顺序）
    pub const PROJECT_ACTIONS: [ActionKind; 3] = [
        ActionKind::ProjectReview,
        ActionKind::ProjectExplain,
        ActionKind::Interview,
    ];

    /// 动作代码
    ///
    /// 项目流程的三个代码会作为 `action` 字段发给后端；
    /// `CODE_REVIEW` 只在本地作为渲染表的键，单文件流程的请求体里不带它。
    pub fn code(self) -> &'static str {
        match self {
            ActionKind::ProjectReview => "PROJECT_REVIEW",
            ActionKind::ProjectExplain => "PROJECT_EXPLAIN",
            ActionKind::Interview => "INTERVIEW",
            ActionKind::CodeReview => "CODE_REVIEW",
        }
    }

    /// 所属流程
    pub fn flow(self) -> Flow {
        match self {
            ActionKind::CodeReview => Flow::SingleFile,
            _ => Flow::Project,
        }
    }

    /// 标签页名称
    pub fn tab_label(self) -> &'static str {
        match self {
            ActionKind::ProjectReview => "Project Review",
            ActionKind::ProjectExplain => "Architecture",
            ActionKind::Interview => "Interview Q&A",
            ActionKind::CodeReview => "Code Review",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
