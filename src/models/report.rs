use serde::{Deserialize, Serialize};

/// 项目流程的分析结果
///
/// 通常只有与本次动作对应的字段有值，但不作保证，缺失字段什么也不渲染。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_questions: Option<String>,
}

/// 单文件流程的分析结果，三个字段总是一起渲染
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeReviewReport {
    pub review_code: String,
    pub test_report: String,
    pub refactored_code: String,
}

/// 结果中的具名字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultField {
    ReviewReport,
    ProjectExplanation,
    InterviewQuestions,
    ReviewCode,
    TestReport,
    RefactoredCode,
}

impl ResultField {
    /// 协议中的字段名
    pub fn key(self) -> &'static str {
        match self {
            ResultField::ReviewReport => "review_report",
            ResultField::ProjectExplanation => "project_explanation",
            ResultField::InterviewQuestions => "interview_questions",
            ResultField::ReviewCode => "review_code",
            ResultField::TestReport => "test_report",
            ResultField::RefactoredCode => "refactored_code",
        }
    }
}

/// 一次成功分析的结果，整体替换，从不局部修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    Project(ProjectReport),
    SingleFile(CodeReviewReport),
}

impl AnalysisResult {
    /// 按字段取文本；字段不属于该结果形态或未填充时返回 `None`
    pub fn field(&self, field: ResultField) -> Option<&str> {
        match (self, field) {
            (AnalysisResult::Project(r), ResultField::ReviewReport) => r.review_report.as_deref(),
            (AnalysisResult::Project(r), ResultField::ProjectExplanation) => {
                r.project_explanation.as_deref()
            }
            (AnalysisResult::Project(r), ResultField::InterviewQuestions) => {
                r.interview_questions.as_deref()
            }
            (AnalysisResult::SingleFile(r), ResultField::ReviewCode) => Some(&r.review_code),
            (AnalysisResult::SingleFile(r), ResultField::TestReport) => Some(&r.test_report),
            (AnalysisResult::SingleFile(r), ResultField::RefactoredCode) => {
                Some(&r.refactored_code)
            }
            _ => None,
        }
    }

    /// 已填充的字段名（用于日志）
    pub fn populated_fields(&self) -> Vec<&'static str> {
        [
            ResultField::ReviewReport,
            ResultField::ProjectExplanation,
            ResultField::InterviewQuestions,
            ResultField::ReviewCode,
            ResultField::TestReport,
            ResultField::RefactoredCode,
        ]
        .into_iter()
        .filter(|f| self.field(*f).is_some())
        .map(ResultField::key)
        .collect()
    }
}

/// 面试问答中的一组问题与答案，序号从 1 开始
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewBlock {
    pub index: usize,
    pub question: String,
    pub answer: String,
}

impl InterviewBlock {
    /// 展示用编号，例如 `Q1.`
    pub fn label(&self) -> String {
        format!("Q{}.", self.index)
    }
}
