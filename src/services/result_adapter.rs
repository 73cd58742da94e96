//! 结果适配 - 业务能力层
//!
//! 静态查表：动作 → 需要渲染的字段、标题与渲染方式。
//! 查到的字段在结果中缺失时，该位置什么也不渲染，不视为错误；
//! 项目流程的字段为空字符串时同样不渲染。

use std::fmt;

use phf::phf_map;

use crate::models::{ActionKind, AnalysisResult, InterviewBlock, ResultField};
use crate::services::interview_parser;

/// 渲染方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// 普通可读文本
    Readable,
    /// 原样输出（等宽，保留全部空白）
    Verbatim,
    /// 解析为面试问答卡片
    InterviewCards,
}

/// 查找表中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub field: ResultField,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub mode: RenderMode,
    /// 字段为空字符串时按缺失处理
    pub skip_empty: bool,
}

const PROJECT_REVIEW_SLOTS: &[SlotSpec] = &[SlotSpec {
    field: ResultField::ReviewReport,
    title: "Project Review",
    subtitle: None,
    mode: RenderMode::Readable,
    skip_empty: true,
}];

const PROJECT_EXPLAIN_SLOTS: &[SlotSpec] = &[SlotSpec {
    field: ResultField::ProjectExplanation,
    title: "Architecture Explanation",
    subtitle: None,
    mode: RenderMode::Readable,
    skip_empty: true,
}];

const INTERVIEW_SLOTS: &[SlotSpec] = &[SlotSpec {
    field: ResultField::InterviewQuestions,
    title: "Interview Questions",
    subtitle: Some("Clean structured Q&A"),
    mode: RenderMode::InterviewCards,
    skip_empty: true,
}];

const CODE_REVIEW_SLOTS: &[SlotSpec] = &[
    SlotSpec {
        field: ResultField::ReviewCode,
        title: "Review Report",
        subtitle: Some("Issues, improvements, and best practices"),
        mode: RenderMode::Readable,
        skip_empty: false,
    },
    SlotSpec {
        field: ResultField::TestReport,
        title: "Test Suggestions",
        subtitle: Some("Recommended test cases & edge conditions"),
        mode: RenderMode::Readable,
        skip_empty: false,
    },
    SlotSpec {
        field: ResultField::RefactoredCode,
        title: "Refactored Code",
        subtitle: Some("Improved, cleaner implementation"),
        mode: RenderMode::Verbatim,
        skip_empty: false,
    },
];

/// 动作代码 → 渲染位
static SLOT_TABLE: phf::Map<&'static str, &'static [SlotSpec]> = phf_map! {
    "PROJECT_REVIEW" => PROJECT_REVIEW_SLOTS,
    "PROJECT_EXPLAIN" => PROJECT_EXPLAIN_SLOTS,
    "INTERVIEW" => INTERVIEW_SLOTS,
    "CODE_REVIEW" => CODE_REVIEW_SLOTS,
};

/// 某个动作对应的渲染位
pub fn slot_specs(action: ActionKind) -> &'static [SlotSpec] {
    SLOT_TABLE.get(action.code()).copied().unwrap_or(&[])
}

/// 渲染内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotBody {
    Readable(String),
    Verbatim {
        text: String,
        language: Option<&'static str>,
    },
    Interview(Vec<InterviewBlock>),
}

/// 一个待渲染的结果位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSlot {
    pub field: ResultField,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub body: SlotBody,
}

impl RenderSlot {
    /// 给原样输出块标注语言
    pub fn with_language(mut self, language: &'static str) -> Self {
        if let SlotBody::Verbatim { language: slot, .. } = &mut self.body {
            *slot = Some(language);
        }
        self
    }
}

/// 根据当前动作与结果决定要渲染什么
///
/// 面试问答每次都重新解析，不缓存。
pub fn plan(action: ActionKind, result: &AnalysisResult) -> Vec<RenderSlot> {
    slot_specs(action)
        .iter()
        .filter_map(|spec| {
            let text = result
                .field(spec.field)
                .filter(|text| !(spec.skip_empty && text.is_empty()))?;
            let body = match spec.mode {
                RenderMode::Readable => SlotBody::Readable(text.to_string()),
                RenderMode::Verbatim => SlotBody::Verbatim {
                    text: text.to_string(),
                    language: None,
                },
                RenderMode::InterviewCards => {
                    SlotBody::Interview(interview_parser::parse(Some(text)))
                }
            };
            Some(RenderSlot {
                field: spec.field,
                title: spec.title,
                subtitle: spec.subtitle,
                body,
            })
        })
        .collect()
}

impl fmt::Display for RenderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "━━━ {} ━━━", self.title)?;
        if let Some(subtitle) = self.subtitle {
            writeln!(f, "{}", subtitle)?;
        }
        writeln!(f)?;

        match &self.body {
            SlotBody::Readable(text) => writeln!(f, "{}", text.trim_end()),
            SlotBody::Verbatim { text, language } => {
                writeln!(f, "```{}", language.unwrap_or(""))?;
                f.write_str(text)?;
                if !text.ends_with('\n') {
                    writeln!(f)?;
                }
                writeln!(f, "```")
            }
            SlotBody::Interview(blocks) => {
                for block in blocks {
                    writeln!(f, "{} {}", block.label(), block.question)?;
                    if !block.answer.is_empty() {
                        writeln!(f, "    {}", block.answer)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeReviewReport, ProjectReport};

    fn project(report: ProjectReport) -> AnalysisResult {
        AnalysisResult::Project(report)
    }

    #[test]
    fn test_each_project_action_reads_its_own_field() {
        let result = project(ProjectReport {
            review_report: Some("review".into()),
            project_explanation: Some("explain".into()),
            interview_questions: Some("Question: q ANSWER: a".into()),
        });

        let review = plan(ActionKind::ProjectReview, &result);
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].body, SlotBody::Readable("review".into()));

        let explain = plan(ActionKind::ProjectExplain, &result);
        assert_eq!(explain[0].title, "Architecture Explanation");

        let interview = plan(ActionKind::Interview, &result);
        match &interview[0].body {
            SlotBody::Interview(blocks) => {
                assert_eq!(blocks.len(), 1);
                assert_eq!(blocks[0].question, "q");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_absent_field_renders_nothing() {
        let result = project(ProjectReport {
            review_report: Some("review".into()),
            ..Default::default()
        });
        assert!(plan(ActionKind::Interview, &result).is_empty());
        assert!(plan(ActionKind::CodeReview, &result).is_empty());
    }

    #[test]
    fn test_empty_project_field_renders_nothing() {
        let result = project(ProjectReport {
            review_report: Some(String::new()),
            project_explanation: Some(String::new()),
            interview_questions: Some(String::new()),
        });
        for action in ActionKind::PROJECT_ACTIONS {
            assert!(plan(action, &result).is_empty(), "action: {action}");
        }
    }

    #[test]
    fn test_empty_single_file_fields_still_render() {
        let result = AnalysisResult::SingleFile(CodeReviewReport {
            review_code: String::new(),
            test_report: String::new(),
            refactored_code: String::new(),
        });
        let slots = plan(ActionKind::CodeReview, &result);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].body, SlotBody::Readable(String::new()));
    }

    #[test]
    fn test_single_file_renders_all_three_in_order() {
        let result = AnalysisResult::SingleFile(CodeReviewReport {
            review_code: "looks fine".into(),
            test_report: "add edge tests".into(),
            refactored_code: "def f():\n    return 1\n".into(),
        });

        let slots = plan(ActionKind::CodeReview, &result);
        let titles: Vec<_> = slots.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["Review Report", "Test Suggestions", "Refactored Code"]
        );
        assert_eq!(
            slots[2].body,
            SlotBody::Verbatim {
                text: "def f():\n    return 1\n".into(),
                language: None,
            }
        );
    }

    #[test]
    fn test_verbatim_display_keeps_whitespace() {
        let slot = RenderSlot {
            field: ResultField::RefactoredCode,
            title: "Refactored Code",
            subtitle: None,
            body: SlotBody::Verbatim {
                text: "if x:\n\t  y()\n".into(),
                language: None,
            },
        }
        .with_language("python");

        let rendered = slot.to_string();
        assert!(rendered.contains("```python\nif x:\n\t  y()\n```"));
    }

    #[test]
    fn test_interview_display_numbers_cards() {
        let result = project(ProjectReport {
            interview_questions: Some("1. Question: A? ANSWER: a\n2. Question: B? ANSWER: b".into()),
            ..Default::default()
        });
        let rendered = plan(ActionKind::Interview, &result)[0].to_string();
        assert!(rendered.contains("Q1. A?"));
        assert!(rendered.contains("Q2. B?"));
        assert!(rendered.contains("Clean structured Q&A"));
    }
}
