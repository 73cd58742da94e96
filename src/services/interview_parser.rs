//! 面试问答文本解析 - 业务能力层
//!
//! 把后端返回的整段问答文本切成有序的 `InterviewBlock`。
//! 只认两个字面分隔符：`Question:` 与 `ANSWER:`，不做任何语义校验。

use std::sync::LazyLock;

use regex::Regex;

use crate::models::InterviewBlock;

const QUESTION_TOKEN: &str = "Question:";
const ANSWER_TOKEN: &str = "ANSWER:";

/// 行首编号，例如 `1. `、`  12.\t`、`3.` 后直接换行；连续的编号一次剥净
static LEADING_NUMBERING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:[ \t]*\d+\.\s+)+").expect("numbering pattern is valid")
});

/// 去掉每一行行首的序号
pub fn strip_numbering(text: &str) -> String {
    LEADING_NUMBERING.replace_all(text, "").into_owned()
}

/// 解析问答文本
///
/// 空输入或只有空白时返回空列表；永远不会报错。
pub fn parse(text: Option<&str>) -> Vec<InterviewBlock> {
    let Some(text) = text else {
        return Vec::new();
    };
    if text.trim().is_empty() {
        return Vec::new();
    }

    let cleaned = strip_numbering(text);

    cleaned
        .split(QUESTION_TOKEN)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(i, segment)| split_segment(i + 1, segment))
        .collect()
}

fn split_segment(index: usize, segment: &str) -> InterviewBlock {
    let (question, answer) = match segment.split_once(ANSWER_TOKEN) {
        Some((question, answer)) => (question, answer),
        None => (segment, ""),
    };

    InterviewBlock {
        index,
        question: question.trim().to_string(),
        answer: answer.trim().to_string(),
    }
}
