//! 原始代码与重构后代码的逐行对比

use similar::{ChangeTag, TextDiff};

/// 对比结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefactorDiff {
    /// unified diff 文本
    pub unified: String,
    pub added: usize,
    pub removed: usize,
}

impl RefactorDiff {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// 生成 unified diff，`file_name` 用于两侧的文件头
pub fn refactor_diff(original: &str, refactored: &str, file_name: &str) -> RefactorDiff {
    let diff = TextDiff::from_lines(original, refactored);

    let mut added = 0;
    let mut removed = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => removed += 1,
            ChangeTag::Equal => {}
        }
    }

    let unified = diff
        .unified_diff()
        .context_radius(3)
        .header(
            &format!("original/{}", file_name),
            &format!("refactored/{}", file_name),
        )
        .to_string();

    RefactorDiff {
        unified,
        added,
        removed,
    }
}
