pub mod action;
pub mod report;
pub mod selected_file;

pub use action::{ActionKind, Flow};
pub use report::{AnalysisResult, CodeReviewReport, InterviewBlock, ProjectReport, ResultField};
pub use selected_file::SelectedFile;
