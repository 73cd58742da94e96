pub mod code_diff;
pub mod export_gateway;
pub mod interview_parser;
pub mod language;
pub mod result_adapter;

pub use code_diff::{refactor_diff, RefactorDiff};
pub use export_gateway::ExportGateway;
pub use language::detect_language;
pub use result_adapter::{plan, RenderMode, RenderSlot, SlotBody, SlotSpec};
