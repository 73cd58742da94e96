//! PDF 导出 - 业务能力层
//!
//! 把后端返回的二进制 PDF 以固定文件名交给 `BinarySink` 保存。

use std::path::PathBuf;

use tracing::info;

use crate::error::{ApiError, AppResult};
use crate::infrastructure::BinarySink;
use crate::models::Flow;

pub struct ExportGateway<S> {
    sink: S,
}

impl<S: BinarySink> ExportGateway<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// 保存导出的 PDF
    ///
    /// 空内容视为失败，不落盘。
    pub fn export(&self, flow: Flow, payload: &[u8]) -> AppResult<PathBuf> {
        if payload.is_empty() {
            return Err(ApiError::EmptyResponse {
                endpoint: flow.pdf_path().to_string(),
            }
            .into());
        }

        let path = self
            .sink
            .save_binary_as_file(payload, flow.export_file_name())?;
        info!("[{}] 📄 PDF 已保存: {}", flow, path.display());
        Ok(path)
    }
}
