//! 文件落盘 - 基础设施层
//!
//! 只暴露 "把一段二进制存成文件" 的能力，不认识报告、流程或动作。

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 保存二进制内容的能力
///
/// 不同平台可以有不同实现（写磁盘、触发浏览器下载等），调用方只依赖这个接口。
pub trait BinarySink {
    /// 保存内容，返回最终位置
    fn save_binary_as_file(&self, payload: &[u8], suggested_name: &str) -> AppResult<PathBuf>;
}

/// 写入本地目录
///
/// 先写同目录下的临时文件再原子改名，失败时不会留下半截文件。
#[derive(Debug, Clone)]
pub struct DiskSink {
    dir: PathBuf,
}

impl DiskSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BinarySink for DiskSink {
    fn save_binary_as_file(&self, payload: &[u8], suggested_name: &str) -> AppResult<PathBuf> {
        let target = self.dir.join(suggested_name);
        let target_display = target.display().to_string();

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::file_write_failed(self.dir.display().to_string(), e))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| AppError::file_write_failed(target_display.clone(), e))?;
        tmp.write_all(payload)
            .and_then(|_| tmp.flush())
            .map_err(|e| AppError::file_write_failed(target_display.clone(), e))?;

        tmp.persist(&target)
            .map_err(|e| AppError::file_write_failed(target_display.clone(), e.error))?;

        debug!("已写入 {} ({} 字节)", target_display, payload.len());
        Ok(target)
    }
}
