use std::path::Path;
use std::sync::Arc;

use tokio::fs;

use crate::error::{AppError, AppResult, FileError};

/// 用户选中的文件
///
/// 内容只读共享；换文件时整体替换，从不局部修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    /// 从磁盘读取文件（除存在性外不做任何校验）
    pub async fn load(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Err(FileError::NotFound { path: display }.into());
        }

        let bytes = fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(display.clone(), e))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(display);

        Ok(Self::new(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 按 UTF-8 解读内容，非法字节被替换
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = SelectedFile::load(&dir.path().join("absent.py"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_keeps_file_name_and_bytes() {
        let mut tmp = tempfile::Builder::new().suffix(".py").tempfile().unwrap();
        tmp.write_all(b"print('hi')\n").unwrap();

        let file = SelectedFile::load(tmp.path()).await.unwrap();
        assert!(file.name().ends_with(".py"));
        assert_eq!(file.bytes(), b"print('hi')\n");
        assert_eq!(file.text_lossy(), "print('hi')\n");
    }
}
