use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError, FileError};

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// 分析服务地址
    pub api_base_url: String,
    /// 单次请求超时（秒），由 HTTP 层负责
    pub request_timeout_secs: u64,
    /// PDF 导出目录
    pub output_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 300,
            output_dir: PathBuf::from("."),
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件的结构，所有字段都可省略
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    output_dir: Option<PathBuf>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 按 "默认值 → TOML 文件 → 环境变量" 的顺序加载配置
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();
        if let Some(path) = config_file {
            config = config.merge_toml_file(path)?;
        }
        config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 只从环境变量加载（未设置的项使用默认值）
    pub fn from_env() -> AppResult<Self> {
        let config = Self::default().merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn merge_toml_file(self, path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        debug!("已读取配置文件: {}", path.display());
        Ok(self.merge_file(file))
    }

    fn merge_file(self, file: ConfigFile) -> Self {
        Self {
            api_base_url: file.api_base_url.unwrap_or(self.api_base_url),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(self.request_timeout_secs),
            output_dir: file.output_dir.unwrap_or(self.output_dir),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        }
    }

    fn merge_env<F>(self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_base_url: lookup("AI_STUDIO_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: parse_env(&lookup, "AI_STUDIO_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            output_dir: lookup("AI_STUDIO_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.output_dir),
            verbose_logging: parse_env(&lookup, "AI_STUDIO_VERBOSE", "bool")?
                .unwrap_or(self.verbose_logging),
        })
    }

    fn validate(&self) -> AppResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                reason: "不能为空".to_string(),
            }
            .into());
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: "必须大于 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn parse_env<F, T>(lookup: &F, var_name: &str, expected_type: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()),
        },
    }
}
