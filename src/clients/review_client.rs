/// 分析服务客户端
///
/// 封装所有与远端分析服务的 HTTP 交互：单次请求，无重试，无流式。
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{
    ActionKind, AnalysisResult, CodeReviewReport, Flow, ProjectReport, SelectedFile,
};
use crate::utils::truncate_text;

/// 一次分析或导出请求的内容（两者请求体相同）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub flow: Flow,
    pub action: ActionKind,
    pub file: SelectedFile,
}

impl ReviewRequest {
    /// multipart 中除文件外的文本字段
    pub fn text_fields(&self) -> Vec<(&'static str, &'static str)> {
        if self.flow.sends_action() {
            vec![("action", self.action.code())]
        } else {
            Vec::new()
        }
    }
}

/// 分析服务接口
///
/// 会话只依赖这个接口，测试里可以换成内存实现。
#[allow(async_fn_in_trait)]
pub trait ReviewBackend {
    /// 提交分析，返回结构化结果
    async fn analyze(&self, request: &ReviewRequest) -> AppResult<AnalysisResult>;

    /// 提交同样的请求体，返回 PDF 二进制
    async fn export_pdf(&self, request: &ReviewRequest) -> AppResult<Vec<u8>>;
}

/// 基于 reqwest 的实现
pub struct ReviewClient {
    http: Client,
    base_url: String,
}

impl ReviewClient {
    /// 创建新的客户端，超时取自配置
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(config.api_base_url.clone(), e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 拼接完整的接口地址
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build_form(request: &ReviewRequest) -> Form {
        let part = Part::bytes(request.file.bytes().to_vec())
            .file_name(request.file.name().to_string());

        request
            .text_fields()
            .into_iter()
            .fold(Form::new().part("file", part), |form, (key, value)| {
                form.text(key, value)
            })
    }

    /// 发送 multipart 请求并检查状态码
    async fn post(&self, path: &str, request: &ReviewRequest) -> AppResult<reqwest::Response> {
        let url = self.endpoint(path);
        debug!(
            "POST {} (文件: {}, {} 字节, 动作: {})",
            url,
            request.file.name(),
            request.file.len(),
            request.action
        );

        let response = self
            .http
            .post(&url)
            .multipart(Self::build_form(request))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("{} 返回 {}: {}", path, status, truncate_text(&message, 200));
            return Err(ApiError::BadResponse {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response)
    }
}

impl ReviewBackend for ReviewClient {
    async fn analyze(&self, request: &ReviewRequest) -> AppResult<AnalysisResult> {
        let path = request.flow.analyze_path();
        let response = self.post(path, request).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;
        let value: Value =
            serde_json::from_slice(&body).map_err(|e| ApiError::JsonParseFailed {
                endpoint: path.to_string(),
                source: e,
            })?;

        decode_analysis(request.flow, value)
    }

    async fn export_pdf(&self, request: &ReviewRequest) -> AppResult<Vec<u8>> {
        let path = request.flow.pdf_path();
        let response = self.post(path, request).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;
        debug!("{} 返回 {} 字节", path, body.len());

        Ok(body.to_vec())
    }
}

/// 把分析接口的 JSON 转成对应流程的结果
///
/// 后端对未知动作会回 `{"error": "..."}`，这里当作失败处理。
pub fn decode_analysis(flow: Flow, value: Value) -> AppResult<AnalysisResult> {
    let path = flow.analyze_path();

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(ApiError::BackendRejected {
            endpoint: path.to_string(),
            message: message.to_string(),
        }
        .into());
    }
    if !value.is_object() {
        return Err(ApiError::EmptyResponse {
            endpoint: path.to_string(),
        }
        .into());
    }

    let parse_failed = |e| ApiError::JsonParseFailed {
        endpoint: path.to_string(),
        source: e,
    };

    let result = match flow {
        Flow::Project => AnalysisResult::Project(
            serde_json::from_value::<ProjectReport>(value).map_err(parse_failed)?,
        ),
        Flow::SingleFile => AnalysisResult::SingleFile(
            serde_json::from_value::<CodeReviewReport>(value).map_err(parse_failed)?,
        ),
    };

    Ok(result)
}
