//! HTTP 层
//!
//! - [`Transport`]: 发送单个请求的最小接口，默认实现为 [`ReqwestTransport`]
//! - [`ApiClient`]: 附加 Bearer 令牌，并在 401 时执行一次“刷新后重发”

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::{ClientError, Result};
use crate::models::ApiResponse;

pub mod client;
pub mod reqwest_transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::ApiClient;
pub use reqwest_transport::{ReqwestTransport, install_crypto_provider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一个逻辑请求
///
/// 重试标记跟随请求本身，而不是全局状态：同一个请求最多刷新并重发一次。
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub requires_auth: bool,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            requires_auth: true,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// 不需要登录的接口（登录、注册、验证码等）
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub(crate) fn mark_retried(&mut self) {
        self.retried = true;
    }
}

/// 传输层返回的原始响应
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// 响应体中的 `message` 字段（非空时）
    pub fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    /// 按统一响应结构解析
    ///
    /// 非 2xx 时优先使用服务端消息，否则给出带状态码的兜底消息；
    /// 2xx 时以业务码 `code == 200` 判断成功。
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            let message = self
                .server_message()
                .unwrap_or_else(|| format!("Request failed ({})", self.status));
            return Err(ClientError::http(message));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&self.body)
            .map_err(|e| ClientError::serialization(format!("Malformed response: {e}")))?;
        envelope.into_data()
    }
}

/// 发送请求的平台原语
///
/// 实现只负责一次收发；连接失败与超时必须归类为 [`ClientError::Network`]。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<RawResponse>;
}
