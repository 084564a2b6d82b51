use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use tracing::debug;

use crate::config::ApiConfig;
use crate::errors::{ClientError, Result};

use super::{ApiRequest, HttpMethod, RawResponse, Transport};

/// 基于 reqwest 的传输实现
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

/// 安装 rustls 的 ring 加密后端，重复调用无副作用
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        install_crypto_provider();

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            ClientError::configuration(format!("Invalid API base URL '{}': {e}", config.base_url))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::configuration(format!("Failed to build HTTP client: {e}")))?;

        debug!(
            "HTTP transport ready: base_url={}, timeout={}ms",
            base_url, config.timeout_ms
        );

        Ok(Self { client, base_url })
    }

    /// 绝对地址原样使用，相对路径拼接到基础地址之后
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// 没有收到响应的失败归为网络错误，其余（构造请求、重定向、读取响应体）为意外错误
fn classify(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::network("Request timed out, please check your network connection")
    } else if err.is_connect() {
        ClientError::network("Network unreachable, please check your network connection")
    } else if err.is_request() {
        ClientError::network(format!("Network request failed: {err}"))
    } else {
        ClientError::unexpected(format!("Unexpected HTTP failure: {err}"))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<RawResponse> {
        let url = self.url_for(&request.path);

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        debug!(
            method = %request.method,
            path = %request.path,
            status,
            retried = request.is_retried(),
            "HTTP exchange completed"
        );

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            timeout_ms: 1_000,
            user_agent: "logindemo-client/test".to_string(),
        }
    }

    #[test]
    fn test_url_for_joins_relative_paths() {
        let transport = ReqwestTransport::new(&api_config("http://127.0.0.1:8080/api/")).unwrap();
        assert_eq!(
            transport.url_for("/users/me"),
            "http://127.0.0.1:8080/api/users/me"
        );
        assert_eq!(
            transport.url_for("auth/login"),
            "http://127.0.0.1:8080/api/auth/login"
        );
    }

    #[test]
    fn test_url_for_keeps_absolute_urls() {
        let transport = ReqwestTransport::new(&api_config("http://127.0.0.1:8080/api")).unwrap();
        assert_eq!(
            transport.url_for("https://cdn.example.com/qr.png"),
            "https://cdn.example.com/qr.png"
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = ReqwestTransport::new(&api_config("not a url"))
            .err()
            .expect("invalid base url must be rejected");
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // 端口 9 (discard) 在测试环境中通常没有监听
        let transport = ReqwestTransport::new(&api_config("http://127.0.0.1:9/api")).unwrap();
        let err = transport
            .send(&ApiRequest::get("/users/me"), None)
            .await
            .unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_request_build_failure_is_unexpected() {
        let err = reqwest::Client::new()
            .get("http://[::1")
            .build()
            .unwrap_err();
        let classified = classify(err);
        assert!(classified.is_unexpected());
        assert!(!classified.is_network());
    }
}
