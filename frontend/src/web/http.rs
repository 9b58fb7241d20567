//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 发送请求，并通过 `HttpClient` trait 抽象传输层，
//! 便于在原生目标上用 Mock 客户端测试 API 层。

use async_trait::async_trait;
use catalog_shared::protocol::HttpMethod;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

#[cfg(test)]
use std::{cell::RefCell, collections::HashMap};

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应读取失败
    ResponseReadFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "Request could not be built: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            HttpError::ResponseReadFailed(msg) => write!(f, "Response could not be read: {}", msg),
        }
    }
}

/// 待发送的请求
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置请求体
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// 按名称（忽略大小写）查找请求头
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 已读取完整响应体的响应
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: 浏览器 fetch
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    async fn read_text(response: &Response) -> Result<String, HttpError> {
        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::ResponseReadFailed("body is not a string".to_string()))
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("Headers: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("Header {}: {:?}", key, e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("window is unavailable".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ResponseReadFailed(format!("not a Response: {:?}", e)))?;

        let status = response.status();
        let body = Self::read_text(&response).await?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub const MOCK_BASE: &str = "https://api.test";

#[cfg(test)]
pub struct MockHttpClient {
    // (Method URL) -> (Status, Body)
    responses: RefCell<HashMap<String, (u16, String)>>,
    fail_network: bool,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            fail_network: false,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// 所有请求都以网络错误失败
    pub fn offline() -> Self {
        Self {
            fail_network: true,
            ..Self::new()
        }
    }

    pub fn mock(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.mock_raw(method, path, status, &body.to_string());
    }

    pub fn mock_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.responses.borrow_mut().insert(
            format!("{} {}{}", method, MOCK_BASE, path),
            (status, body.to_string()),
        );
    }
}

#[cfg(test)]
#[async_trait(?Send)]
impl HttpClient for &MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(req.clone());
        if self.fail_network {
            return Err(HttpError::NetworkError("connection refused".into()));
        }
        // 未注册的路由返回 404
        let key = format!("{} {}", req.method.as_str(), req.url);
        let (status, body) = self
            .responses
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or((404, r#"{"message":"Not Found"}"#.to_string()));
        Ok(HttpResponse { status, body })
    }
}
