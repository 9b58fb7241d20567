use catalog_shared::protocol::HttpMethod;
use std::collections::HashMap;
use worker::{Fetch, Headers, Request, RequestInit, Result};

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

fn worker_method(m: HttpMethod) -> worker::Method {
    match m {
        HttpMethod::Get => worker::Method::Get,
        HttpMethod::Post => worker::Method::Post,
        HttpMethod::Put => worker::Method::Put,
        HttpMethod::Delete => worker::Method::Delete,
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }
}

/// 二进制响应（图片等）
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse>;
}

// =========================================================
// 实现层: Worker 客户端
// =========================================================

#[derive(Clone)]
pub struct WorkerHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for WorkerHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let headers = Headers::new();
        for (k, v) in &req.headers {
            headers.set(k, v)?;
        }

        let init = RequestInit {
            method: worker_method(req.method),
            headers,
            ..Default::default()
        };

        let worker_req = Request::new_with_init(&req.url, &init)?;
        let mut response = Fetch::Request(worker_req).send().await?;

        Ok(HttpResponse {
            status: response.status_code(),
            content_type: response.headers().get("Content-Type")?,
            body: response.bytes().await?,
        })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> Response
    responses: RefCell<HashMap<String, HttpResponse>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, content_type: Option<&str>, body: &[u8]) {
        self.responses.borrow_mut().insert(
            url.to_string(),
            HttpResponse {
                status,
                content_type: content_type.map(str::to_string),
                body: body.to_vec(),
            },
        );
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(req.clone());

        // 未注册的 URL 视为网络不可达
        self.responses
            .borrow()
            .get(&req.url)
            .cloned()
            .ok_or_else(|| worker::Error::RustError(format!("unreachable host: {}", req.url)))
    }
}
