//! 图片代理
//!
//! 按 `?url=` 拉取任意外部图片，原样转发状态码、响应体和 Content-Type。
//! 不做缓存、大小限制或域名白名单。

use catalog_shared::IMAGE_PROXY_QUERY;
use catalog_shared::protocol::HttpMethod;
use worker::Url;

use crate::error::{ProxyError, ProxyResult};
use crate::utils::request::{HttpClient, HttpRequest};

/// 代理行为配置（来自 Worker `[vars]`）
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// 上游没有返回 Content-Type 时使用
    pub fallback_content_type: String,
    pub user_agent: String,
}

/// 转发给客户端的图片
#[derive(Debug, Clone, PartialEq)]
pub struct ProxiedImage {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// 从请求 URL 中取出已解码的 `url` 参数
pub fn target_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == IMAGE_PROXY_QUERY)
        .map(|(_, v)| v.into_owned())
}

pub struct ImageProxy<'a, C: HttpClient> {
    client: &'a C,
    config: &'a ProxyConfig,
}

impl<'a, C: HttpClient> ImageProxy<'a, C> {
    pub fn new(client: &'a C, config: &'a ProxyConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch(&self, target: Option<&str>) -> ProxyResult<ProxiedImage> {
        let target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProxyError::invalid_input("Missing URL"))?;

        let req = HttpRequest::new(target, HttpMethod::Get)
            .with_header("User-Agent", &self.config.user_agent);

        let resp = self.client.send(req).await.map_err(|e| {
            ProxyError::upstream(e.to_string()).in_op_with("proxy.fetch", target)
        })?;

        let content_type = resp
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| self.config.fallback_content_type.clone());

        Ok(ProxiedImage {
            status: resp.status,
            content_type,
            body: resp.body,
        })
    }
}

// =========================================================
// 单元测试
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProxyErrorStatus;
    use crate::utils::request::MockHttpClient;

    const IMAGE: &str = "https://img.example/chair.png";

    fn config() -> ProxyConfig {
        ProxyConfig {
            fallback_content_type: "image/jpeg".to_string(),
            user_agent: "catalog-image-proxy".to_string(),
        }
    }

    #[test]
    fn test_target_is_percent_decoded() {
        let url = Url::parse(
            "https://worker.dev/api/image-proxy?url=https%3A%2F%2Fimg.example%2Fa%20b.jpg%3Fw%3D400",
        )
        .unwrap();
        assert_eq!(
            target_from_url(&url).as_deref(),
            Some("https://img.example/a b.jpg?w=400")
        );

        let missing = Url::parse("https://worker.dev/api/image-proxy?other=1").unwrap();
        assert_eq!(target_from_url(&missing), None);
    }

    #[tokio::test]
    async fn test_missing_url_is_rejected_without_fetch() {
        let client = MockHttpClient::new();
        let cfg = config();
        let proxy = ImageProxy::new(&client, &cfg);

        for target in [None, Some(""), Some("   ")] {
            let err = proxy.fetch(target).await.unwrap_err();
            assert_eq!(err.status, ProxyErrorStatus::InvalidInput);
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.public_message(), "Missing URL");
        }
        assert!(client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_relays_body_and_content_type() {
        let client = MockHttpClient::new();
        client.mock_response(IMAGE, 200, Some("image/png"), &[0x89, b'P', b'N', b'G']);
        let cfg = config();

        let image = ImageProxy::new(&client, &cfg).fetch(Some(IMAGE)).await.unwrap();

        assert_eq!(image.status, 200);
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.body, vec![0x89, b'P', b'N', b'G']);

        let reqs = client.requests.borrow();
        assert_eq!(reqs[0].method, HttpMethod::Get);
        assert_eq!(
            reqs[0].headers.get("User-Agent").map(String::as_str),
            Some("catalog-image-proxy")
        );
    }

    #[tokio::test]
    async fn test_missing_content_type_falls_back_to_jpeg() {
        let client = MockHttpClient::new();
        client.mock_response(IMAGE, 200, None, b"raw");
        let cfg = config();

        let image = ImageProxy::new(&client, &cfg).fetch(Some(IMAGE)).await.unwrap();
        assert_eq!(image.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_upstream_status_is_relayed() {
        let client = MockHttpClient::new();
        client.mock_response(IMAGE, 404, Some("text/html"), b"<h1>gone</h1>");
        let cfg = config();

        let image = ImageProxy::new(&client, &cfg).fetch(Some(IMAGE)).await.unwrap();
        assert_eq!(image.status, 404);
        assert_eq!(image.content_type, "text/html");
    }

    #[tokio::test]
    async fn test_transport_failure_is_bad_gateway() {
        let client = MockHttpClient::new();
        let cfg = config();

        let err = ImageProxy::new(&client, &cfg)
            .fetch(Some("https://down.example/x.jpg"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 502);
        assert_eq!(err.public_message(), "Bad Gateway");
        assert!(err.to_string().contains("proxy.fetch(https://down.example/x.jpg)"));
    }
}
