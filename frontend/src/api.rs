//! 商品目录 API 客户端
//!
//! 每个接口由 `catalog_shared::protocol` 中的 `ApiRequest` 描述，
//! 这里负责统一的鉴权头、序列化与错误映射。令牌缺失时直接短路，不发请求。

use crate::web::http::{FetchClient, HttpClient, HttpError, HttpRequest, HttpResponse};
use catalog_shared::listing::ListQuery;
use catalog_shared::protocol::{
    ApiRequest, DeleteProduct, GetProduct, ListCategories, UpdateProduct,
};
use catalog_shared::{
    CONTENT_TYPE_JSON, Category, CreateProductRequest, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE,
    LoginRequest, Product, ServerError, UpdateProductRequest, bearer,
};
use leptos::logging::warn;
use serde::de::DeserializeOwned;

/// API 调用错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 本地没有令牌，请求未发出
    MissingToken,
    /// 网络或传输层失败
    Transport(HttpError),
    /// 服务端返回非 2xx
    Status { status: u16, message: String },
    /// 响应体无法解析
    Decode(String),
    /// 请求体无法序列化
    Encode(String),
    /// 登录成功但响应里没有令牌
    MissingCredential,
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::MissingToken => write!(f, "No token found! Please log in first."),
            ApiError::Transport(e) => write!(f, "{}", e),
            ApiError::Status { message, .. } => write!(f, "{}", message),
            ApiError::Decode(msg) => write!(f, "Unexpected response from server: {}", msg),
            ApiError::Encode(msg) => write!(f, "Request could not be encoded: {}", msg),
            ApiError::MissingCredential => write!(f, "Login response did not include a token"),
        }
    }
}

/// 非 2xx 响应：优先使用服务端的 `message`，否则给出通用提示
fn status_error(action: &str, resp: &HttpResponse) -> ApiError {
    let message = serde_json::from_str::<ServerError>(&resp.body)
        .ok()
        .and_then(ServerError::into_message)
        .unwrap_or_else(|| format!("Failed to {}: {}", action, resp.status));

    ApiError::Status {
        status: resp.status,
        message,
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    // 空响应体按 null 处理，供 DELETE/PUT 这类不关心返回值的接口使用
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct CatalogApi<C = FetchClient> {
    client: C,
    base_url: String,
    token: Option<String>,
}

impl CatalogApi<FetchClient> {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self::with_client(FetchClient, base_url, token)
    }
}

impl<C: HttpClient> CatalogApi<C> {
    pub fn with_client(client: C, base_url: &str, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 执行一个接口描述
    pub async fn execute<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let result = self.execute_inner(req).await;
        if let Err(e) = &result {
            warn!("[Api] {} failed: {}", R::ACTION, e);
        }
        result
    }

    async fn execute_inner<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let mut http = HttpRequest::new(self.url(&req.path()), R::METHOD)
            .header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        if R::REQUIRES_AUTH {
            let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
            http = http.header(HEADER_AUTHORIZATION, &bearer(token));
        }

        if let Some(body) = req.body() {
            let json = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
            http = http.body(json);
        }

        let resp = self.client.send(http).await.map_err(ApiError::Transport)?;
        if !resp.ok() {
            return Err(status_error(R::ACTION, &resp));
        }
        decode(&resp.body)
    }

    /// 登录，返回令牌（不负责保存）
    pub async fn login(&self, email: &str) -> Result<String, ApiError> {
        let req = LoginRequest {
            email: email.trim().to_string(),
        };
        self.execute(&req)
            .await?
            .into_token()
            .ok_or(ApiError::MissingCredential)
    }

    /// 按列表视图的查询拉取商品：分页接口或搜索接口
    pub async fn list_products(&self, query: &ListQuery) -> Result<Vec<Product>, ApiError> {
        let listing = match query {
            ListQuery::Page(page) => self.execute(page).await?,
            ListQuery::Search(search) => self.execute(search).await?,
        };
        Ok(listing.into_vec())
    }

    pub async fn get_product(&self, key: &str) -> Result<Product, ApiError> {
        self.execute(&GetProduct {
            key: key.to_string(),
        })
        .await
    }

    pub async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, ApiError> {
        self.execute(req).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        changes: UpdateProductRequest,
    ) -> Result<(), ApiError> {
        self.execute(&UpdateProduct {
            id: id.to_string(),
            changes,
        })
        .await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.execute(&DeleteProduct { id: id.to_string() }).await?;
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.execute(&ListCategories).await?.into_vec())
    }
}

// =========================================================
// 单元测试
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::{MOCK_BASE as BASE, MockHttpClient};
    use catalog_shared::listing::ListView;
    use serde_json::json;

    fn product(id: usize) -> serde_json::Value {
        json!({ "id": id.to_string(), "name": format!("Item {}", id), "price": 10, "slug": format!("item-{}", id) })
    }

    #[tokio::test]
    async fn test_missing_token_short_circuits() {
        let client = MockHttpClient::new();
        let api = CatalogApi::with_client(&client, BASE, None);

        let result = api.list_products(&ListView::new(8).query()).await;
        assert_eq!(result, Err(ApiError::MissingToken));
        assert_eq!(
            result.unwrap_err().to_string(),
            "No token found! Please log in first."
        );
        assert!(client.requests.borrow().is_empty());

        let empty = CatalogApi::with_client(&client, BASE, Some(String::new()));
        assert_eq!(
            empty.delete_product("p1").await,
            Err(ApiError::MissingToken)
        );
        assert!(client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_list_attaches_bearer_token() {
        let client = MockHttpClient::new();
        let page: Vec<_> = (0..8).map(product).collect();
        client.mock("GET", "/products?offset=0&limit=8", 200, json!(page));

        let api = CatalogApi::with_client(&client, "https://api.test/", Some("tok".into()));
        let view = ListView::new(8);
        let items = api.list_products(&view.query()).await.unwrap();

        assert_eq!(items.len(), 8);
        assert!(view.next_enabled(items.len()));

        let reqs = client.requests.borrow();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].header_value("authorization"), Some("Bearer tok"));
        assert_eq!(reqs[0].header_value("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_short_page_disables_next() {
        let client = MockHttpClient::new();
        client.mock(
            "GET",
            "/products?offset=8&limit=8",
            200,
            json!({ "products": [product(9), product(10)] }),
        );

        let api = CatalogApi::with_client(&client, BASE, Some("tok".into()));
        let mut view = ListView::new(8);
        view.go_next();
        let items = api.list_products(&view.query()).await.unwrap();

        assert_eq!(items.len(), 2);
        assert!(!view.next_enabled(items.len()));
        assert!(view.shows_pagination(items.len()));
    }

    #[tokio::test]
    async fn test_search_uses_search_endpoint() {
        let client = MockHttpClient::new();
        client.mock(
            "GET",
            "/products/search?searchedText=oak%20chair",
            200,
            json!([product(1)]),
        );

        let api = CatalogApi::with_client(&client, BASE, Some("tok".into()));
        let mut view = ListView::new(8);
        view.set_search(" oak chair ");
        let items = api.list_products(&view.query()).await.unwrap();

        assert_eq!(items.len(), 1);
        assert!(!view.shows_pagination(items.len()));
        let reqs = client.requests.borrow();
        assert!(reqs[0].url.contains("/products/search"));
        assert!(!reqs[0].url.contains("offset="));
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced() {
        let client = MockHttpClient::new();
        client.mock(
            "DELETE",
            "/products/p1",
            403,
            json!({ "message": "You cannot delete this product" }),
        );

        let api = CatalogApi::with_client(&client, BASE, Some("tok".into()));
        let err = api.delete_product("p1").await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 403, .. }));
        assert_eq!(err.to_string(), "You cannot delete this product");
    }

    #[tokio::test]
    async fn test_unauthorized_is_a_plain_error() {
        let client = MockHttpClient::new();
        client.mock_raw("GET", "/products/lamp", 401, "Unauthorized");

        let api = CatalogApi::with_client(&client, BASE, Some("expired".into()));
        let err = api.get_product("lamp").await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 401, .. }));
        assert_eq!(err.to_string(), "Failed to fetch product: 401");
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let client = MockHttpClient::new();
        client.mock_raw("DELETE", "/products/p1", 200, "");

        let api = CatalogApi::with_client(&client, BASE, Some("tok".into()));
        assert_eq!(api.delete_product("p1").await, Ok(()));
        assert_eq!(client.requests.borrow()[0].method.as_str(), "DELETE");
    }

    #[tokio::test]
    async fn test_update_sends_name_and_description_only() {
        let client = MockHttpClient::new();
        client.mock("PUT", "/products/p1", 200, product(1));

        let api = CatalogApi::with_client(&client, BASE, Some("tok".into()));
        let changes = UpdateProductRequest {
            name: "Lamp".into(),
            description: "Bright".into(),
        };
        api.update_product("p1", changes).await.unwrap();

        let reqs = client.requests.borrow();
        let body: serde_json::Value =
            serde_json::from_str(reqs[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "name": "Lamp", "description": "Bright" }));
    }

    #[tokio::test]
    async fn test_login_is_public_and_reads_either_token_field() {
        let client = MockHttpClient::new();
        client.mock("POST", "/auth", 201, json!({ "token": "legacy" }));

        let api = CatalogApi::with_client(&client, BASE, None);
        assert_eq!(api.login(" a@b.c ").await.unwrap(), "legacy");

        let reqs = client.requests.borrow();
        assert!(reqs[0].header_value("authorization").is_none());
        assert_eq!(reqs[0].body.as_deref(), Some(r#"{"email":"a@b.c"}"#));
    }

    #[tokio::test]
    async fn test_login_without_token_fails() {
        let client = MockHttpClient::new();
        client.mock("POST", "/auth", 200, json!({ "user": "x" }));

        let api = CatalogApi::with_client(&client, BASE, None);
        assert_eq!(api.login("a@b.c").await, Err(ApiError::MissingCredential));
    }

    #[tokio::test]
    async fn test_network_failure_is_not_retried() {
        let client = MockHttpClient::offline();
        let api = CatalogApi::with_client(&client, BASE, Some("tok".into()));

        let err = api.list_categories().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(HttpError::NetworkError(_))));
        assert_eq!(client.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decode_error() {
        let client = MockHttpClient::new();
        client.mock_raw("GET", "/products/lamp", 200, "<html>");

        let api = CatalogApi::with_client(&client, BASE, Some("tok".into()));
        assert!(matches!(
            api.get_product("lamp").await,
            Err(ApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_categories_accept_data_envelope() {
        let client = MockHttpClient::new();
        client.mock(
            "GET",
            "/categories",
            200,
            json!({ "data": [{ "id": "c1", "name": "Furniture" }] }),
        );

        let api = CatalogApi::with_client(&client, BASE, Some("tok".into()));
        let categories = api.list_categories().await.unwrap();
        assert_eq!(categories[0].name, "Furniture");
    }
}
