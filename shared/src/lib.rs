use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

pub mod debounce;
pub mod draft;
pub mod image;
pub mod listing;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const DEFAULT_API_BASE: &str = "https://api.bitechx.com";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 浏览器 LocalStorage 中保存令牌的键
pub const STORAGE_TOKEN_KEY: &str = "token";

/// 列表每页条数
pub const PAGE_SIZE: usize = 8;
/// 搜索输入的防抖间隔（毫秒）
pub const SEARCH_DEBOUNCE_MS: u32 = 500;
/// 更新成功后跳转回列表前的停留时间（毫秒）
pub const UPDATE_REDIRECT_DELAY_MS: u32 = 1200;

pub const IMAGE_PROXY_PATH: &str = "/api/image-proxy";
pub const IMAGE_PROXY_QUERY: &str = "url";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x300?text=No+Image";

/// 将 JSON `null` 视为字段默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 时间戳的几种写法；无法识别的值一律忽略
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
    Other(IgnoredAny),
}

/// 宽松解析时间戳：RFC 3339、纯日期或毫秒时间戳，其余视为缺失
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(text)) => parse_timestamp(text.trim()),
        Some(RawTimestamp::Millis(ms)) => DateTime::from_timestamp_millis(ms),
        Some(RawTimestamp::Other(_)) | None => None,
    })
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 构造 `Bearer` 认证头的值
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// 商品图片：接口有时返回 URL 数组，有时只返回单个 URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductImages {
    Many(Vec<String>),
    One(String),
}

impl ProductImages {
    /// 第一张非空图片
    pub fn primary(&self) -> Option<&str> {
        match self {
            ProductImages::Many(list) => list
                .iter()
                .map(|s| s.trim())
                .find(|s| !s.is_empty()),
            ProductImages::One(url) => Some(url.trim()).filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default)]
    pub images: Option<ProductImages>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.as_ref().and_then(ProductImages::primary)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
    }

    /// 详情页使用的标识；没有 slug 的旧数据退回到 id
    pub fn detail_key(&self) -> &str {
        if self.slug.is_empty() {
            &self.id
        } else {
            &self.slug
        }
    }

    /// 价格展示，如 `$12.50`
    pub fn display_price(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("${}", self.price as i64)
        } else {
            format!("${:.2}", self.price)
        }
    }

    pub fn display_description(&self) -> &str {
        let text = self.description.trim();
        if text.is_empty() {
            "No description available"
        } else {
            text
        }
    }

    /// 创建日期，如 `May 1, 2024`
    pub fn display_created_at(&self) -> Option<String> {
        self.created_at
            .map(|at| at.format("%B %-d, %Y").to_string())
    }
}

// =========================================================
// 请求 / 响应载荷 (Payloads)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// 登录响应：不同版本的接口把令牌放在 `access_token` 或 `token` 中
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// 提取令牌，`access_token` 优先
    pub fn into_token(self) -> Option<String> {
        self.access_token
            .filter(|t| !t.is_empty())
            .or(self.token.filter(|t| !t.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    pub category_id: String,
}

/// 编辑表单只允许修改名称和描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub description: String,
}

/// 列表中的单条记录；无法解析的记录被跳过，不影响同页其他商品
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListingEntry {
    Product(Product),
    Malformed(IgnoredAny),
}

/// 商品列表响应：裸数组，或 `{ "products": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductListing {
    List(Vec<ListingEntry>),
    Wrapped {
        #[serde(default)]
        products: Vec<ListingEntry>,
    },
}

impl ProductListing {
    pub fn into_vec(self) -> Vec<Product> {
        let entries = match self {
            ProductListing::List(list) => list,
            ProductListing::Wrapped { products } => products,
        };
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                ListingEntry::Product(p) => Some(p),
                ListingEntry::Malformed(_) => None,
            })
            .collect()
    }
}

/// 分类列表响应：裸数组，或 `{ "data": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryListing {
    List(Vec<Category>),
    Wrapped {
        #[serde(default)]
        data: Vec<Category>,
    },
}

impl CategoryListing {
    pub fn into_vec(self) -> Vec<Category> {
        match self {
            CategoryListing::List(list) => list,
            CategoryListing::Wrapped { data } => data,
        }
    }
}

/// 错误响应体中的 `message` 字段：字符串或字符串数组
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerError {
    pub message: ServerMessage,
}

impl ServerError {
    pub fn into_message(self) -> Option<String> {
        let text = match self.message {
            ServerMessage::Text(s) => s,
            ServerMessage::List(list) => list.join(", "),
        };
        let text = text.trim().to_string();
        if text.is_empty() { None } else { Some(text) }
    }
}
