use crate::{
    CategoryListing, CreateProductRequest, LoginRequest, LoginResponse, Product, ProductListing,
    UpdateProductRequest,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned, de::IgnoredAny};
use urlencoding::encode;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// JSON body sent with the request. `()` for body-less endpoints.
    type Body: Serialize;
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether a bearer token must be attached.
    const REQUIRES_AUTH: bool = true;
    /// A short label used in fallback error messages.
    const ACTION: &'static str;

    /// The URL path (with query string), relative to the API base.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange an email for a token
impl ApiRequest for LoginRequest {
    type Body = Self;
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;
    const ACTION: &'static str = "log in";

    fn path(&self) -> String {
        "/auth".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// One page of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListProducts {
    pub offset: usize,
    pub limit: usize,
}

impl ApiRequest for ListProducts {
    type Body = ();
    type Response = ProductListing;
    const METHOD: HttpMethod = HttpMethod::Get;
    const ACTION: &'static str = "fetch products";

    fn path(&self) -> String {
        format!("/products?offset={}&limit={}", self.offset, self.limit)
    }
}

/// Free-text search over the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProducts {
    pub searched_text: String,
}

impl ApiRequest for SearchProducts {
    type Body = ();
    type Response = ProductListing;
    const METHOD: HttpMethod = HttpMethod::Get;
    const ACTION: &'static str = "search products";

    fn path(&self) -> String {
        format!("/products/search?searchedText={}", encode(&self.searched_text))
    }
}

/// Fetch a single product. The details view passes a slug, the edit form an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetProduct {
    pub key: String,
}

impl ApiRequest for GetProduct {
    type Body = ();
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Get;
    const ACTION: &'static str = "fetch product";

    fn path(&self) -> String {
        format!("/products/{}", encode(&self.key))
    }
}

impl ApiRequest for CreateProductRequest {
    type Body = Self;
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Post;
    const ACTION: &'static str = "create product";

    fn path(&self) -> String {
        "/products".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub id: String,
    pub changes: UpdateProductRequest,
}

impl ApiRequest for UpdateProduct {
    type Body = UpdateProductRequest;
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Put;
    const ACTION: &'static str = "update product";

    fn path(&self) -> String {
        format!("/products/{}", encode(&self.id))
    }

    fn body(&self) -> Option<&UpdateProductRequest> {
        Some(&self.changes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteProduct {
    pub id: String,
}

impl ApiRequest for DeleteProduct {
    type Body = ();
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const ACTION: &'static str = "delete product";

    fn path(&self) -> String {
        format!("/products/{}", encode(&self.id))
    }
}

/// Categories for the create form dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCategories;

impl ApiRequest for ListCategories {
    type Body = ();
    type Response = CategoryListing;
    const METHOD: HttpMethod = HttpMethod::Get;
    const ACTION: &'static str = "fetch categories";

    fn path(&self) -> String {
        "/categories".to_string()
    }
}
