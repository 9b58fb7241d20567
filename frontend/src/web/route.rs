//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::borrow::Cow;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 商品列表
    Products,
    /// 新建商品
    CreateProduct,
    /// 商品详情（按 slug）
    ProductDetails { slug: String },
    /// 编辑商品（按 id）
    EditProduct { id: String },
    /// 页面未找到
    NotFound,
}

/// 取出单个非空路径段并做百分号解码（先切分再解码，`%2F` 留在段内）
fn single_segment(rest: &str) -> Option<String> {
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    urlencoding::decode(rest).ok().map(Cow::into_owned)
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("/");
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match trimmed {
            "/" | "" | "/login" => return Self::Login,
            "/products" => return Self::Products,
            "/products/create" => return Self::CreateProduct,
            _ => {}
        }

        if let Some(rest) = trimmed.strip_prefix("/products/details/") {
            if let Some(slug) = single_segment(rest) {
                return Self::ProductDetails { slug };
            }
        }
        if let Some(rest) = trimmed.strip_prefix("/products/edit/") {
            if let Some(id) = single_segment(rest) {
                return Self::EditProduct { id };
            }
        }
        Self::NotFound
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Products => "/products".to_string(),
            Self::CreateProduct => "/products/create".to_string(),
            Self::ProductDetails { slug } => {
                format!("/products/details/{}", urlencoding::encode(slug))
            }
            Self::EditProduct { id } => format!("/products/edit/{}", urlencoding::encode(id)),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Products
                | Self::CreateProduct
                | Self::ProductDetails { .. }
                | Self::EditProduct { .. }
        )
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Products
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/products"), AppRoute::Products);
        assert_eq!(AppRoute::from_path("/products/"), AppRoute::Products);
        assert_eq!(AppRoute::from_path("/products/create"), AppRoute::CreateProduct);
        assert_eq!(AppRoute::from_path("/nowhere"), AppRoute::NotFound);
    }

    #[test]
    fn test_param_paths() {
        assert_eq!(
            AppRoute::from_path("/products/details/oak-chair"),
            AppRoute::ProductDetails {
                slug: "oak-chair".into()
            }
        );
        assert_eq!(
            AppRoute::from_path("/products/edit/42?from=details"),
            AppRoute::EditProduct { id: "42".into() }
        );
        assert_eq!(AppRoute::from_path("/products/details/"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/products/edit/1/2"), AppRoute::NotFound);
    }

    #[test]
    fn test_round_trip_for_param_routes() {
        let route = AppRoute::EditProduct { id: "abc".into() };
        assert_eq!(AppRoute::from_path(&route.to_path()), route);

        for slug in ["oak chair", "50%-off", "a/b", "what?", "café#1"] {
            let route = AppRoute::ProductDetails { slug: slug.into() };
            assert_eq!(AppRoute::from_path(&route.to_path()), route, "slug {:?}", slug);
        }
    }

    #[test]
    fn test_param_segments_are_percent_encoded() {
        let route = AppRoute::ProductDetails {
            slug: "oak chair".into(),
        };
        assert_eq!(route.to_path(), "/products/details/oak%20chair");

        // 浏览器地址栏里的编码路径解析回原始 slug
        assert_eq!(
            AppRoute::from_path("/products/details/oak%20chair"),
            AppRoute::ProductDetails {
                slug: "oak chair".into()
            }
        );
        assert_eq!(
            AppRoute::from_path("/products/edit/a%2Fb"),
            AppRoute::EditProduct { id: "a/b".into() }
        );
    }

    #[test]
    fn test_guards() {
        assert!(AppRoute::Products.requires_auth());
        assert!(
            AppRoute::ProductDetails {
                slug: "x".into()
            }
            .requires_auth()
        );
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Products);
    }
}
