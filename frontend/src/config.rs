//! 编译期配置
//!
//! 前端运行在浏览器中，没有运行时环境变量；可覆盖的配置在构建时通过
//! `option_env!` 读取（例如 `CATALOG_API_BASE=https://api.example.com trunk build`）。

use catalog_shared::{DEFAULT_API_BASE, PAGE_SIZE, SEARCH_DEBOUNCE_MS, UPDATE_REDIRECT_DELAY_MS};

/// 通知自动消失的时间（毫秒）
const NOTIFICATION_TTL_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// 商品 API 根地址
    pub api_base_url: &'static str,
    /// 图片代理所在的源，空字符串表示同源
    pub image_proxy_base: &'static str,
    pub page_size: usize,
    pub search_debounce_ms: u32,
    pub update_redirect_delay_ms: u32,
    pub notification_ttl_ms: u32,
}

impl AppConfig {
    pub const fn from_build_env() -> Self {
        Self {
            api_base_url: match option_env!("CATALOG_API_BASE") {
                Some(v) => v,
                None => DEFAULT_API_BASE,
            },
            image_proxy_base: match option_env!("CATALOG_IMAGE_PROXY_BASE") {
                Some(v) => v,
                None => "",
            },
            page_size: PAGE_SIZE,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            update_redirect_delay_ms: UPDATE_REDIRECT_DELAY_MS,
            notification_ttl_ms: NOTIFICATION_TTL_MS,
        }
    }
}

pub static CONFIG: AppConfig = AppConfig::from_build_env();
