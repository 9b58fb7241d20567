use crate::{IMAGE_PROXY_PATH, IMAGE_PROXY_QUERY, PLACEHOLDER_IMAGE_URL};
use urlencoding::encode;

/// 通过图片代理访问远程图片
///
/// `proxy_base` 为代理所在的源（如 `https://shop.example.com`），
/// 为空时使用同源相对路径。
pub fn proxied_image_url(proxy_base: &str, image: Option<&str>) -> String {
    let target = image
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_URL);
    format!(
        "{}{}?{}={}",
        proxy_base.trim_end_matches('/'),
        IMAGE_PROXY_PATH,
        IMAGE_PROXY_QUERY,
        encode(target)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_proxy_url() {
        assert_eq!(
            proxied_image_url("", Some("https://img.example/a b.jpg")),
            "/api/image-proxy?url=https%3A%2F%2Fimg.example%2Fa%20b.jpg"
        );
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        let url = proxied_image_url("https://shop.example/", None);
        assert!(url.starts_with("https://shop.example/api/image-proxy?url="));
        assert!(url.contains("via.placeholder.com"));
        assert_eq!(url, proxied_image_url("https://shop.example", Some("  ")));
    }
}
