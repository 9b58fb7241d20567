//! 浏览器原生对话框封装

/// 弹出 `window.confirm`，用户确认时返回 `true`
///
/// 无法获取 window 或调用失败时视为取消。
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
