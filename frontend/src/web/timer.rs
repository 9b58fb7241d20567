//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setTimeout` API。

use wasm_bindgen::prelude::*;

/// 一次性定时器
///
/// 封装 `setTimeout` API。当 `Timeout` 被 drop 时，若尚未触发则自动清除，
/// 因此用新的 `Timeout` 替换旧值即完成"取消并重新计时"。
pub struct Timeout {
    handle: Option<i32>,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Timeout {
    /// 创建新的一次性定时器
    ///
    /// 无法获取 window 或设置失败时返回的定时器不会触发。
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);

        let handle = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    millis as i32,
                )
                .ok()
        });

        if handle.is_none() {
            leptos::logging::warn!("[Timer] setTimeout failed, callback will not run");
        }

        Self { handle, closure }
    }

    fn cancel(&self) {
        if let (Some(handle), Some(window)) = (self.handle, web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
