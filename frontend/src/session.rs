//! 会话模块
//!
//! 令牌保存在 LocalStorage 中（键为 `token`），刷新页面后仍保持登录。
//! 路由服务通过注入的 `is_authenticated` 信号感知会话变化，与本模块解耦。

use crate::api::CatalogApi;
use crate::config::CONFIG;
use crate::web::{LocalStorage, StorageError};
use catalog_shared::STORAGE_TOKEN_KEY;
use leptos::logging::{log, warn};
use leptos::prelude::*;

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully!";

/// 从存储结果中取出可用的令牌：空字符串与读取失败都视为未登录
fn restored_token(read: Result<Option<String>, StorageError>) -> Option<String> {
    match read {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            warn!("[Session] Could not read token: {}", e);
            None
        }
    }
}

/// 会话上下文
///
/// 通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    token: RwSignal<Option<String>>,
}

impl SessionContext {
    /// 创建会话上下文，并从 LocalStorage 恢复令牌
    pub fn new() -> Self {
        let stored = restored_token(LocalStorage::read(STORAGE_TOKEN_KEY));
        if stored.is_some() {
            log!("[Session] Restored token from local storage.");
        }
        Self {
            token: RwSignal::new(stored),
        }
    }

    /// 当前令牌（不追踪）
    pub fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    /// 保存新令牌，同时写入 LocalStorage
    pub fn set_token(&self, token: String) {
        if let Err(e) = LocalStorage::write(STORAGE_TOKEN_KEY, &token) {
            warn!("[Session] Could not persist token, session will not survive reload: {}", e);
        }
        self.token.set(Some(token));
        log!("[Session] Logged in.");
    }

    /// 注销：清除内存与 LocalStorage 中的令牌
    ///
    /// 导航由路由服务监听认证状态后自动完成。
    pub fn clear_token(&self) {
        if let Err(e) = LocalStorage::remove(STORAGE_TOKEN_KEY) {
            warn!("[Session] Could not remove stored token, it will be restored on reload: {}", e);
        }
        self.token.set(None);
        log!("[Session] Logged out.");
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let token = self.token;
        Signal::derive(move || token.with(|t| t.is_some()))
    }

    /// 以当前令牌构造 API 客户端
    pub fn api(&self) -> CatalogApi {
        CatalogApi::new(CONFIG.api_base_url, self.token())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restored_token_ignores_empty_and_failed_reads() {
        assert_eq!(
            restored_token(Ok(Some("abc".to_string()))),
            Some("abc".to_string())
        );
        assert_eq!(restored_token(Ok(Some(String::new()))), None);
        assert_eq!(restored_token(Ok(None)), None);
        assert_eq!(restored_token(Err(StorageError::Unavailable)), None);
        assert_eq!(
            restored_token(Err(StorageError::Rejected("SecurityError".into()))),
            None
        );
    }

    #[test]
    fn test_storage_error_messages() {
        assert_eq!(
            StorageError::Unavailable.to_string(),
            "local storage is unavailable"
        );
        assert_eq!(
            StorageError::Rejected("QuotaExceededError".into()).to_string(),
            "local storage rejected the operation: QuotaExceededError"
        );
    }
}
