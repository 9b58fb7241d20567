//! 浏览器本地存储
//!
//! 只负责 `window.localStorage` 的读写，失败以 `StorageError` 返回，
//! 由调用方决定是否提示用户。

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// 没有 window，或浏览器禁用了 localStorage（隐私模式、沙箱 iframe）
    Unavailable,
    /// 浏览器拒绝了读写（配额已满、安全策略）
    Rejected(String),
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "local storage is unavailable"),
            StorageError::Rejected(msg) => write!(f, "local storage rejected the operation: {}", msg),
        }
    }
}

fn rejected(e: JsValue) -> StorageError {
    StorageError::Rejected(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

pub struct LocalStorage;

impl LocalStorage {
    fn open() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(rejected)?
            .ok_or(StorageError::Unavailable)
    }

    pub fn read(key: &str) -> Result<Option<String>, StorageError> {
        Self::open()?.get_item(key).map_err(rejected)
    }

    pub fn write(key: &str, value: &str) -> Result<(), StorageError> {
        Self::open()?.set_item(key, value).map_err(rejected)
    }

    pub fn remove(key: &str) -> Result<(), StorageError> {
        Self::open()?.remove_item(key).map_err(rejected)
    }
}
