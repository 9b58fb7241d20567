//! 新建商品表单状态
//!
//! 将零散的 signal 整合为 `FormState`，负责：
//! - 数据的持有与重置
//! - 校验并转换为请求对象（校验规则在 `ProductDraft` 中）

use catalog_shared::CreateProductRequest;
use catalog_shared::draft::{DraftErrors, ProductDraft};
use leptos::prelude::*;

/// 使用 `RwSignal` 因为它实现了 `Copy`，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub price: RwSignal<String>,
    pub image_url: RwSignal<String>,
    pub category_id: RwSignal<String>,
    pub errors: RwSignal<DraftErrors>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            image_url: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            errors: RwSignal::new(DraftErrors::default()),
        }
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
            price: self.price.get_untracked(),
            image_url: self.image_url.get_untracked(),
            category_id: self.category_id.get_untracked(),
        }
    }

    /// 校验表单；失败时把每个字段的错误写入 `errors`
    pub fn to_request(&self) -> Option<CreateProductRequest> {
        match self.to_draft().validate() {
            Ok(req) => {
                self.errors.set(DraftErrors::default());
                Some(req)
            }
            Err(errors) => {
                self.errors.set(errors);
                None
            }
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
