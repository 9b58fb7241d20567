//! 新建商品表单字段
//!
//! 纯粹的表单输入渲染；每个字段在下方显示自己的校验错误。

use catalog_shared::Category;
use catalog_shared::draft::DraftErrors;
use leptos::prelude::*;

use super::form_state::FormState;

#[component]
fn FieldError(errors: RwSignal<DraftErrors>, pick: fn(&DraftErrors) -> Option<&'static str>) -> impl IntoView {
    move || {
        errors.with(pick).map(|msg| {
            view! {
                <label class="label">
                    <span class="label-text-alt text-error">{msg}</span>
                </label>
            }
        })
    }
}

#[component]
pub fn BasicFields(state: FormState) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for="name" class="label">
                <span class="label-text">"Name"</span>
            </label>
            <input id="name"
                type="text"
                placeholder="Oak chair"
                on:input=move |ev| state.name.set(event_target_value(&ev))
                prop:value=move || state.name.get()
                class="input input-bordered w-full"
            />
            <FieldError errors=state.errors pick=|e| e.name />
        </div>

        <div class="form-control">
            <label for="description" class="label">
                <span class="label-text">"Description"</span>
            </label>
            <textarea id="description"
                rows="3"
                on:input=move |ev| state.description.set(event_target_value(&ev))
                prop:value=move || state.description.get()
                class="textarea textarea-bordered w-full"
            ></textarea>
        </div>

        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="form-control">
                <label for="price" class="label">
                    <span class="label-text">"Price"</span>
                </label>
                <input id="price"
                    type="text"
                    inputmode="decimal"
                    placeholder="0.00"
                    on:input=move |ev| state.price.set(event_target_value(&ev))
                    prop:value=move || state.price.get()
                    class="input input-bordered w-full"
                />
                <FieldError errors=state.errors pick=|e| e.price />
            </div>

            <div class="form-control">
                <label for="image_url" class="label">
                    <span class="label-text">"Image URL"</span>
                </label>
                <input id="image_url"
                    type="url"
                    placeholder="https://..."
                    on:input=move |ev| state.image_url.set(event_target_value(&ev))
                    prop:value=move || state.image_url.get()
                    class="input input-bordered w-full"
                />
                <FieldError errors=state.errors pick=|e| e.image_url />
            </div>
        </div>
    }
}

/// 分类下拉框；加载失败时为空
#[component]
pub fn CategorySelect(state: FormState, categories: ReadSignal<Vec<Category>>) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for="category" class="label">
                <span class="label-text">"Category"</span>
            </label>
            <select id="category"
                class="select select-bordered w-full"
                on:change=move |ev| state.category_id.set(event_target_value(&ev))
                prop:value=move || state.category_id.get()
            >
                <option value="" selected=move || state.category_id.get().is_empty()>
                    "Select a category"
                </option>
                {move || categories.get().into_iter().map(|c| {
                    let id = c.id.clone();
                    view! {
                        <option value=c.id selected=move || state.category_id.get() == id>{c.name}</option>
                    }
                }).collect_view()}
            </select>
            <FieldError errors=state.errors pick=|e| e.category_id />
        </div>
    }
}
