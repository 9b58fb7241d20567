mod fields;
mod form_state;

use crate::notification::use_notifier;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use catalog_shared::Category;
use fields::{BasicFields, CategorySelect};
use form_state::FormState;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CreateProductPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();
    let router = use_router();

    let state = FormState::new();
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (submitting, set_submitting) = signal(false);
    let (submit_error, set_submit_error) = signal(Option::<String>::None);

    // 挂载时加载分类；失败只记录日志，下拉框保持为空
    {
        let api = session.api();
        spawn_local(async move {
            match api.list_categories().await {
                Ok(list) => {
                    let _ = set_categories.try_set(list);
                }
                Err(e) => error!("[Products] Failed to load categories: {}", e),
            }
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(req) = state.to_request() else {
            return;
        };

        set_submitting.set(true);
        set_submit_error.set(None);

        let api = session.api();
        spawn_local(async move {
            match api.create_product(&req).await {
                Ok(product) => {
                    log!("[Products] Created {}", product.id);
                    notifier.success("Product created successfully");
                    router.navigate_to(AppRoute::Products);
                }
                Err(e) => {
                    let _ = set_submit_error.try_set(Some(e.to_string()));
                }
            }
            // 请求期间离开页面时信号已释放
            let _ = set_submitting.try_set(false);
        });
    };

    view! {
        <div class="card max-w-2xl mx-auto bg-base-100 shadow-xl">
            <form class="card-body space-y-2" on:submit=on_submit novalidate>
                <h1 class="card-title text-2xl">"Create Product"</h1>

                <Show when=move || submit_error.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || submit_error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <BasicFields state=state />
                <CategorySelect state=state categories=categories />

                <div class="card-actions justify-end mt-4">
                    <Link to=AppRoute::Products class="btn btn-ghost">"Cancel"</Link>
                    <button type="submit" disabled=move || submitting.get() class="btn btn-primary">
                        {move || if submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                        } else {
                            "Create Product".into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
