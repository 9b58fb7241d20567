//! 商品列表页：防抖搜索 + offset 分页

use crate::api::CatalogApi;
use crate::components::product_card::ProductCard;
use crate::config::CONFIG;
use crate::session::use_session;
use crate::web::Timeout;
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use catalog_shared::Product;
use catalog_shared::debounce::Debounce;
use catalog_shared::listing::{ListQuery, ListView, LoadState};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 拉取一页商品并写回状态
///
/// 请求返回时页面可能已卸载（信号已释放），或查询已被新的输入取代，这两种情况都丢弃结果。
async fn load_listing<C: HttpClient>(
    api: &CatalogApi<C>,
    query: ListQuery,
    list_view: RwSignal<ListView>,
    products: RwSignal<LoadState<Vec<Product>>>,
) {
    let result = api.list_products(&query).await;

    if list_view.try_with_untracked(|v| v.query() == query) != Some(true) {
        return;
    }
    let state = match result {
        Ok(items) => LoadState::Loaded(items),
        Err(e) => LoadState::Failed(e.to_string()),
    };
    let _ = products.try_set(state);
}

#[component]
pub fn ProductListPage() -> impl IntoView {
    let session = use_session();

    let list_view = RwSignal::new(ListView::new(CONFIG.page_size));
    let products = RwSignal::new(LoadState::<Vec<Product>>::Idle);
    let search_input = RwSignal::new(String::new());

    let debounce = StoredValue::new_local(Debounce::<String>::new());
    let search_timer = StoredValue::new_local(Option::<Timeout>::None);

    // offset 或搜索词变化时重新加载
    Effect::new(move |_| {
        let query = list_view.with(|v| v.query());
        let api = session.api();
        products.set(LoadState::Loading);

        spawn_local(async move {
            load_listing(&api, query, list_view, products).await;
        });
    });

    let on_search = move |ev: leptos::web_sys::Event| {
        let value = event_target_value(&ev);
        search_input.set(value.clone());

        let Some(ticket) = debounce.try_update_value(|d| d.push(value)) else {
            return;
        };
        let timeout = Timeout::new(CONFIG.search_debounce_ms, move || {
            let Some(term) = debounce.try_update_value(|d| d.fire(ticket)).flatten() else {
                return;
            };
            if list_view.try_with_untracked(|v| v.search() != term.trim()) == Some(true) {
                list_view.try_update(|v| v.set_search(&term));
            }
        });
        // 重新计时：旧定时器随替换被清除
        search_timer.set_value(Some(timeout));
    };

    let fetched = move || products.with(|s| s.loaded().map_or(0, Vec::len));

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row gap-4 justify-between items-center">
                <input
                    type="search"
                    placeholder="Search products..."
                    class="input input-bordered w-full md:max-w-sm"
                    prop:value=move || search_input.get()
                    on:input=on_search
                />
                <Link to=AppRoute::CreateProduct class="btn btn-primary">
                    "+ Add Product"
                </Link>
            </div>

            {move || products.with(|state| match state {
                LoadState::Idle | LoadState::Loading => view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }.into_any(),
                LoadState::Failed(msg) => view! {
                    <div role="alert" class="alert alert-error">
                        <span>{msg.clone()}</span>
                    </div>
                }.into_any(),
                LoadState::Loaded(items) if items.is_empty() => view! {
                    <p class="text-center text-base-content/70 py-12">"No products found."</p>
                }.into_any(),
                LoadState::Loaded(items) => view! {
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
                        {items
                            .iter()
                            .cloned()
                            .map(|product| view! { <ProductCard product=product /> })
                            .collect_view()}
                    </div>
                }.into_any(),
            })}

            <Show when=move || list_view.with(|v| v.shows_pagination(fetched()))>
                <div class="flex justify-center">
                    <div class="join">
                        <button
                            class="join-item btn"
                            disabled=move || !list_view.with(|v| v.previous_enabled())
                            on:click=move |_| list_view.update(|v| v.go_previous())
                        >
                            "Previous"
                        </button>
                        <span class="join-item btn btn-ghost no-animation">
                            {move || format!("Page {}", list_view.with(|v| v.pagination.page_number()))}
                        </span>
                        <button
                            class="join-item btn"
                            disabled=move || !list_view.with(|v| v.next_enabled(fetched()))
                            on:click=move |_| list_view.update(|v| v.go_next())
                        >
                            "Next"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
