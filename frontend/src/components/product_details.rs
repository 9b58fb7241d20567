use crate::api::CatalogApi;
use crate::config::CONFIG;
use crate::notification::use_notifier;
use crate::session::use_session;
use crate::web::confirm;
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use catalog_shared::Product;
use catalog_shared::image::proxied_image_url;
use catalog_shared::listing::LoadState;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";
const DELETE_SUCCESS: &str = "Product deleted successfully";

/// 删除之后的去向
#[derive(Debug, Clone, PartialEq)]
enum DeleteOutcome {
    /// 已删除，回到列表
    Leave(AppRoute),
    /// 删除失败，留在详情页并提示
    Stay(String),
}

/// 执行删除；失败时恢复删除按钮（页面已卸载则跳过）
async fn delete_product<C: HttpClient>(
    api: &CatalogApi<C>,
    id: &str,
    deleting: RwSignal<bool>,
) -> DeleteOutcome {
    match api.delete_product(id).await {
        Ok(()) => {
            log!("[Products] Deleted {}", id);
            DeleteOutcome::Leave(AppRoute::Products)
        }
        Err(e) => {
            let _ = deleting.try_set(false);
            DeleteOutcome::Stay(format!("Failed to delete product: {}", e))
        }
    }
}

#[component]
pub fn ProductDetailsPage(slug: String) -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();
    let router = use_router();

    let product = RwSignal::new(LoadState::<Product>::Loading);
    let deleting = RwSignal::new(false);

    {
        let api = session.api();
        spawn_local(async move {
            let state = match api.get_product(&slug).await {
                Ok(p) => LoadState::Loaded(p),
                Err(e) => LoadState::Failed(e.to_string()),
            };
            let _ = product.try_set(state);
        });
    }

    let on_delete = move |id: String| {
        if !confirm(DELETE_CONFIRMATION) {
            return;
        }
        deleting.set(true);
        let api = session.api();
        spawn_local(async move {
            match delete_product(&api, &id, deleting).await {
                DeleteOutcome::Leave(route) => {
                    notifier.success(DELETE_SUCCESS);
                    router.navigate_to(route);
                }
                DeleteOutcome::Stay(message) => notifier.error(message),
            }
        });
    };

    view! {
        <div class="space-y-4">
            <Link to=AppRoute::Products class="btn btn-ghost btn-sm">"← Back to products"</Link>
            {move || product.with(|state| match state {
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
                LoadState::Loaded(p) => {
                    let image = proxied_image_url(CONFIG.image_proxy_base, p.primary_image());
                    let id = p.id.clone();
                    let edit_route = AppRoute::EditProduct { id: id.clone() };
                    view! {
                        <div class="card lg:card-side bg-base-100 shadow-xl">
                            <figure class="lg:w-1/2 bg-base-200">
                                <img src=image alt=p.name.clone() class="w-full object-cover" />
                            </figure>
                            <div class="card-body lg:w-1/2">
                                <h1 class="card-title text-3xl">{p.name.clone()}</h1>
                                <p class="text-base-content/80">{p.display_description().to_string()}</p>
                                <p class="text-2xl font-bold text-primary">{p.display_price()}</p>
                                <div class="flex flex-wrap gap-2 text-sm text-base-content/70">
                                    {p.category_name().map(|c| view! {
                                        <span class="badge badge-outline">{c.to_string()}</span>
                                    })}
                                    {p.display_created_at().map(|d| view! {
                                        <span>"Created " {d}</span>
                                    })}
                                </div>
                                <div class="card-actions justify-end mt-6">
                                    <Link to=edit_route class="btn btn-primary">"Edit"</Link>
                                    <button
                                        class="btn btn-error"
                                        disabled=move || deleting.get()
                                        on:click=move |_| on_delete(id.clone())
                                    >
                                        {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }.into_any()
                }
            })}
        </div>
    }
}
