use crate::config::CONFIG;
use crate::session::use_session;
use crate::web::Timeout;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use catalog_shared::draft::EditDraft;
use leptos::prelude::*;
use leptos::task::spawn_local;

const UPDATE_SUCCESS: &str = "Product updated successfully!";

/// 表单提交状态
#[derive(Debug, Clone, PartialEq)]
enum Status {
    Editing,
    Saving,
    Saved,
    Failed(String),
}

#[component]
pub fn EditProductPage(id: String) -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let status = RwSignal::new(Status::Editing);
    let redirect = StoredValue::new_local(Option::<Timeout>::None);
    let id = StoredValue::new(id);

    {
        let api = session.api();
        let id = id.get_value();
        spawn_local(async move {
            match api.get_product(&id).await {
                Ok(product) => {
                    let _ = name.try_set(product.name);
                    let _ = description.try_set(product.description);
                }
                Err(e) => {
                    let _ = set_load_error.try_set(Some(e.to_string()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = EditDraft {
            name: name.get_untracked(),
            description: description.get_untracked(),
        };
        let changes = match draft.validate() {
            Ok(changes) => changes,
            Err(msg) => {
                status.set(Status::Failed(msg.to_string()));
                return;
            }
        };

        status.set(Status::Saving);
        let api = session.api();
        let id = id.get_value();
        spawn_local(async move {
            match api.update_product(&id, changes).await {
                Ok(()) => {
                    // 页面已卸载则不再安排跳转
                    if status.try_set(Status::Saved).is_some() {
                        return;
                    }
                    let timeout = Timeout::new(CONFIG.update_redirect_delay_ms, move || {
                        router.navigate_to(AppRoute::Products)
                    });
                    redirect.try_update_value(|slot| *slot = Some(timeout));
                }
                Err(e) => {
                    let _ = status.try_set(Status::Failed(e.to_string()));
                }
            }
        });
    };

    let busy = move || matches!(status.get(), Status::Saving | Status::Saved);

    view! {
        <div class="card max-w-2xl mx-auto bg-base-100 shadow-xl">
            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                {move || match load_error.get() {
                    Some(msg) => view! {
                        <div class="card-body">
                            <div role="alert" class="alert alert-error"><span>{msg}</span></div>
                        </div>
                    }.into_any(),
                    None => view! {
                        <form class="card-body space-y-2" on:submit=on_submit>
                            <h1 class="card-title text-2xl">"Edit Product"</h1>

                            {move || match status.get() {
                                Status::Saved => Some(view! {
                                    <div role="alert" class="alert alert-success text-sm py-2">
                                        <span>{UPDATE_SUCCESS}</span>
                                    </div>
                                }.into_any()),
                                Status::Failed(msg) => Some(view! {
                                    <div role="alert" class="alert alert-error text-sm py-2">
                                        <span>{msg}</span>
                                    </div>
                                }.into_any()),
                                Status::Editing | Status::Saving => None,
                            }}

                            <div class="form-control">
                                <label for="name" class="label">
                                    <span class="label-text">"Name"</span>
                                </label>
                                <input id="name"
                                    type="text"
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                    prop:value=move || name.get()
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label for="description" class="label">
                                    <span class="label-text">"Description"</span>
                                </label>
                                <textarea id="description"
                                    rows="4"
                                    on:input=move |ev| description.set(event_target_value(&ev))
                                    prop:value=move || description.get()
                                    class="textarea textarea-bordered w-full"
                                    required
                                ></textarea>
                            </div>

                            <div class="card-actions justify-end mt-4">
                                <Link to=AppRoute::Products class="btn btn-ghost">"Cancel"</Link>
                                <button type="submit" disabled=busy class="btn btn-primary">
                                    {move || if status.get() == Status::Saving {
                                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                    } else {
                                        "Save Changes".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    }.into_any(),
                }}
            </Show>
        </div>
    }
}
