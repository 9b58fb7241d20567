use crate::notification::use_notifier;
use crate::session::{LOGOUT_SUCCESS, use_session};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let notifier = use_notifier();
    let is_authenticated = session.is_authenticated_signal();

    // 注销后由路由服务自动重定向到登录页
    let on_logout = move |_| {
        session.clear_token();
        notifier.success(LOGOUT_SUCCESS);
    };
    let on_login = move |_| router.navigate_to(AppRoute::Login);

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1">
                <Link to=AppRoute::Products class="btn btn-ghost text-xl">
                    "Product Catalog"
                </Link>
            </div>
            <div class="flex-none">
                <Show
                    when=move || is_authenticated.get()
                    fallback=move || view! {
                        <button on:click=on_login class="btn btn-primary">"Login"</button>
                    }
                >
                    <button on:click=on_logout class="btn btn-outline btn-error">"Logout"</button>
                </Show>
            </div>
        </div>
    }
}
