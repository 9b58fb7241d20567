//! 商品目录前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 令牌与认证状态
//! - `api`: 类型化的 API 客户端
//! - `components`: UI 组件层

mod api;
mod config;
mod notification;
mod session;
mod components {
    pub mod create_product;
    pub mod edit_product;
    pub mod login;
    pub mod navbar;
    mod product_card;
    pub mod product_details;
    pub mod product_list;
}

use crate::components::create_product::CreateProductPage;
use crate::components::edit_product::EditProductPage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::product_details::ProductDetailsPage;
use crate::components::product_list::ProductListPage;
use crate::notification::{Notifier, Toast};
use crate::session::SessionContext;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod dialog;
    pub mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use dialog::confirm;
    pub use storage::{LocalStorage, StorageError};
    pub use timer::Timeout;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Products => view! { <ProductListPage /> }.into_any(),
        AppRoute::CreateProduct => view! { <CreateProductPage /> }.into_any(),
        AppRoute::ProductDetails { slug } => view! { <ProductDetailsPage slug=slug /> }.into_any(),
        AppRoute::EditProduct { id } => view! { <EditProductPage id=id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center py-24">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Products class="btn btn-primary mt-6">"Go to products"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 会话上下文（从 LocalStorage 恢复令牌）
    let session = SessionContext::new();
    provide_context(session);

    // 2. 全局通知
    provide_context(Notifier::new());

    // 3. 认证信号注入路由服务（解耦）
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <Toast />
            <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
                <div class="max-w-7xl mx-auto space-y-8">
                    <Navbar />
                    <RouterOutlet matcher=route_matcher />
                </div>
            </div>
        </Router>
    }
}
