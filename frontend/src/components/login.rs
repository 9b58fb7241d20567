use crate::api::CatalogApi;
use crate::notification::use_notifier;
use crate::session::{LOGIN_SUCCESS, use_session};
use crate::web::http::HttpClient;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, PartialEq)]
enum LoginOutcome {
    /// 拿到令牌，附带提示文案
    SignedIn { token: String, notice: &'static str },
    /// 表单内显示的错误
    Rejected(String),
}

async fn sign_in<C: HttpClient>(api: &CatalogApi<C>, email: &str) -> LoginOutcome {
    match api.login(email).await {
        Ok(token) => LoginOutcome::SignedIn {
            token,
            notice: LOGIN_SUCCESS,
        },
        Err(e) => {
            log!("[Login] failed: {}", e);
            LoginOutcome::Rejected(format!("Login failed: {}", e))
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let notifier = use_notifier();

    let (email, set_email) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = email.get().trim().to_string();
        if value.is_empty() {
            set_error_msg.set(Some("Please enter your email".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match sign_in(&session.api(), &value).await {
                // 保存令牌后路由服务会自动跳转到商品列表
                LoginOutcome::SignedIn { token, notice } => {
                    session.set_token(token);
                    notifier.success(notice);
                }
                LoginOutcome::Rejected(message) => {
                    let _ = set_error_msg.try_set(Some(message));
                }
            }
            // 登录成功后页面已被路由替换
            let _ = set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="hero py-12">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Product Catalog"</h1>
                    <p class="text-base-content/70">"Sign in with your email to continue"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::{MOCK_BASE, MockHttpClient};
    use serde_json::json;

    #[tokio::test]
    async fn test_sign_in_announces_success() {
        let client = MockHttpClient::new();
        client.mock("POST", "/auth", 200, json!({ "access_token": "abc" }));
        let api = CatalogApi::with_client(&client, MOCK_BASE, None);

        assert_eq!(
            sign_in(&api, " ana@example.com ").await,
            LoginOutcome::SignedIn {
                token: "abc".into(),
                notice: "Login successful!",
            }
        );
    }

    #[tokio::test]
    async fn test_sign_in_failure_stays_on_form() {
        let client = MockHttpClient::new();
        client.mock("POST", "/auth", 401, json!({ "message": "Unknown email" }));
        let api = CatalogApi::with_client(&client, MOCK_BASE, None);

        assert_eq!(
            sign_in(&api, "nobody@example.com").await,
            LoginOutcome::Rejected("Login failed: Unknown email".into())
        );
    }
}
