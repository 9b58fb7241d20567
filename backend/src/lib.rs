use worker::*;

pub mod error;
pub mod proxy;

pub(crate) mod utils {
    pub mod request;
}

use catalog_shared::IMAGE_PROXY_PATH;
use error::{ProxyError, ProxyResult};
use proxy::{ImageProxy, ProxiedImage, ProxyConfig, target_from_url};
use utils::request::WorkerHttpClient;

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: talc::TalckWasm = unsafe { talc::TalckWasm::new_global() };

// =========================================================
// 常量定义
// =========================================================
const DEFAULT_FALLBACK_CONTENT_TYPE: &str = "image/jpeg";
const DEFAULT_USER_AGENT: &str = "catalog-image-proxy";

// =========================================================
// 宏定义 (日志)
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info { ($($t:tt)*) => (worker::console_log!($($t)*)) }
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info { ($($t:tt)*) => (println!($($t)*)) }

#[cfg(target_arch = "wasm32")]
macro_rules! log_error { ($($t:tt)*) => (worker::console_error!($($t)*)) }
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error { ($($t:tt)*) => (eprintln!($($t)*)) }

// 辅助函数：将 ProxyError 映射为 Worker Response
fn map_error_to_response(e: ProxyError) -> Result<Response> {
    let status = e.status_code();

    // 对于 5xx 错误，记录日志以便排查
    if status >= 500 {
        log_error!("Proxy Error [{}]: {}", e.error_code(), e);
    }

    Response::error(e.public_message(), status)
}

// worker::Error 经 `?` 转为 Internal
fn image_response(image: ProxiedImage) -> ProxyResult<Response> {
    let headers = Headers::new();
    headers.set("Content-Type", &image.content_type)?;

    Ok(Response::from_bytes(image.body)?
        .with_status(image.status)
        .with_headers(headers))
}

// =========================================================
// 运行时配置
// =========================================================

struct RuntimeConfig {
    proxy: ProxyConfig,
}

impl RuntimeConfig {
    fn new(env: &Env) -> Self {
        Self {
            proxy: ProxyConfig {
                fallback_content_type: env
                    .var("PROXY_FALLBACK_CONTENT_TYPE")
                    .map(|v| v.to_string())
                    .unwrap_or_else(|_| DEFAULT_FALLBACK_CONTENT_TYPE.to_string()),
                user_agent: env
                    .var("PROXY_USER_AGENT")
                    .map(|v| v.to_string())
                    .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            },
        }
    }
}

// =========================================================
// Controllers
// =========================================================

async fn image_proxy(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    match proxy_image(&req, &ctx.env).await {
        Ok(resp) => Ok(resp),
        Err(e) => map_error_to_response(e.in_op("image_proxy")),
    }
}

async fn proxy_image(req: &Request, env: &Env) -> ProxyResult<Response> {
    let cfg = RuntimeConfig::new(env);
    let target = target_from_url(&req.url()?);

    let client = WorkerHttpClient;
    let image = ImageProxy::new(&client, &cfg.proxy)
        .fetch(target.as_deref())
        .await?;

    log_info!(
        "Proxied [{}] {} ({} bytes)",
        image.status,
        target.as_deref().unwrap_or_default(),
        image.body.len()
    );
    image_response(image)
}

// =========================================================
// Entry Points
// =========================================================

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    let cors = Cors::new()
        .with_origins(vec!["*"])
        .with_methods(vec![Method::Get, Method::Options]);

    Router::new()
        .get_async(IMAGE_PROXY_PATH, image_proxy)
        .options_async(IMAGE_PROXY_PATH, |_, _| async { Response::empty() })
        .run(req, env)
        .await?
        .with_cors(&cors)
}
