//! 全局通知（toast）

use crate::config::CONFIG;
use crate::web::Timeout;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// 通知上下文：同一时刻最多显示一条，新消息覆盖旧消息并重新计时
#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<Notice>>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            timer: StoredValue::new_local(None),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), false);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), true);
    }

    fn show(&self, message: String, is_error: bool) {
        self.current.set(Some(Notice { message, is_error }));

        let current = self.current;
        let timeout = Timeout::new(CONFIG.notification_ttl_ms, move || current.set(None));
        // 替换旧定时器时 drop 会自动清除
        self.timer.set_value(Some(timeout));
    }

    pub fn current(&self) -> Signal<Option<Notice>> {
        self.current.into()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

#[component]
pub fn Toast() -> impl IntoView {
    let notice = use_notifier().current();

    view! {
        {move || notice.get().map(|n| {
            let class = if n.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{n.message}</span>
                    </div>
                </div>
            }
        })}
    }
}
