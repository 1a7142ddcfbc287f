use dioxus::prelude::*;
use services::NotificationKind;

use crate::context::{AppContext, use_revision};

#[component]
pub fn Toasts() -> Element {
    let notifier = use_context::<AppContext>().notifier();
    let mut revision = use_revision();
    revision.track();
    let pending = notifier.pending();

    rsx! {
        div { class: "toasts",
            for toast in pending {
                div {
                    key: "{toast.id}",
                    class: toast_class(toast.kind),
                    div { class: "toast__body",
                        strong { "{toast.title}" }
                        if !toast.description.is_empty() {
                            p { "{toast.description}" }
                        }
                    }
                    button {
                        class: "toast__close",
                        onclick: {
                            let notifier = notifier.clone();
                            move |_: MouseEvent| {
                                notifier.dismiss(toast.id);
                                revision.bump();
                            }
                        },
                        "×"
                    }
                }
            }
        }
    }
}

fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "toast success",
        NotificationKind::Error => "toast error",
    }
}
