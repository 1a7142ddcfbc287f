use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::{AppContext, use_revision_provider};
use crate::routes::Route;
use crate::views::Toasts;

#[component]
pub fn App() -> Element {
    let auth = use_context::<AppContext>().auth();
    let mut revision = use_revision_provider();

    // Validate the stored session once per app start.
    use_hook(move || {
        spawn(async move {
            auth.restore().await;
            revision.bump();
        });
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Taskboard" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
            Toasts {}
        }
    }
}
