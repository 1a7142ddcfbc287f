use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use taskboard_core::model::UserId;

use crate::context::{AppContext, use_revision};
use crate::views::{AuthView, DashboardView, TodayView, UsersView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", AuthView)] Auth {},
    #[layout(Layout)]
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/new-today", TodayView)] Today {},
        #[route("/users", UsersView)] Users {},
    #[end_layout]
    #[route("/:..segments")] NotFound { segments: Vec<String> },
}

/// Shell for signed-in pages.
#[component]
fn Layout() -> Element {
    let auth = use_context::<AppContext>().auth();
    let revision = use_revision();
    revision.track();

    if auth.is_loading() {
        return rsx! {
            div { class: "page centered", p { class: "muted", "Checking session..." } }
        };
    }

    let Some(user) = auth.current_user() else {
        return rsx! {
            div { class: "page centered",
                h2 { "Please sign in first" }
                Link { class: "button primary", to: Route::Auth {}, "Go to sign in" }
            }
        };
    };

    rsx! {
        div { class: "app",
            Sidebar { name: user.display_name().to_owned(), initial: user.initial() }
            main { class: "content",
                ProfileLoader { key: "{user.id}", user_id: user.id.clone() }
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn ProfileLoader(user_id: UserId) -> Element {
    let profile = use_context::<AppContext>().profile();
    let revision = use_revision();
    use_hook(move || revision.settle(async move { profile.load(&user_id).await }));
    rsx! {}
}

#[component]
fn Sidebar(name: String, initial: String) -> Element {
    let auth = use_context::<AppContext>().auth();
    let mut revision = use_revision();
    let navigator = use_navigator();

    let on_sign_out = move |_: MouseEvent| {
        auth.sign_out();
        revision.bump();
        navigator.push(Route::Auth {});
    };

    rsx! {
        nav { class: "sidebar",
            h1 { "Taskboard" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Today {}, "Daily tracker" } }
                li { Link { to: Route::Users {}, "Team" } }
            }
            div { class: "sidebar__user",
                span { class: "avatar", "{initial}" }
                span { class: "sidebar__name", "{name}" }
                button { class: "link", onclick: on_sign_out, "Sign out" }
            }
        }
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "page centered",
            h2 { "Page not found" }
            p { class: "muted", "/{path}" }
            Link { to: Route::Dashboard {}, "Back to dashboard" }
        }
    }
}
