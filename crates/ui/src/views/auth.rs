use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use taskboard_core::model::{Role, SessionPersistence, UserForm};

use crate::context::{AppContext, use_revision};
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthTab {
    SignIn,
    Register,
}

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let mut revision = use_revision();
    revision.track();
    let navigator = use_navigator();

    let mut tab = use_signal(|| AuthTab::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut full_name = use_signal(String::new);
    let mut role = use_signal(|| Role::Se);
    let mut remember = use_signal(|| false);
    let mut busy = use_signal(|| false);

    if let Some(user) = auth.current_user() {
        return rsx! {
            div { class: "auth-page",
                div { class: "auth-card",
                    h2 { "Welcome back" }
                    p { "Signed in as {user.email}" }
                    Link { class: "button primary", to: Route::Dashboard {}, "Go to dashboard" }
                }
            }
        };
    }

    let on_submit = {
        let auth = auth.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if busy() {
                return;
            }
            busy.set(true);
            let auth = auth.clone();
            let persistence = if remember() {
                SessionPersistence::Persistent
            } else {
                SessionPersistence::SessionLogin
            };
            let current_tab = tab();
            let form = UserForm {
                email: email().trim().to_owned(),
                full_name: full_name().trim().to_owned(),
                password: password(),
                role: role(),
            };
            spawn(async move {
                let result = match current_tab {
                    AuthTab::SignIn => {
                        auth.sign_in(&form.email, &form.password, None, persistence)
                            .await
                    }
                    AuthTab::Register => auth.sign_up(&form, persistence).await,
                };
                busy.set(false);
                revision.bump();
                if result.is_ok() {
                    password.set(String::new());
                    navigator.push(Route::Dashboard {});
                }
            });
        }
    };

    let is_register = tab() == AuthTab::Register;
    let submit_label = match (tab(), busy()) {
        (_, true) => "Please wait...",
        (AuthTab::SignIn, false) => "Sign in",
        (AuthTab::Register, false) => "Create account",
    };

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                h1 { "Taskboard" }
                div { class: "tabs",
                    button {
                        class: tab_class(!is_register),
                        onclick: move |_| tab.set(AuthTab::SignIn),
                        "Sign in"
                    }
                    button {
                        class: tab_class(is_register),
                        onclick: move |_| tab.set(AuthTab::Register),
                        "Register"
                    }
                }
                form { class: "auth-form", onsubmit: on_submit,
                    if is_register {
                        label { "Full name"
                            input {
                                r#type: "text",
                                value: "{full_name}",
                                oninput: move |evt| full_name.set(evt.value()),
                            }
                        }
                    }
                    label { "Email"
                        input {
                            r#type: "email",
                            required: true,
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }
                    label { "Password"
                        input {
                            r#type: "password",
                            required: true,
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }
                    if is_register {
                        label { "Role"
                            select {
                                onchange: move |evt: FormEvent| {
                                    if let Some(parsed) = Role::parse(&evt.value()) {
                                        role.set(parsed);
                                    }
                                },
                                for option_role in Role::ALL {
                                    option {
                                        value: option_role.as_str(),
                                        selected: option_role == role(),
                                        "{option_role}"
                                    }
                                }
                            }
                        }
                    }
                    label { class: "checkbox",
                        input {
                            r#type: "checkbox",
                            checked: remember(),
                            onchange: move |evt| remember.set(evt.checked()),
                        }
                        "Keep me signed in for 7 days"
                    }
                    button {
                        class: "primary",
                        r#type: "submit",
                        disabled: busy(),
                        "{submit_label}"
                    }
                }
            }
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active { "tab active" } else { "tab" }
}
