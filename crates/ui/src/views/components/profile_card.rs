use backend::ProfileUpdate;
use dioxus::prelude::*;
use taskboard_core::model::Role;

use crate::context::{AppContext, use_revision};

/// Signed-in user's profile with an inline name editor.
#[component]
pub fn ProfileCard() -> Element {
    let profiles = use_context::<AppContext>().profile();
    let revision = use_revision();
    revision.track();

    let mut editing = use_signal(|| false);
    let mut name_draft = use_signal(String::new);
    let mut role_draft = use_signal(|| Role::Se);

    let Some(profile) = profiles.profile() else {
        return rsx! {
            section { class: "profile",
                p { class: "muted",
                    if profiles.is_loading() { "Loading profile..." } else { "No profile loaded" }
                }
            }
        };
    };

    let start_edit = {
        let name = profile.full_name.clone().unwrap_or_default();
        let role = profile.role;
        move |_: MouseEvent| {
            name_draft.set(name.clone());
            role_draft.set(role);
            editing.set(true);
        }
    };

    let on_save = {
        let profiles = profiles.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let update = ProfileUpdate {
                full_name: Some(name_draft().trim().to_owned()).filter(|name| !name.is_empty()),
                role: Some(role_draft()),
            };
            editing.set(false);
            let profiles = profiles.clone();
            revision.settle(async move { profiles.update(&update).await });
        }
    };

    rsx! {
        section { class: "profile",
            h3 { "Profile" }
            if editing() {
                form { class: "profile__form", onsubmit: on_save,
                    label { "Full name"
                        input {
                            r#type: "text",
                            value: "{name_draft}",
                            oninput: move |evt| name_draft.set(evt.value()),
                        }
                    }
                    label { "Role"
                        select {
                            onchange: move |evt: FormEvent| {
                                if let Some(role) = Role::parse(&evt.value()) {
                                    role_draft.set(role);
                                }
                            },
                            for role in Role::ALL {
                                option {
                                    value: role.as_str(),
                                    selected: role == role_draft(),
                                    "{role}"
                                }
                            }
                        }
                    }
                    div { class: "profile__actions",
                        button { class: "primary", r#type: "submit", "Save" }
                        button {
                            class: "secondary",
                            r#type: "button",
                            onclick: move |_| editing.set(false),
                            "Cancel"
                        }
                    }
                }
            } else {
                dl { class: "profile__fields",
                    dt { "Name" }
                    dd { "{profile.greeting_name()}" }
                    dt { "Email" }
                    dd { "{profile.email}" }
                    dt { "Role" }
                    dd { "{profile.role}" }
                }
                button { class: "link", onclick: start_edit, "Edit profile" }
            }
        }
    }
}
