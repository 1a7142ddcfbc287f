use dioxus::prelude::*;
use taskboard_core::model::UserId;

use crate::context::{AppContext, use_revision};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_pending;

/// Overdue tasks with reassign and complete actions.
#[component]
pub fn PendingTasks(user_id: UserId) -> Element {
    let pending = use_context::<AppContext>().pending();
    let revision = use_revision();
    revision.track();

    let resource = use_resource({
        let pending = pending.clone();
        move || {
            let pending = pending.clone();
            let user_id = user_id.clone();
            async move { pending.refresh(&user_id).await.map_err(ViewError::from) }
        }
    });
    let state = view_state_from_resource(&resource);
    let rows = map_pending(&pending.tasks());

    rsx! {
        section { class: "pending",
            h3 { "Pending tasks" }
            match state {
                ViewState::Idle | ViewState::Loading if rows.is_empty() => rsx! {
                    p { class: "muted", "Loading..." }
                },
                ViewState::Error(err) if rows.is_empty() => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                _ if rows.is_empty() => rsx! {
                    p { class: "muted", "Nothing overdue. Nice." }
                },
                _ => rsx! {
                    ul { class: "pending__list",
                        for row in rows {
                            li { key: "{row.id}", class: "pending__row",
                                div { class: "pending__info",
                                    strong { "{row.title}" }
                                    span { class: "muted", "{row.project_name} · due {row.due_label}" }
                                    span { class: "badge", "{row.priority_label}" }
                                    span { class: "badge effort", "{row.effort_label}" }
                                }
                                div { class: "pending__actions",
                                    button {
                                        class: "secondary",
                                        onclick: {
                                            let pending = pending.clone();
                                            let id = row.id.clone();
                                            move |_: MouseEvent| {
                                                let pending = pending.clone();
                                                let id = id.clone();
                                                revision.settle(async move {
                                                    pending.reassign_to_today(&id).await
                                                });
                                            }
                                        },
                                        "Move to today"
                                    }
                                    button {
                                        class: "primary",
                                        onclick: {
                                            let pending = pending.clone();
                                            let id = row.id.clone();
                                            move |_: MouseEvent| {
                                                let pending = pending.clone();
                                                let id = id.clone();
                                                revision.settle(async move {
                                                    pending.mark_completed(&id).await
                                                });
                                            }
                                        },
                                        "Mark done"
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
