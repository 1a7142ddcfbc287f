use dioxus::prelude::*;
use taskboard_core::review::ReviewMode;

use crate::context::{AppContext, use_revision};
use crate::views::components::{QuickAddBar, TaskCard};
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Daily tracker: midday check, end-of-day review and carryover list.
#[component]
pub fn TodayView() -> Element {
    let ctx = use_context::<AppContext>();
    let board = ctx.board();
    let mut revision = use_revision();
    revision.track();

    use_hook({
        let board = board.clone();
        move || {
            if !ReviewMode::DAILY.contains(&board.mode()) {
                board.set_mode(ReviewMode::Midday);
            }
        }
    });

    let resource = use_resource({
        let board = board.clone();
        move || {
            let board = board.clone();
            async move { board.refresh().await.map_err(ViewError::from) }
        }
    });
    let state = view_state_from_resource(&resource);

    let mode = board.mode();
    let tasks = board.visible_tasks();
    let empty_text = match mode {
        ReviewMode::Carryover => "No tasks are flagged to continue tomorrow.",
        _ => "No tasks planned for today.",
    };

    rsx! {
        div { class: "page today",
            header { class: "page__header",
                h2 { "{mode.heading()}" }
                if let Some(window) = mode.time_window() {
                    p { class: "muted", "{window}" }
                }
            }

            nav { class: "mode-toggle",
                for choice in ReviewMode::DAILY {
                    button {
                        class: mode_class(choice == mode),
                        onclick: {
                            let board = board.clone();
                            move |_: MouseEvent| {
                                board.set_mode(choice);
                                revision.bump();
                            }
                        },
                        "{choice.toggle_label()}"
                    }
                }
            }

            if mode != ReviewMode::Carryover {
                QuickAddBar {}
            }

            section { class: "task-list",
                match state {
                    ViewState::Error(err) if tasks.is_empty() => rsx! {
                        p { class: "error", "{err.message()}" }
                    },
                    ViewState::Idle | ViewState::Loading if tasks.is_empty() => rsx! {
                        p { class: "muted", "Loading..." }
                    },
                    _ if tasks.is_empty() => rsx! {
                        p { class: "muted", "{empty_text}" }
                    },
                    _ => rsx! {
                        for task in tasks {
                            TaskCard { key: "{task.id}", task }
                        }
                    },
                }
            }
        }
    }
}

fn mode_class(active: bool) -> &'static str {
    if active { "mode active" } else { "mode" }
}
