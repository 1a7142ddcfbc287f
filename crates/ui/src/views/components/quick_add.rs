use dioxus::prelude::*;
use taskboard_core::model::{Difficulty, Priority};
use taskboard_core::quick_add::parse_quick_add;

use crate::context::{AppContext, use_revision};

/// One-line task entry: `title #project @goal ^effort`.
#[component]
pub fn QuickAddBar() -> Element {
    let ctx = use_context::<AppContext>();
    let board = ctx.board();
    let auth = ctx.auth();
    let revision = use_revision();

    let mut input = use_signal(String::new);
    let mut priority = use_signal(|| Priority::Medium);
    let mut difficulty = use_signal(|| Difficulty::Moderate);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let user = auth.current_user();
        let mut defaults = board.quick_add_defaults(user.as_ref().map(|user| user.email.as_str()));
        defaults.priority = priority();
        defaults.difficulty = difficulty();
        let Some(entry) = parse_quick_add(&input.read(), &defaults) else {
            return;
        };
        input.set(String::new());
        let board = board.clone();
        let user_id = user.map(|user| user.id);
        revision.settle(async move { board.add_task(entry, user_id).await });
    };

    rsx! {
        form { class: "quick-add", onsubmit: on_submit,
            input {
                class: "quick-add__input",
                r#type: "text",
                placeholder: "Add a task: Draft deck #marketing @launch ^L",
                value: "{input}",
                oninput: move |evt| input.set(evt.value()),
            }
            select {
                class: "quick-add__priority",
                onchange: move |evt: FormEvent| {
                    if let Ok(parsed) = Priority::from_short_label(&evt.value()) {
                        priority.set(parsed);
                    }
                },
                for level in Priority::ALL {
                    option {
                        value: level.short_label(),
                        selected: level == priority(),
                        "{level.short_label()}"
                    }
                }
            }
            select {
                class: "quick-add__difficulty",
                onchange: move |evt: FormEvent| {
                    if let Some(parsed) = Difficulty::from_wire(&evt.value()) {
                        difficulty.set(parsed);
                    }
                },
                for level in Difficulty::ALL {
                    option {
                        value: level.as_wire(),
                        selected: level == difficulty(),
                        "{level.label()}"
                    }
                }
            }
            button { class: "primary", r#type: "submit", "Add" }
        }
    }
}
