use dioxus::prelude::*;
use taskboard_core::model::{EodOutcome, MiddayStatus, Task, TaskId, TaskStatus};
use taskboard_core::review::ReviewMode;

use crate::context::{AppContext, use_revision};
use crate::vm::{CardPanelsVm, TaskCardVm};

#[component]
pub fn TaskCard(task: Task) -> Element {
    let ctx = use_context::<AppContext>();
    let board = ctx.board();
    let mut revision = use_revision();
    revision.track();

    let mode = board.mode();
    let card = board.card(&task.id);
    let panels = CardPanelsVm::new(&task, &card, mode);
    let vm = TaskCardVm::from(&task);
    let id = vm.id.clone();

    let on_status = {
        let board = board.clone();
        let id = id.clone();
        move |evt: FormEvent| {
            let Some(status) = TaskStatus::SELECTABLE
                .into_iter()
                .find(|status| status.as_wire() == evt.value())
            else {
                return;
            };
            let board = board.clone();
            let id = id.clone();
            revision.settle(async move { board.update_status(&id, status).await });
        }
    };

    let on_toggle_details = {
        let board = board.clone();
        let id = id.clone();
        move |_: MouseEvent| {
            board.toggle_details(&id);
            revision.bump();
        }
    };

    let on_toggle_progress = {
        let board = board.clone();
        let id = id.clone();
        move |_: MouseEvent| {
            board.toggle_progress_field(&id);
            revision.bump();
        }
    };

    let on_deliverable = {
        let board = board.clone();
        let id = id.clone();
        move |evt: FormEvent| {
            board.edit_card(&id, |card| card.deliverable = evt.value());
            revision.bump();
        }
    };

    let on_bottleneck = {
        let board = board.clone();
        let id = id.clone();
        move |evt: FormEvent| {
            board.edit_card(&id, |card| card.bottleneck = evt.value());
            revision.bump();
        }
    };

    let on_progress = {
        let board = board.clone();
        let id = id.clone();
        move |evt: FormEvent| {
            board.edit_card(&id, |card| card.progress = evt.value());
            revision.bump();
        }
    };

    let on_save_details = {
        let board = board.clone();
        let id = id.clone();
        move |_: MouseEvent| {
            let board = board.clone();
            let id = id.clone();
            let draft = board.card(&id);
            revision.settle(async move {
                board
                    .save_details(&id, &draft.deliverable, &draft.bottleneck)
                    .await
            });
        }
    };

    let on_continue = {
        let board = board.clone();
        let id = id.clone();
        move |_: MouseEvent| {
            let board = board.clone();
            let id = id.clone();
            let progress = board.card(&id).progress;
            revision.settle(async move { board.mark_continue_tomorrow(&id, &progress).await });
        }
    };

    let on_save_carryover = {
        let board = board.clone();
        let id = id.clone();
        move |_: MouseEvent| {
            let board = board.clone();
            let id = id.clone();
            let progress = board.card(&id).progress;
            revision.settle(async move { board.save_carryover_progress(&id, &progress).await });
        }
    };

    let on_delete = {
        let board = board.clone();
        let id = id.clone();
        move |_: MouseEvent| {
            let board = board.clone();
            let id = id.clone();
            revision.settle(async move { board.delete_task(&id).await });
        }
    };

    let card_class = format!("task-card {}", vm.status_class);

    rsx! {
        article { class: "{card_class}",
            header { class: "task-card__header",
                h4 { class: "task-card__title", "{vm.title}" }
                button {
                    class: "task-card__delete",
                    title: "Delete task",
                    onclick: on_delete,
                    "×"
                }
            }

            div { class: "task-card__meta",
                span { class: "badge project", "{vm.project_name}" }
                if !vm.goal.is_empty() {
                    span { class: "badge goal", "{vm.goal}" }
                }
                span { class: "badge effort", title: "{vm.effort_label}", "{vm.effort_letter} · {vm.effort_label}" }
                span { class: "badge {vm.priority_class}", "{vm.priority_label}" }
                if let Some(level) = vm.difficulty_label {
                    span { class: "badge difficulty", "{level}" }
                }
                if let Some(due) = &vm.due_label {
                    span { class: "badge due", "Due {due}" }
                }
                if vm.continue_tomorrow {
                    span { class: "badge carryover", "Continues tomorrow" }
                }
            }

            div { class: "task-card__controls",
                select {
                    class: "task-card__status",
                    onchange: on_status,
                    for status in TaskStatus::SELECTABLE {
                        option {
                            value: status.as_wire(),
                            selected: status == vm.status,
                            "{status.label()}"
                        }
                    }
                }
                if mode == ReviewMode::Overview {
                    button { class: "link", onclick: on_toggle_details,
                        if panels.details_open { "Hide details" } else { "Show details" }
                    }
                }
                if panels.offers_carryover {
                    button { class: "secondary", onclick: on_toggle_progress,
                        "{panels.carryover_label}"
                    }
                }
            }

            if panels.shows_midday {
                MiddayPicker { id: id.clone(), current: vm.midday_status }
            }
            if panels.shows_eod {
                EodPicker { id: id.clone(), current: vm.eod_outcome }
            }

            if panels.details_open {
                div { class: "task-card__details",
                    label { "Deliverable"
                        textarea {
                            placeholder: "{vm.deliverable}",
                            value: "{card.deliverable}",
                            oninput: on_deliverable,
                        }
                    }
                    label { "Bottleneck"
                        textarea {
                            placeholder: "{vm.bottleneck}",
                            value: "{card.bottleneck}",
                            oninput: on_bottleneck,
                        }
                    }
                    button { class: "primary", onclick: on_save_details, "Save details" }
                }
            }

            if panels.progress_open {
                div { class: "task-card__progress",
                    label { "Progress so far"
                        textarea {
                            placeholder: "What is done, what is left?",
                            value: "{card.progress}",
                            oninput: on_progress.clone(),
                        }
                    }
                    button { class: "primary", onclick: on_continue, "Save & continue tomorrow" }
                }
            }

            if mode == ReviewMode::Carryover {
                div { class: "task-card__progress",
                    label { "Progress"
                        textarea {
                            value: "{card.progress}",
                            oninput: on_progress,
                        }
                    }
                    button { class: "primary", onclick: on_save_carryover, "Save progress" }
                }
            }
        }
    }
}

#[component]
fn MiddayPicker(id: TaskId, current: Option<MiddayStatus>) -> Element {
    let board = use_context::<AppContext>().board();
    let mut revision = use_revision();

    rsx! {
        div { class: "checkpoint",
            span { class: "checkpoint__label", "Midday status" }
            for status in MiddayStatus::ALL {
                button {
                    class: chip_class(current == Some(status)),
                    onclick: {
                        let board = board.clone();
                        let id = id.clone();
                        move |_: MouseEvent| {
                            board.set_midday_status(&id, status);
                            revision.bump();
                        }
                    },
                    "{status.label()}"
                }
            }
        }
    }
}

#[component]
fn EodPicker(id: TaskId, current: Option<EodOutcome>) -> Element {
    let board = use_context::<AppContext>().board();
    let mut revision = use_revision();

    rsx! {
        div { class: "checkpoint",
            span { class: "checkpoint__label", "Outcome" }
            for outcome in EodOutcome::ALL {
                button {
                    class: chip_class(current == Some(outcome)),
                    onclick: {
                        let board = board.clone();
                        let id = id.clone();
                        move |_: MouseEvent| {
                            board.set_eod_outcome(&id, outcome);
                            revision.bump();
                        }
                    },
                    "{outcome.label()}"
                }
            }
        }
    }
}

fn chip_class(active: bool) -> &'static str {
    if active { "chip active" } else { "chip" }
}
