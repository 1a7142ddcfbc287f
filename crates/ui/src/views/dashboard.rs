use dioxus::prelude::*;
use taskboard_core::review::ReviewMode;

use crate::context::{AppContext, use_revision};
use crate::views::components::{
    CapacityBar, PendingTasks, ProfileCard, QuickAddBar, TaskCard, WeeklyGoals,
};
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let board = ctx.board();
    let projects = ctx.projects();
    let revision = use_revision();
    revision.track();

    use_hook({
        let board = board.clone();
        move || board.set_mode(ReviewMode::Overview)
    });

    let resource = use_resource({
        let board = board.clone();
        move || {
            let board = board.clone();
            async move { board.refresh().await.map_err(ViewError::from) }
        }
    });
    let state = view_state_from_resource(&resource);

    let greeting = ctx.greeting().text();
    let name = ctx.profile().greeting_name();
    let user = ctx.auth().current_user();
    let totals = projects.totals();
    let tasks = board.visible_tasks();

    rsx! {
        div { class: "page dashboard",
            header { class: "page__header",
                h2 { "{greeting}, {name}" }
                p { class: "muted", "Here is where your day stands." }
            }

            section { class: "stats",
                div { class: "stat",
                    span { class: "stat__value", "{totals.total}" }
                    span { class: "stat__label", "Total tasks" }
                }
                div { class: "stat",
                    span { class: "stat__value", "{totals.in_progress}" }
                    span { class: "stat__label", "In progress" }
                }
                div { class: "stat",
                    span { class: "stat__value", "{totals.completed}" }
                    span { class: "stat__label", "Completed" }
                }
            }

            div { class: "dashboard__grid",
                div { class: "dashboard__main",
                    CapacityBar { capacity: board.capacity() }
                    QuickAddBar {}

                    section { class: "task-list",
                        h3 { "{ReviewMode::Overview.heading()}" }
                        match state {
                            ViewState::Error(err) if tasks.is_empty() => rsx! {
                                p { class: "error", "{err.message()}" }
                            },
                            ViewState::Idle | ViewState::Loading if tasks.is_empty() => rsx! {
                                p { class: "muted", "Loading..." }
                            },
                            _ if tasks.is_empty() => rsx! {
                                p { class: "muted", "No tasks yet. Use the quick add above." }
                            },
                            _ => rsx! {
                                for task in tasks {
                                    TaskCard { key: "{task.id}", task }
                                }
                            },
                        }
                    }

                    ProjectList {}
                }

                aside { class: "dashboard__side",
                    ProfileCard {}
                    WeeklyGoals { goals: projects.weekly_goals() }
                    if let Some(user) = user {
                        PendingTasks { user_id: user.id }
                    }
                }
            }
        }
    }
}

#[component]
fn ProjectList() -> Element {
    let projects = use_context::<AppContext>().projects();
    let revision = use_revision();
    revision.track();
    let items = projects.projects();

    rsx! {
        section { class: "projects",
            h3 { "Projects" }
            if items.is_empty() {
                p { class: "muted", "No projects yet." }
            }
            ul {
                for project in items {
                    li { key: "{project.id}", class: "project-row",
                        div { class: "project-row__info",
                            strong { "{project.name}" }
                            span { class: "muted", "{project.goal_label()} · {project.tasks.len()} tasks" }
                        }
                        button {
                            class: "danger",
                            onclick: {
                                let projects = projects.clone();
                                let id = project.id.clone();
                                move |_: MouseEvent| {
                                    let projects = projects.clone();
                                    let id = id.clone();
                                    revision.settle(async move { projects.delete_project(&id).await });
                                }
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
