use dioxus::prelude::*;
use taskboard_core::model::{Role, UserForm, UserId};

use crate::context::{AppContext, use_revision};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{UserRowVm, map_task_cards, map_user_rows};

#[component]
pub fn UsersView() -> Element {
    let ctx = use_context::<AppContext>();
    let users = ctx.users();
    let projects = ctx.projects();
    let now = ctx.clock().now();
    let mut revision = use_revision();
    revision.track();

    let resource = use_resource({
        let users = users.clone();
        move || {
            let users = users.clone();
            let projects = projects.clone();
            async move {
                projects.refresh_quietly().await;
                users.refresh().await.map_err(ViewError::from)
            }
        }
    });
    let state = view_state_from_resource(&resource);

    let editing = use_signal(|| None::<(UserId, UserForm)>);
    let filter = users.role_filter();
    let rows = map_user_rows(&users.filtered(), now);
    let total = users.users().len();
    let new_this_week = users.new_this_week();
    let viewing = users.viewing();

    let on_toggle = {
        let users = users.clone();
        move |_: MouseEvent| {
            users.toggle_role_filter();
            revision.bump();
        }
    };

    rsx! {
        div { class: "page users",
            header { class: "page__header",
                h2 { "Team" }
                p { class: "muted", "{total} members · {new_this_week} new this week" }
            }

            div { class: "users__toolbar",
                button { class: "secondary", onclick: on_toggle,
                    "Showing {filter} · switch to {filter.toggled()}"
                }
            }

            AddUserForm {}

            if let Some(user) = viewing {
                UserTasksPanel { user }
            }

            match state {
                ViewState::Error(err) if rows.is_empty() => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Idle | ViewState::Loading if rows.is_empty() => rsx! {
                    p { class: "muted", "Loading..." }
                },
                _ if rows.is_empty() => rsx! {
                    p { class: "muted", "No {filter} members yet." }
                },
                _ => rsx! {
                    table { class: "roster",
                        thead {
                            tr {
                                th { "" }
                                th { "Name" }
                                th { "Email" }
                                th { "Role" }
                                th { "Joined" }
                                th { "" }
                            }
                        }
                        tbody {
                            for row in rows {
                                if editing.read().as_ref().is_some_and(|(id, _)| *id == row.id) {
                                    EditUserRow { key: "{row.id}", editing }
                                } else {
                                    UserRow { key: "{row.id}", row, editing }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn UserRow(row: UserRowVm, editing: Signal<Option<(UserId, UserForm)>>) -> Element {
    let mut editing = editing;
    let ctx = use_context::<AppContext>();
    let users = ctx.users();
    let mut revision = use_revision();

    let on_tasks = {
        let users = users.clone();
        let id = row.id.clone();
        move |_: MouseEvent| {
            users.show_tasks(Some(id.clone()));
            revision.bump();
        }
    };

    let on_edit = {
        let users = users.clone();
        let id = row.id.clone();
        move |_: MouseEvent| {
            if let Some(user) = users.users().into_iter().find(|user| user.id == id) {
                editing.set(Some((id.clone(), UserForm::from_user(&user))));
            }
        }
    };

    let on_delete = {
        let id = row.id.clone();
        move |_: MouseEvent| {
            let users = users.clone();
            let id = id.clone();
            revision.settle(async move { users.delete_user(&id).await });
        }
    };

    rsx! {
        tr {
            td { span { class: "avatar", "{row.initial}" } }
            td {
                "{row.name}"
                if row.is_new {
                    span { class: "badge new", "New" }
                }
            }
            td { "{row.email}" }
            td { "{row.role}" }
            td { "{row.joined}" }
            td { class: "roster__actions",
                button { class: "link", onclick: on_tasks, "Tasks" }
                button { class: "link", onclick: on_edit, "Edit" }
                button { class: "danger", onclick: on_delete, "Delete" }
            }
        }
    }
}

/// Projects a member owns and the tasks inside them.
#[component]
fn UserTasksPanel(user: UserId) -> Element {
    let ctx = use_context::<AppContext>();
    let users = ctx.users();
    let mut revision = use_revision();
    revision.track();

    let Some(member) = users.users().into_iter().find(|member| member.id == user) else {
        return rsx! {};
    };
    let workload = ctx.projects().workload_of(&user);
    let completed = workload.completed();
    let total = workload.tasks.len();
    let cards = map_task_cards(&workload.tasks);

    let on_close = move |_: MouseEvent| {
        users.show_tasks(None);
        revision.bump();
    };

    rsx! {
        section { class: "user-tasks",
            header { class: "user-tasks__header",
                div {
                    h3 { "User Tasks" }
                    p { class: "muted", "Tasks assigned to {member.display_name()}" }
                }
                button { class: "secondary", onclick: on_close, "Close" }
            }
            div { class: "stats",
                div { class: "stat",
                    span { class: "stat__value", "{workload.projects}" }
                    span { class: "stat__label", "Projects" }
                }
                div { class: "stat",
                    span { class: "stat__value", "{total}" }
                    span { class: "stat__label", "Total Tasks" }
                }
                div { class: "stat",
                    span { class: "stat__value", "{completed}" }
                    span { class: "stat__label", "Completed" }
                }
            }
            if cards.is_empty() {
                div { class: "user-tasks__empty",
                    p { "No tasks found" }
                    p { class: "muted", "This user has no tasks assigned yet." }
                }
            } else {
                ul { class: "user-tasks__list",
                    for card in cards {
                        li { key: "{card.id}", class: "user-tasks__item",
                            div { class: "user-tasks__title",
                                strong { "{card.title}" }
                                span { class: "badge {card.priority_class}", "{card.priority_label}" }
                            }
                            p { class: "muted", "Project: {card.project_name}" }
                            p { class: "user-tasks__meta",
                                span { "Effort: {card.effort_label}" }
                                span { class: "{card.status_class}", "Status: {card.status_label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EditUserRow(editing: Signal<Option<(UserId, UserForm)>>) -> Element {
    let users = use_context::<AppContext>().users();
    let revision = use_revision();
    let mut editing = editing;

    let Some((_, form)) = editing() else {
        return rsx! {};
    };

    let on_save = move |_: MouseEvent| {
        let Some((id, form)) = editing() else {
            return;
        };
        editing.set(None);
        let users = users.clone();
        revision.settle(async move { users.update_user(&id, &form).await });
    };

    rsx! {
        tr { class: "editing",
            td {}
            td {
                input {
                    r#type: "text",
                    value: "{form.full_name}",
                    oninput: move |evt: FormEvent| edit_draft(editing, |form| form.full_name = evt.value()),
                }
            }
            td {
                input {
                    r#type: "email",
                    value: "{form.email}",
                    oninput: move |evt: FormEvent| edit_draft(editing, |form| form.email = evt.value()),
                }
            }
            td {
                RoleSelect {
                    value: form.role,
                    onchange: move |role| edit_draft(editing, |form| form.role = role),
                }
            }
            td {}
            td { class: "roster__actions",
                button { class: "primary", onclick: on_save, "Save" }
                button { class: "secondary", onclick: move |_| editing.set(None), "Cancel" }
            }
        }
    }
}

fn edit_draft(
    mut editing: Signal<Option<(UserId, UserForm)>>,
    apply: impl FnOnce(&mut UserForm),
) {
    if let Some((_, form)) = editing.write().as_mut() {
        apply(form);
    }
}

#[component]
fn AddUserForm() -> Element {
    let users = use_context::<AppContext>().users();
    let revision = use_revision();
    let mut draft = use_signal(UserForm::default);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let submitted = draft();
        draft.set(UserForm::default());
        let users = users.clone();
        revision.settle(async move { users.add_user(&submitted).await });
    };

    rsx! {
        form { class: "add-user", onsubmit: on_submit,
            h3 { "Add member" }
            input {
                r#type: "text",
                placeholder: "Full name",
                value: "{draft.read().full_name}",
                oninput: move |evt| draft.write().full_name = evt.value(),
            }
            input {
                r#type: "email",
                placeholder: "Email",
                value: "{draft.read().email}",
                oninput: move |evt| draft.write().email = evt.value(),
            }
            input {
                r#type: "password",
                placeholder: "Password (min 6 characters)",
                value: "{draft.read().password}",
                oninput: move |evt| draft.write().password = evt.value(),
            }
            RoleSelect {
                value: draft.read().role,
                onchange: move |role| draft.write().role = role,
            }
            button { class: "primary", r#type: "submit", "Add" }
        }
    }
}

#[component]
fn RoleSelect(value: Role, onchange: EventHandler<Role>) -> Element {
    rsx! {
        select {
            onchange: move |evt: FormEvent| {
                if let Some(role) = Role::parse(&evt.value()) {
                    onchange.call(role);
                }
            },
            for role in Role::ALL {
                option { value: role.as_str(), selected: role == value, "{role}" }
            }
        }
    }
}
