use std::sync::Arc;

use backend::{Backend, InMemoryBackend};
use chrono::Duration;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, MemorySessionStore};
use taskboard_core::model::{
    Effort, Project, ProjectId, Role, SessionPersistence, Task, TaskId, TaskStatus, User, UserId,
};
use taskboard_core::time::{fixed_clock, fixed_now};

use crate::context::{UiApp, build_app_context, use_revision_provider};
use crate::views::{AuthView, DashboardView, TodayView, UsersView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Auth,
    Dashboard,
    Today,
    Users,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_revision_provider();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Auth => rsx! { AuthView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Today => rsx! { TodayView {} },
        ViewKind::Users => rsx! { UsersView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryBackend,
    pub services: Arc<AppServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let the view's fetches settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn user(id: &str, email: &str, name: &str, role: Role) -> User {
    User {
        id: UserId::new(id),
        email: email.to_owned(),
        full_name: Some(name.to_owned()),
        role,
        created_at: Some(fixed_now()),
    }
}

/// Backend with two users, one project and three tasks:
/// one due today, one overdue and one flagged to continue tomorrow.
pub fn seeded_backend() -> InMemoryBackend {
    let repo = InMemoryBackend::with_clock(fixed_clock());
    repo.seed_user(user("u1", "lee@corp.io", "Lee", Role::Se), "secret1")
        .expect("seed lee");
    repo.seed_user(user("u2", "sam@corp.io", "Sam", Role::Sce), "secret1")
        .expect("seed sam");

    let mut project = Project::new(ProjectId::new("p1"), "Website");
    project.description = "Launch v2".to_owned();
    project.confidence = 80.0;
    project.user_id = Some(UserId::new("u1"));
    repo.seed_project(project).expect("seed project");

    let today = fixed_clock().today();
    let mut current = Task::new(TaskId::new("t1"), ProjectId::new("p1"), "Write copy");
    current.status = TaskStatus::InProgress;
    current.effort = Effort::Large;
    current.due_date = Some(today);
    repo.seed_task(current).expect("seed current");

    let mut overdue = Task::new(TaskId::new("t2"), ProjectId::new("p1"), "Fix header");
    overdue.due_date = Some(today - Duration::days(2));
    repo.seed_task(overdue).expect("seed overdue");

    let mut carried = Task::new(TaskId::new("t3"), ProjectId::new("p1"), "Carried task");
    carried.due_date = Some(today);
    carried.mark_continue_tomorrow("Halfway there");
    repo.seed_task(carried).expect("seed carried");

    repo
}

pub async fn setup_view_harness(view: ViewKind, signed_in: bool) -> ViewHarness {
    let repo = seeded_backend();
    let services = Arc::new(AppServices::new(
        &Backend::from_memory(repo.clone()),
        fixed_clock(),
        Arc::new(MemorySessionStore::new()),
    ));

    if signed_in {
        let user = services
            .auth()
            .sign_in("lee@corp.io", "secret1", None, SessionPersistence::Persistent)
            .await
            .expect("sign in");
        services.profile().load(&user.id).await.expect("load profile");
    } else {
        services.auth().restore().await;
    }

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&services),
            view,
        },
    );

    ViewHarness {
        dom,
        repo,
        services,
    }
}
