use std::sync::Arc;

use backend::{Backend, InMemoryBackend};
use services::{AppServices, MemorySessionStore};
use taskboard_core::model::{
    Project, ProjectId, Role, SessionPersistence, Task, TaskId, User, UserId,
};
use taskboard_core::quick_add::parse_quick_add;
use taskboard_core::review::ReviewMode;
use taskboard_core::time::{fixed_clock, fixed_now};

fn seeded_services() -> AppServices {
    let repo = InMemoryBackend::with_clock(fixed_clock());
    repo.seed_user(
        User {
            id: UserId::new("u1"),
            email: "kim@corp.io".into(),
            full_name: Some("Kim".into()),
            role: Role::Sce,
            created_at: Some(fixed_now()),
        },
        "secret1",
    )
    .expect("seed user");
    let mut project = Project::new(ProjectId::new("p1"), "Website");
    project.user_id = Some(UserId::new("u1"));
    repo.seed_project(project).expect("seed project");
    repo.seed_task(Task::new(TaskId::new("t1"), ProjectId::new("p1"), "Header"))
        .expect("seed task");

    AppServices::new(
        &Backend::from_memory(repo),
        fixed_clock(),
        Arc::new(MemorySessionStore::new()),
    )
}

#[tokio::test]
async fn sign_in_then_run_a_daily_review() {
    let services = seeded_services();
    let user = services
        .auth()
        .sign_in("kim@corp.io", "secret1", Some(Role::Sce), SessionPersistence::SessionLogin)
        .await
        .expect("sign in");

    services.profile().load(&user.id).await.expect("profile");
    assert_eq!(services.users().role_filter(), Role::Sce);

    let board = services.board();
    board.refresh().await.expect("refresh");
    let defaults = board.quick_add_defaults(Some(&user.email));
    let entry = parse_quick_add("Write release notes ^S", &defaults).expect("entry");
    assert_eq!(entry.project, "Website");
    let added = board
        .add_task(entry, Some(user.id.clone()))
        .await
        .expect("add task");
    assert_eq!(board.tasks().len(), 2);

    board.set_mode(ReviewMode::EndOfDay);
    board
        .mark_continue_tomorrow(&added, "outline drafted")
        .await
        .expect("carry over");
    board
        .mark_continue_tomorrow(&added, "first section written")
        .await
        .expect("carry over again");

    board.set_mode(ReviewMode::Carryover);
    let carried = board.visible_tasks();
    assert_eq!(carried.len(), 1);
    assert!(carried[0].continue_tomorrow);
    assert_eq!(carried[0].progress.as_deref(), Some("first section written"));

    board
        .save_carryover_progress(&added, "ready for review")
        .await
        .expect("save progress");
    board.refresh().await.expect("refresh");
    let task = board
        .tasks()
        .into_iter()
        .find(|task| task.id == added)
        .expect("task present");
    assert_eq!(task.progress.as_deref(), Some("ready for review"));
    assert_eq!(task.goal, "Complete task");
}
