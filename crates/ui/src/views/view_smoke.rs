use taskboard_core::model::{Role, UserId};
use taskboard_core::review::ReviewMode;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_greeting_and_tasks() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, true).await;
    harness.settle().await;
    let html = harness.render();

    for expected in [
        "Good evening, Lee",
        "Write copy",
        "Carried task",
        "Total tasks",
        "Launch v2",
        "Add a task",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("Move to today"), "missing pending actions in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn today_view_smoke_defaults_to_midday_check() {
    let mut harness = setup_view_harness(ViewKind::Today, true).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Midday Check"), "missing heading in {html}");
    assert!(html.contains("MD (09:00 - 13:00)"), "missing toggle in {html}");
    assert!(html.contains("On track"), "missing midday picker in {html}");
    assert!(html.contains("Write copy"), "missing task in {html}");
    assert_eq!(harness.services.board().mode(), ReviewMode::Midday);
}

#[tokio::test(flavor = "current_thread")]
async fn today_view_smoke_carryover_lists_flagged_tasks_only() {
    let mut harness = setup_view_harness(ViewKind::Today, true).await;
    harness.services.board().set_mode(ReviewMode::Carryover);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Carried task"), "missing carried task in {html}");
    assert!(html.contains("Halfway there"), "missing progress note in {html}");
    assert!(!html.contains("Write copy"), "unflagged task listed in {html}");
    assert!(html.contains("Save progress"), "missing save action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn users_view_smoke_filters_by_role() {
    let mut harness = setup_view_harness(ViewKind::Users, true).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("lee@corp.io"), "missing SE member in {html}");
    assert!(!html.contains("sam@corp.io"), "SCE member shown in {html}");
    assert!(html.contains("2 members"), "missing roster count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn users_view_smoke_shows_toggled_role() {
    let mut harness = setup_view_harness(ViewKind::Users, true).await;
    harness.services.users().toggle_role_filter();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("sam@corp.io"), "missing SCE member in {html}");
    assert!(!html.contains("lee@corp.io"), "SE member shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn users_view_smoke_lists_a_members_tasks() {
    let mut harness = setup_view_harness(ViewKind::Users, true).await;
    harness.services.users().show_tasks(Some(UserId::new("u1")));
    harness.settle().await;
    let html = harness.render();

    for expected in [
        "User Tasks",
        "Tasks assigned to Lee",
        "Total Tasks",
        "Write copy",
        "Carried task",
        "Project: Website",
        "Status: In Progress",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("No tasks found"), "unexpected empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn users_view_smoke_member_without_projects_has_no_tasks() {
    let mut harness = setup_view_harness(ViewKind::Users, true).await;
    harness.services.users().set_role_filter(Role::Sce);
    harness.services.users().show_tasks(Some(UserId::new("u2")));
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Tasks assigned to Sam"), "missing panel in {html}");
    assert!(html.contains("No tasks found"), "missing empty state in {html}");
    assert!(!html.contains("Write copy"), "foreign task listed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_renders_sign_in_form() {
    let mut harness = setup_view_harness(ViewKind::Auth, false).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Sign in"), "missing sign in tab in {html}");
    assert!(html.contains("Keep me signed in"), "missing remember me in {html}");
    assert!(!html.contains("Signed in as"), "unexpected session in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_offers_dashboard_when_signed_in() {
    let mut harness = setup_view_harness(ViewKind::Auth, true).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Signed in as lee@corp.io"), "missing session in {html}");
    assert!(html.contains("Go to dashboard"), "missing dashboard link in {html}");
    assert_eq!(harness.repo.stored_tasks().expect("tasks").len(), 3);
}
