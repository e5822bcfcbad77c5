/// Integration tests for the Tarefas web application
///
/// These tests drive the full router end-to-end against an in-memory
/// database:
/// - Registration, login, and the session cookie
/// - The task lifecycle (add → list → toggle → delete)
/// - Ownership isolation between users
/// - Logout invalidation and the login-required gate

mod common;

use axum::http::StatusCode;
use common::TestContext;
use tarefas_shared::models::task::{Task, TaskStatus};

/// The landing page is public and renders
#[tokio::test]
async fn test_landing_page_is_public() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_string(response).await;
    assert!(body.contains("data-template=\"index\""));
}

/// Health endpoint reports a connected database
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/health", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

/// Every protected route redirects to the login page without a session
#[tokio::test]
async fn test_protected_routes_require_session() {
    let ctx = TestContext::new().await.unwrap();

    for uri in [
        "/tasks",
        "/add_tasks",
        "/logout",
        "/update_task/1",
        "/delete_task/1",
    ] {
        let response = ctx.get(uri, &[]).await;
        assert_eq!(
            response.status(),
            StatusCode::SEE_OTHER,
            "{} should redirect without a session",
            uri
        );
        assert_eq!(common::location_of(&response), "/login");
    }
}

/// An unauthenticated POST never reaches the store
#[tokio::test]
async fn test_unauthenticated_post_mutates_nothing() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.post_form("/add_tasks", "title=Sneaky", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location_of(&response), "/login");

    assert_eq!(common::count_rows(&ctx, "tasks").await, 0);
}

/// The full lifecycle: register → login → add → toggle → toggle → delete
#[tokio::test]
async fn test_register_login_task_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let session = common::register_and_login(&ctx, "Alice", "a@x.com", "pw1").await;

    // Empty list to start with
    let body = common::body_string(ctx.get("/tasks", &[session.clone()]).await).await;
    assert!(body.contains("data-template=\"tasks\""));
    assert!(!body.contains("Buy milk"));

    // Add a task
    let response = ctx
        .post_form("/add_tasks", "title=Buy+milk", &[session.clone()])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location_of(&response), "/tasks");

    // Exactly one task, Pending, owned by the registered user
    let body = common::body_string(ctx.get("/tasks", &[session.clone()]).await).await;
    assert!(body.contains("Buy milk"));
    assert!(body.contains("Pendente"));
    assert_eq!(common::count_rows(&ctx, "tasks").await, 1);

    let task_id = common::task_id_by_title(&ctx, "Buy milk").await;

    // Toggle to Concluída
    let response = ctx
        .get(&format!("/update_task/{}", task_id), &[session.clone()])
        .await;
    assert_eq!(common::location_of(&response), "/tasks");

    let task = Task::find_by_id(&ctx.db, task_id).await.unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Done);

    // Toggling again returns it to Pendente
    ctx.get(&format!("/update_task/{}", task_id), &[session.clone()])
        .await;
    let task = Task::find_by_id(&ctx.db, task_id).await.unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Pending);

    // Delete, list is empty again
    let response = ctx
        .get(&format!("/delete_task/{}", task_id), &[session.clone()])
        .await;
    assert_eq!(common::location_of(&response), "/tasks");
    assert_eq!(common::count_rows(&ctx, "tasks").await, 0);

    // The deletion notice shows once on the next page, then is gone
    let body = common::body_string(ctx.get("/tasks", &[session.clone()]).await).await;
    assert!(body.contains("Task deleted"));
    let body = common::body_string(ctx.get("/tasks", &[session]).await).await;
    assert!(!body.contains("Task deleted"));
}

/// A second registration with the same email adds no row
#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let body = "name=Alice&email=a@x.com&password=pw1";
    let response = ctx.post_form("/register", body, &[]).await;
    assert_eq!(common::location_of(&response), "/login");

    let body = "name=Impostor&email=a@x.com&password=other";
    let response = ctx.post_form("/register", body, &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location_of(&response), "/register");
    assert_eq!(common::count_rows(&ctx, "users").await, 1);

    // The notice surfaces on the re-rendered registration form
    let notices = common::cookies_from(&response);
    let body = common::body_string(ctx.get("/register", &notices).await).await;
    assert!(body.contains("Email already registered"));
}

/// Registration with a malformed email bounces back with a notice
#[tokio::test]
async fn test_register_invalid_email() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_form("/register", "name=Alice&email=nope&password=pw1", &[])
        .await;
    assert_eq!(common::location_of(&response), "/register");
    assert_eq!(common::count_rows(&ctx, "users").await, 0);
}

/// A wrong password re-renders the login form; no session is established
#[tokio::test]
async fn test_login_wrong_password() {
    let ctx = TestContext::new().await.unwrap();
    common::register_and_login(&ctx, "Alice", "a@x.com", "pw1").await;

    let response = ctx
        .post_form("/login", "email=a@x.com&password=wrong", &[])
        .await;

    // Re-rendered form, not a redirect
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::session_cookie_from(&response).is_none());

    let body = common::body_string(response).await;
    assert!(body.contains("data-template=\"login\""));
    assert!(body.contains("Invalid email or password"));
}

/// An unknown email produces the same combined message as a wrong password
#[tokio::test]
async fn test_login_unknown_email() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_form("/login", "email=nobody@x.com&password=pw1", &[])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::session_cookie_from(&response).is_none());

    let body = common::body_string(response).await;
    assert!(body.contains("Invalid email or password"));
}

/// A submitted status field is ignored; new tasks always start Pending
#[tokio::test]
async fn test_created_task_ignores_submitted_status() {
    let ctx = TestContext::new().await.unwrap();
    let session = common::register_and_login(&ctx, "Alice", "a@x.com", "pw1").await;

    ctx.post_form(
        "/add_tasks",
        "title=Sneaky&status=Conclu%C3%ADda",
        &[session],
    )
    .await;

    let task_id = common::task_id_by_title(&ctx, "Sneaky").await;
    let task = Task::find_by_id(&ctx.db, task_id).await.unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
}

/// An empty or whitespace-only title writes nothing and shows a notice
#[tokio::test]
async fn test_empty_title_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let session = common::register_and_login(&ctx, "Alice", "a@x.com", "pw1").await;

    for body in ["title=", "title=+++"] {
        let response = ctx.post_form("/add_tasks", body, &[session.clone()]).await;

        // Form re-rendered with the notice, nothing persisted
        assert_eq!(response.status(), StatusCode::OK);
        let html = common::body_string(response).await;
        assert!(html.contains("data-template=\"add_task\""));
        assert!(html.contains("Title is required"));
    }

    assert_eq!(common::count_rows(&ctx, "tasks").await, 0);
}

/// Users cannot toggle or delete each other's tasks
#[tokio::test]
async fn test_ownership_isolation() {
    let ctx = TestContext::new().await.unwrap();

    let bob = common::register_and_login(&ctx, "Bob", "b@x.com", "pw2").await;
    ctx.post_form("/add_tasks", "title=Bobs+task", &[bob]).await;
    let task_id = common::task_id_by_title(&ctx, "Bobs task").await;

    let alice = common::register_and_login(&ctx, "Alice", "a@x.com", "pw1").await;

    // Toggle attempt: redirect with notice, no mutation
    let response = ctx
        .get(&format!("/update_task/{}", task_id), &[alice.clone()])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location_of(&response), "/tasks");

    let task = Task::find_by_id(&ctx.db, task_id).await.unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Pending, "Task must be unchanged");

    // The refusal is reported on Alice's next page
    let mut cookies = vec![alice.clone()];
    cookies.extend(common::cookies_from(&response));
    let body = common::body_string(ctx.get("/tasks", &cookies).await).await;
    assert!(body.contains("You cannot modify this task"));

    // Delete attempt: same gate, task survives
    let response = ctx
        .get(&format!("/delete_task/{}", task_id), &[alice.clone()])
        .await;
    assert_eq!(common::location_of(&response), "/tasks");
    assert!(Task::find_by_id(&ctx.db, task_id).await.unwrap().is_some());

    // Bob's list still shows the task; Alice's never did
    let body = common::body_string(ctx.get("/tasks", &[alice]).await).await;
    assert!(!body.contains("Bobs task"));
}

/// Logout removes the session cookie and the gate locks again
#[tokio::test]
async fn test_logout_invalidates_session() {
    let ctx = TestContext::new().await.unwrap();
    let session = common::register_and_login(&ctx, "Alice", "a@x.com", "pw1").await;

    let response = ctx.get("/logout", &[session]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location_of(&response), "/");

    // The response must clear the session cookie
    let cleared = response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("tarefas_session=") && (v.contains("Max-Age=0") || v.starts_with("tarefas_session=;")));
    assert!(cleared, "Logout must remove the session cookie");

    // A client honoring the removal is anonymous again
    let response = ctx.get("/tasks", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location_of(&response), "/login");
}

/// Toggling an id that does not exist is a 404, not a silent redirect
#[tokio::test]
async fn test_update_missing_task_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let session = common::register_and_login(&ctx, "Alice", "a@x.com", "pw1").await;

    let response = ctx.get("/update_task/999", &[session.clone()]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx.get("/delete_task/999", &[session]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A forged session cookie is rejected by the gate
#[tokio::test]
async fn test_forged_session_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    common::register_and_login(&ctx, "Alice", "a@x.com", "pw1").await;

    // Signed with the wrong secret for user id 1
    let forged = tarefas_shared::auth::session::issue_token(1, "attacker-controlled-secret-32-bytes!!")
        .unwrap();

    let response = ctx
        .get("/tasks", &[format!("tarefas_session={}", forged)])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location_of(&response), "/login");
}
