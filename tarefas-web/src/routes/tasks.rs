/// Task endpoints
///
/// This module provides the task list and its three mutations. Every
/// handler here sits behind the session gate, so a resolved [`CurrentUser`]
/// is always present -- and every lookup or mutation is checked against that
/// user before anything touches the store. A mismatched owner is reported
/// with a notice, never silently ignored and never acted on.
///
/// # Endpoints
///
/// - `GET  /tasks`            - Current user's task list
/// - `GET  /add_tasks`        - Add-task form
/// - `POST /add_tasks`        - Create a task owned by the current user
/// - `GET  /update_task/:id`  - Toggle Pendente ⇄ Concluída
/// - `GET  /delete_task/:id`  - Delete permanently

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    flash::{self, Notice},
    render::View,
};
use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tarefas_shared::auth::session::CurrentUser;
use tarefas_shared::models::task::{CreateTask, Task};

/// Add-task form payload
///
/// There is deliberately no status field to submit; whatever a client
/// posts, a new task starts as Pendente.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    /// Task title
    pub title: String,
}

/// Task list handler
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let tasks = Task::list_by_owner(&state.db, user.id).await?;

    let (jar, notices) = flash::take(jar);
    let view = View::new("tasks")
        .with_context(json!({
            "user": { "id": user.id, "name": user.name },
            "tasks": tasks,
        }))
        .with_notices(notices);

    Ok((jar, state.render(&view)?))
}

/// Add-task form handler
///
/// # Endpoint
///
/// ```text
/// GET /add_tasks
/// ```
pub async fn add_task_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, notices) = flash::take(jar);
    let view = View::new("add_task").with_notices(notices);
    Ok((jar, state.render(&view)?))
}

/// Add-task submit handler
///
/// Creates a task owned by the current user and redirects to the list. An
/// empty (or whitespace-only) title re-renders the form with a visible
/// notice instead of writing anything.
///
/// # Endpoint
///
/// ```text
/// POST /add_tasks
/// Content-Type: application/x-www-form-urlencoded
///
/// title=Buy+milk
/// ```
pub async fn add_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<TaskForm>,
) -> AppResult<Response> {
    let title = form.title.trim().to_string();
    if title.is_empty() {
        let (jar, mut notices) = flash::take(jar);
        notices.push(Notice::danger("Title is required"));
        let view = View::new("add_task").with_notices(notices);
        return Ok((jar, state.render(&view)?).into_response());
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            title,
            user_id: user.id,
        },
    )
    .await?;

    tracing::debug!(user_id = user.id, task_id = task.id, "Task created");
    Ok(Redirect::to("/tasks").into_response())
}

/// Toggle-status handler
///
/// Flips the task between Pendente and Concluída and redirects to the
/// list. The ownership check runs before the mutation: someone else's task
/// id yields a notice and an untouched row.
///
/// # Endpoint
///
/// ```text
/// GET /update_task/:id
/// ```
///
/// # Errors
///
/// - 404 Not Found: the task id does not exist
pub async fn update_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    if task.user_id != user.id {
        tracing::warn!(
            user_id = user.id,
            task_id = task.id,
            owner_id = task.user_id,
            "Blocked toggle of another user's task"
        );
        let jar = flash::push(jar, Notice::danger("You cannot modify this task"));
        return Ok((jar, Redirect::to("/tasks")).into_response());
    }

    Task::set_status(&state.db, task.id, task.status.toggled()).await?;

    Ok(Redirect::to("/tasks").into_response())
}

/// Delete handler
///
/// Removes the task permanently and redirects to the list with a notice.
/// Same ownership gate as the toggle: a mismatched owner mutates nothing.
///
/// # Endpoint
///
/// ```text
/// GET /delete_task/:id
/// ```
///
/// # Errors
///
/// - 404 Not Found: the task id does not exist
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    if task.user_id != user.id {
        tracing::warn!(
            user_id = user.id,
            task_id = task.id,
            owner_id = task.user_id,
            "Blocked delete of another user's task"
        );
        let jar = flash::push(jar, Notice::danger("You cannot delete this task"));
        return Ok((jar, Redirect::to("/tasks")).into_response());
    }

    Task::delete(&state.db, task.id).await?;

    let jar = flash::push(jar, Notice::success("Task deleted"));
    Ok((jar, Redirect::to("/tasks")).into_response())
}

// Handler behavior needs a live router and pool; it is covered end-to-end
// in tests/integration_test.rs.
