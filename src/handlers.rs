use crate::consent::StoragePreferences;
use crate::errors::AppError;
use crate::models::{
    AppData, ConsentResponse, ConsentUpdateRequest, CreateTaskRequest, StatsResponse,
    StorageStatus, TasksPayload, TasksResponse,
};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::storage::{clear_data, persist_data, persist_preferences};
use crate::store;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use tracing::error;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let consent_state = state.consent.lock().await.state();
    let stats = build_stats(&data);
    Html(render_index(&stats, consent_state))
}

pub async fn list_tasks(State(state): State<AppState>) -> Json<AppData> {
    let data = state.data.lock().await;
    Json(data.clone())
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<TasksResponse>, AppError> {
    let mut data = state.data.lock().await;
    store::create_task(&mut data, &request, now_millis())
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let storage = save_if_enabled(&state, &data).await;
    Ok(Json(TasksResponse {
        tasks: data.tasks.clone(),
        storage,
    }))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TasksResponse>, AppError> {
    let mut data = state.data.lock().await;
    store::toggle_task(&mut data, id, now_millis());

    let storage = save_if_enabled(&state, &data).await;
    Ok(Json(TasksResponse {
        tasks: data.tasks.clone(),
        storage,
    }))
}

pub async fn reset_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TasksResponse>, AppError> {
    let mut data = state.data.lock().await;
    store::reset_task(&mut data, id);

    let storage = save_if_enabled(&state, &data).await;
    Ok(Json(TasksResponse {
        tasks: data.tasks.clone(),
        storage,
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TasksResponse>, AppError> {
    let mut data = state.data.lock().await;
    store::delete_task(&mut data, id);

    let storage = save_if_enabled(&state, &data).await;
    Ok(Json(TasksResponse {
        tasks: data.tasks.clone(),
        storage,
    }))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let data = state.data.lock().await;
    Json(build_stats(&data))
}

pub async fn get_consent(State(state): State<AppState>) -> Json<ConsentResponse> {
    let consent = state.consent.lock().await;
    Json(ConsentResponse {
        state: consent.state(),
        preferences: consent.preferences(),
        message: None,
    })
}

pub async fn set_consent(
    State(state): State<AppState>,
    Json(request): Json<ConsentUpdateRequest>,
) -> Result<Json<ConsentResponse>, AppError> {
    let data = state.data.lock().await;
    let mut consent = state.consent.lock().await;
    let outcome = consent.apply(StoragePreferences {
        essential: true,
        task_storage: request.task_storage,
        file_storage: request.file_storage,
    });
    let preferences = consent.preferences();
    let consent_state = consent.state();
    let task_storage = consent.task_storage_enabled();
    drop(consent);

    let mut message = String::from("preferences saved");
    if let Err(err) = persist_preferences(&state.prefs_path, &preferences).await {
        error!("failed to persist preferences: {}", err.message);
        message = String::from("error saving preferences");
    }

    if outcome.revokes_stored_tasks {
        match clear_data(&state.data_path).await {
            Ok(()) => message.push_str("; previously stored task data was deleted"),
            Err(err) => {
                error!("failed to delete stored task data: {}", err.message);
                message.push_str("; failed to delete stored task data");
            }
        }
    } else if task_storage {
        // Grant takes effect immediately: write the current collection.
        if let Some(err) = persist_tasks(&state, &data).await.error {
            message = err;
        }
    }

    Ok(Json(ConsentResponse {
        state: consent_state,
        preferences,
        message: Some(message),
    }))
}

pub async fn export_tasks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    if !state.consent.lock().await.file_storage_enabled() {
        return Err(AppError::forbidden("file storage is not enabled"));
    }

    let data = state.data.lock().await;
    let payload = TasksPayload {
        tasks: data.tasks.clone(),
        statistics: build_stats(&data).summary(),
    };
    drop(data);

    let body = serde_json::to_vec_pretty(&payload).map_err(AppError::internal)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"task-timer-backup.json\"",
            ),
        ],
        body,
    ))
}

pub async fn import_tasks(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<TasksResponse>, AppError> {
    if !state.consent.lock().await.file_storage_enabled() {
        return Err(AppError::forbidden("file storage is not enabled"));
    }

    let payload: TasksPayload = serde_json::from_str(&body)
        .map_err(|err| AppError::bad_request(format!("could not read the import file: {err}")))?;

    let mut data = state.data.lock().await;
    data.tasks = payload.tasks;

    let storage = save_if_enabled(&state, &data).await;
    Ok(Json(TasksResponse {
        tasks: data.tasks.clone(),
        storage,
    }))
}

/// Gated write: skipped entirely unless task storage is granted. A disk
/// failure is logged and reported in the response; memory is not rolled back.
async fn save_if_enabled(state: &AppState, data: &AppData) -> StorageStatus {
    let enabled = state.consent.lock().await.task_storage_enabled();
    if !enabled {
        return StorageStatus::skipped();
    }
    persist_tasks(state, data).await
}

async fn persist_tasks(state: &AppState, data: &AppData) -> StorageStatus {
    let payload = TasksPayload {
        tasks: data.tasks.clone(),
        statistics: build_stats(data).summary(),
    };
    match persist_data(&state.data_path, &payload).await {
        Ok(()) => StorageStatus::saved(),
        Err(err) => {
            error!("failed to persist tasks: {}", err.message);
            StorageStatus::failed("error saving tasks")
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
