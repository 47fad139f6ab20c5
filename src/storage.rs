use crate::consent::StoragePreferences;
use crate::errors::AppError;
use crate::models::{AppData, TasksPayload};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/tasks.json"))
}

pub fn resolve_prefs_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_PREFS_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/preferences.json"))
}

/// Lenient load: a missing or unreadable file yields an empty collection.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<TasksPayload>(&bytes) {
            Ok(payload) => AppData {
                tasks: payload.tasks,
            },
            Err(err) => {
                error!("failed to parse tasks file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read tasks file: {err}");
            AppData::default()
        }
    }
}

/// `None` means no consent choice has been recorded yet.
pub async fn load_preferences(path: &Path) -> Option<StoragePreferences> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(prefs) => Some(prefs),
            Err(err) => {
                error!("failed to parse preferences file: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read preferences file: {err}");
            None
        }
    }
}

pub async fn persist_data(path: &Path, payload: &TasksPayload) -> Result<(), AppError> {
    let bytes = serde_json::to_vec_pretty(payload).map_err(AppError::internal)?;
    fs::write(path, bytes).await.map_err(AppError::internal)?;
    Ok(())
}

pub async fn persist_preferences(path: &Path, prefs: &StoragePreferences) -> Result<(), AppError> {
    let bytes = serde_json::to_vec_pretty(prefs).map_err(AppError::internal)?;
    fs::write(path, bytes).await.map_err(AppError::internal)?;
    Ok(())
}

/// Delete previously persisted task data after consent is withdrawn. A file
/// that was never written is not an error.
pub async fn clear_data(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(AppError::internal(err)),
    }
}
