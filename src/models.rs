use crate::consent::{ConsentState, StoragePreferences};
use serde::{Deserialize, Serialize};

/// A single timed task. Times are integer milliseconds; `id` is the epoch-ms
/// instant the task was created (bumped on same-millisecond collisions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub total_time_spent: i64,
    #[serde(default)]
    pub current_session_time: i64,
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub last_start_time: Option<i64>,
}

/// The in-memory task collection, in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub tasks: Vec<Task>,
}

/// Shape written to disk and offered for export. `statistics` is a summary
/// recomputed at save time; import ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksPayload {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub statistics: StatsSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatsSummary {
    pub total_tasks: usize,
    pub active_tasks: usize,
    pub total_time_ms: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

/// Returned by every mutating task endpoint: the updated collection plus the
/// outcome of the gated write. A storage failure does not roll memory back, so
/// `error` can be set while `tasks` already reflects the mutation.
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
    pub storage: StorageStatus,
}

#[derive(Debug, Serialize)]
pub struct StorageStatus {
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StorageStatus {
    pub fn skipped() -> Self {
        Self {
            persisted: false,
            error: None,
        }
    }

    pub fn saved() -> Self {
        Self {
            persisted: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            persisted: false,
            error: Some(message.into()),
        }
    }
}

/// Consent choice sent by the settings modal or the banner buttons.
/// `essential` is implied and not accepted from the client.
#[derive(Debug, Deserialize)]
pub struct ConsentUpdateRequest {
    #[serde(default)]
    pub task_storage: bool,
    #[serde(default)]
    pub file_storage: bool,
}

#[derive(Debug, Serialize)]
pub struct ConsentResponse {
    pub state: ConsentState,
    pub preferences: StoragePreferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub total_ms: i64,
}

#[derive(Debug, Serialize)]
pub struct WeekdayPoint {
    pub label: String,
    pub hours: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_tasks: usize,
    pub active_tasks: usize,
    pub total_time_ms: i64,
    pub categories: Vec<CategorySlice>,
    pub weekday_hours: Vec<WeekdayPoint>,
}

impl StatsResponse {
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            total_tasks: self.total_tasks,
            active_tasks: self.active_tasks,
            total_time_ms: self.total_time_ms,
        }
    }
}
